use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use vouch_application::LoginUseCase;
use vouch_core::{PasswordScheme, UserStore};

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Credential login. On success the account summary is returned for the
/// session layer to turn into a session; nothing is issued here.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, P>(
    State(use_case): State<LoginUseCase<U, P>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + Send + Sync + 'static,
    P: PasswordScheme + Clone + Send + Sync + 'static,
{
    let summary = use_case.execute(request.email, request.password).await?;

    Ok((StatusCode::OK, Json(summary)))
}
