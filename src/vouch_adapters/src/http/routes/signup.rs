use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use vouch_application::SignupUseCase;
use vouch_core::{Clock, Email, EmailClient, Password, PasswordScheme, UserStore, VerificationTokenStore};

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U, T, P, E, C>(
    State(use_case): State<SignupUseCase<U, T, P, E, C>>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + Send + Sync + 'static,
    T: VerificationTokenStore + Clone + Send + Sync + 'static,
    P: PasswordScheme + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    use_case
        .execute(email, password, request.display_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        String::from("Account created, check your inbox for a verification link"),
    ))
}
