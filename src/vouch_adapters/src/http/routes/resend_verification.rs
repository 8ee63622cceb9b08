use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use vouch_application::ResendVerificationUseCase;
use vouch_core::{Clock, Email, EmailClient, UserStore, VerificationTokenStore};

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: Secret<String>,
}

/// Request a fresh verification link. The response is the same whether or
/// not an account exists for the address.
#[tracing::instrument(name = "Resend verification", skip_all)]
pub async fn resend_verification<U, T, E, C>(
    State(use_case): State<ResendVerificationUseCase<U, T, E, C>>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + Send + Sync + 'static,
    T: VerificationTokenStore + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    let email = Email::try_from(request.email)?;

    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        String::from("If the account exists and is unverified, a new link has been sent"),
    ))
}
