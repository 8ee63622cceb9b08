use axum::{extract::Query, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use vouch_application::RedeemVerificationUseCase;
use vouch_core::{Clock, TokenValue, UserStore, VerificationTokenStore};

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct VerifyEmailParams {
    #[serde(default)]
    pub token: String,
}

/// Redemption endpoint: the link from the verification mail lands here with
/// the token as a query parameter. The token value is never echoed back,
/// whatever the outcome.
#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<T, U, C>(
    State(use_case): State<RedeemVerificationUseCase<T, U, C>>,
    Query(params): Query<VerifyEmailParams>,
) -> Result<impl IntoResponse, AuthApiError>
where
    T: VerificationTokenStore + Clone + Send + Sync + 'static,
    U: UserStore + Clone + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    let token =
        TokenValue::parse(params.token).map_err(|_| AuthApiError::InvalidVerificationLink)?;

    use_case.execute(&token).await?;

    Ok((StatusCode::OK, String::from("Email verified successfully!")))
}
