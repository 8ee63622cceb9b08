use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vouch_application::{
    IssueVerificationError, LoginError, RedeemVerificationError, ResendVerificationError,
    SignupError,
};
use vouch_core::{EmailError, PasswordError, UserStoreError};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The HTTP error surface. Credential failures stay ambiguous so the API
/// cannot be used to enumerate accounts. Verification-link failures are safe
/// to distinguish because tokens are unguessable, and infrastructure faults
/// are reduced to a generic retry message.
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please verify your email address before signing in")]
    AccountNotVerified,

    #[error("An account with this email already exists")]
    AccountAlreadyExists,

    #[error("Verification link is invalid")]
    InvalidVerificationLink,

    #[error("Verification link has expired, request a new one")]
    ExpiredVerificationLink,

    #[error("Could not send the verification email, try requesting a new link")]
    EmailDeliveryFailed,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match &self {
            AuthApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),

            AuthApiError::AccountNotVerified => (StatusCode::FORBIDDEN, self.to_string()),

            AuthApiError::AccountAlreadyExists => (StatusCode::CONFLICT, self.to_string()),

            AuthApiError::InvalidVerificationLink => (StatusCode::BAD_REQUEST, self.to_string()),

            AuthApiError::ExpiredVerificationLink => (StatusCode::GONE, self.to_string()),

            AuthApiError::EmailDeliveryFailed => (StatusCode::BAD_GATEWAY, self.to_string()),

            // Never echo internals; the detail goes to the log only.
            AuthApiError::UnexpectedError(detail) => {
                tracing::error!(%detail, "unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Something went wrong, please try again"),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for AuthApiError {
    fn from(error: EmailError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for AuthApiError {
    fn from(error: PasswordError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<UserStoreError> for AuthApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::AccountAlreadyExists => AuthApiError::AccountAlreadyExists,
            UserStoreError::AccountNotFound | UserStoreError::UnexpectedError(_) => {
                AuthApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::MalformedInput => AuthApiError::InvalidInput(error.to_string()),
            LoginError::InvalidCredentials => AuthApiError::InvalidCredentials,
            LoginError::AccountNotVerified => AuthApiError::AccountNotVerified,
            LoginError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<SignupError> for AuthApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::AccountAlreadyExists => AuthApiError::AccountAlreadyExists,
            SignupError::EmailDelivery(_) => AuthApiError::EmailDeliveryFailed,
            SignupError::PasswordHash(e) => AuthApiError::UnexpectedError(e),
            SignupError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            SignupError::Issue(e) => e.into(),
        }
    }
}

impl From<IssueVerificationError> for AuthApiError {
    fn from(error: IssueVerificationError) -> Self {
        AuthApiError::UnexpectedError(error.to_string())
    }
}

impl From<RedeemVerificationError> for AuthApiError {
    fn from(error: RedeemVerificationError) -> Self {
        match error {
            RedeemVerificationError::InvalidToken => AuthApiError::InvalidVerificationLink,
            RedeemVerificationError::ExpiredToken => AuthApiError::ExpiredVerificationLink,
            // Consistency fault: a valid token pointing at no account. The
            // token has been restored; surface as a generic failure.
            RedeemVerificationError::UnknownIdentifier => {
                AuthApiError::UnexpectedError(error.to_string())
            }
            RedeemVerificationError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            RedeemVerificationError::TokenStore(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ResendVerificationError> for AuthApiError {
    fn from(error: ResendVerificationError) -> Self {
        match error {
            ResendVerificationError::EmailDelivery(_) => AuthApiError::EmailDeliveryFailed,
            ResendVerificationError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            ResendVerificationError::Issue(e) => e.into(),
        }
    }
}
