use axum::{Json, extract::State, response::IntoResponse};

use vouch_core::UserStore;

use super::error::AuthApiError;

/// Service diagnostics. The account count is operational data, not security
/// relevant.
#[tracing::instrument(name = "Status", skip_all)]
pub async fn status<U>(State(user_store): State<U>) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + Send + Sync + 'static,
{
    let accounts = user_store.count().await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "accounts": accounts,
    })))
}
