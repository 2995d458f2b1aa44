use axum::{extract::State, Json};

use crate::config::CredentialStatus;
use crate::state::AppState;

/// GET /api/config-status
/// Reports whether the provider key is present and well-formed. Only the
/// masked preview of the key ever leaves the process.
pub async fn config_status_handler(State(state): State<AppState>) -> Json<CredentialStatus> {
    Json(state.config.openai.credential.status())
}
