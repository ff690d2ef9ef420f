use serde_json::json;

use crate::{configuration::State, types::ApiResponse};

/// Liveness check that echoes the configured upstream endpoint.
pub fn index(state: &State) -> ApiResponse {
    ApiResponse::json(200, &json!({ "message": state.config.api_url }))
}
