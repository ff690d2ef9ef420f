use serde_json::json;
use tracing::info;

use crate::{
    configuration::State,
    types::{ApiEvent, ApiResponse},
};

pub mod add_new_dataset;
pub mod test_route;

pub const TEST_ROUTE: &str = "/api/test";
pub const ADD_NEW_DATASET_ROUTE: &str = "/api/addNewDataset";

/// Routes on the path alone; the method is never inspected.
pub async fn dispatch(state: &State, event: &ApiEvent) -> ApiResponse {
    info!(
        "{} {}",
        event.httpMethod.as_deref().unwrap_or("-"),
        event.path
    );

    match event.path.as_str() {
        TEST_ROUTE => test_route::index(state),
        ADD_NEW_DATASET_ROUTE => add_new_dataset::index(state).await,
        _ => not_found(),
    }
}

pub fn not_found() -> ApiResponse {
    ApiResponse::json(404, &json!({ "Error": "No Appropriate Routes Found" }))
}
