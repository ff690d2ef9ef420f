use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::{
    configuration::{State, POOL_DAY_COUNT},
    error::Error,
    helpers::object_key,
    provider::{archive_dataset, write_dataset},
    types::ApiResponse,
};

pub async fn index(state: &State) -> ApiResponse {
    let today = Local::now().date_naive();
    handle(state, today).await
}

pub async fn handle(state: &State, date: NaiveDate) -> ApiResponse {
    match run(state, date).await {
        Ok(payload) => ApiResponse::json(200, &payload),
        Err(e) if e.is_fetch_failure() => {
            match &e {
                Error::PoolNotFound(pool) => {
                    warn!("Pool {} not found upstream", pool)
                },
                _ => error!("Error fetching data: {}", e),
            }
            ApiResponse::json(
                401,
                &json!({ "error": "Invalid Pool Address entered" }),
            )
        },
        Err(e) => {
            error!("Dataset ingestion failed: {}", e);
            ApiResponse::json(500, &json!({ "error": e.to_string() }))
        },
    }
}

async fn run(state: &State, date: NaiveDate) -> Result<Value, Error> {
    let pool_address = &state.config.pool_address;

    let (payload, mut dataset) = state
        .http
        .get_pool_day_data(pool_address, POOL_DAY_COUNT)
        .await?;

    if !dataset.pool_id.eq_ignore_ascii_case(pool_address) {
        return Err(Error::UpstreamQuery(format!(
            "requested pool {} but received {}",
            pool_address, dataset.pool_id
        )));
    }
    dataset.pool_id = pool_address.to_owned();

    info!(
        "Fetched {} day records for pool {}",
        dataset.records.len(),
        pool_address
    );

    let written = write_dataset(&state.config.scratch_dir, &dataset).await?;
    let key = object_key(pool_address, date);
    archive_dataset(state.storage.as_ref(), written, &key).await?;

    Ok(payload)
}
