use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{
    configuration::Config,
    error::Error,
    model::Pool_Dataset,
    types::{QueryBody, QueryResponse},
};

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(HTTP { config, http })
    }

    /// Posts the day data query for `pool_address` and returns the payload
    /// untouched together with its typed view.
    pub async fn get_pool_day_data(
        &self,
        pool_address: &str,
        last: u8,
    ) -> Result<(Value, Pool_Dataset), Error> {
        let body = QueryBody {
            query: pool_day_data_query(pool_address, last),
        };

        info!("Querying {} for pool {}", &self.config.api_url, pool_address);

        let response = self
            .http
            .post(&self.config.api_url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }

        let payload = response.json::<Value>().await?;
        let dataset = parse_pool_dataset(pool_address, &payload)?;

        Ok((payload, dataset))
    }
}

pub fn pool_day_data_query(pool_address: &str, last: u8) -> String {
    format!(
        r#"query {{
    pool(id: "{}") {{
        id
        poolDayData(last: {}) {{
            date,
            open,
            high,
            low,
            close,
            volumeUSD,
            feesUSD,
            txCount,
        }}
    }}
}}"#,
        pool_address, last
    )
}

pub fn parse_pool_dataset(
    pool_address: &str,
    payload: &Value,
) -> Result<Pool_Dataset, Error> {
    let response = QueryResponse::deserialize(payload)?;

    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        let messages = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<String>>()
            .join("; ");
        return Err(Error::UpstreamQuery(messages));
    }

    match response.data.and_then(|data| data.pool) {
        Some(pool) => Ok(Pool_Dataset::from(pool)),
        None => Err(Error::PoolNotFound(pool_address.to_owned())),
    }
}
