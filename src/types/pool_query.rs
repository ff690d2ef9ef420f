use serde::{Deserialize, Serialize};

use crate::model::Pool_Day_Data;

#[derive(Debug, Serialize)]
pub struct QueryBody {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub data: Option<QueryData>,
    #[serde(default)]
    pub errors: Option<Vec<QueryError>>,
}

#[derive(Debug, Deserialize)]
pub struct QueryData {
    pub pool: Option<PoolData>,
}

#[derive(Debug, Deserialize)]
pub struct PoolData {
    pub id: String,
    #[serde(default)]
    pub poolDayData: Vec<Pool_Day_Data>,
}

#[derive(Debug, Deserialize)]
pub struct QueryError {
    pub message: String,
}
