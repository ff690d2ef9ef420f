use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEvent {
    pub path: String,
    #[serde(default)]
    pub httpMethod: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiEvent {
    pub fn new(path: &str) -> ApiEvent {
        ApiEvent {
            path: path.to_owned(),
            httpMethod: None,
            body: None,
        }
    }
}

/// `body` carries an already JSON-encoded string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub statusCode: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json(statusCode: u16, body: &Value) -> ApiResponse {
        ApiResponse {
            statusCode,
            body: body.to_string(),
        }
    }
}
