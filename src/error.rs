use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use aws_sdk_s3::primitives::ByteStreamError as BYTE_STREAM_ERROR;
use csv::Error as CSV_ERROR;
use reqwest::Error as REQWEST_ERROR;
use serde_json::Error as JSON_ERROR;
use std::{io::Error as IO_ERROR, num::ParseIntError};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;
use url::ParseError as URL_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("CSV error: {0}")]
    CsvError(#[from] CSV_ERROR),

    #[error("{0}")]
    ByteStreamError(#[from] BYTE_STREAM_ERROR),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Upstream responded with status {0}")]
    UpstreamStatus(u16),

    #[error("Upstream query error: {0}")]
    UpstreamQuery(String),

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Server end with error: {0}")]
    ServerError(String),
}

impl Error {
    /// Errors raised while fetching or reading the upstream payload.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::ReqwestError(_)
                | Error::JsonError(_)
                | Error::UpstreamStatus(_)
                | Error::UpstreamQuery(_)
                | Error::PoolNotFound(_)
        )
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            // 502 Bad Gateway - upstream or storage service error
            Error::ReqwestError(_)
            | Error::PoolNotFound(_)
            | Error::UpstreamStatus(_)
            | Error::UpstreamQuery(_)
            | Error::StorageError(_)
            | Error::ByteStreamError(_) => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error - everything else
            Error::Io(_)
            | Error::URL(_)
            | Error::INT(_)
            | Error::TokioJoinError(_)
            | Error::JsonError(_)
            | Error::CsvError(_)
            | Error::SetGlobalDefaultError(_)
            | Error::ConfigurationError(_)
            | Error::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": self.to_string(),
            "status": status.as_u16(),
        });
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failures_are_classified() {
        assert!(Error::UpstreamStatus(500).is_fetch_failure());
        assert!(Error::PoolNotFound(String::from("0x1")).is_fetch_failure());
        assert!(Error::UpstreamQuery(String::from("bad")).is_fetch_failure());
        assert!(!Error::StorageError(String::from("denied")).is_fetch_failure());
        assert!(!Error::Io(IO_ERROR::other("disk")).is_fetch_failure());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::PoolNotFound(String::from("0x1")).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::StorageError(String::from("denied")).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::UpstreamStatus(503).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::ConfigurationError(String::from("missing")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
