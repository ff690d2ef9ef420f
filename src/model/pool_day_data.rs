use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::PoolData;

/// One trading day of a pool as reported by the subgraph.
///
/// Every column except `date` keeps the upstream text so the archived file
/// matches the source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pool_Day_Data {
    pub date: i64,
    #[serde(deserialize_with = "upstream_text")]
    pub open: String,
    #[serde(deserialize_with = "upstream_text")]
    pub high: String,
    #[serde(deserialize_with = "upstream_text")]
    pub low: String,
    #[serde(deserialize_with = "upstream_text")]
    pub close: String,
    #[serde(deserialize_with = "upstream_text")]
    pub volumeUSD: String,
    #[serde(deserialize_with = "upstream_text")]
    pub feesUSD: String,
    #[serde(deserialize_with = "upstream_text")]
    pub txCount: String,
}

impl Pool_Day_Data {
    pub const HEADERS: [&'static str; 8] = [
        "date",
        "open",
        "high",
        "low",
        "close",
        "volumeUSD",
        "feesUSD",
        "txCount",
    ];
}

#[derive(Debug, Clone)]
pub struct Pool_Dataset {
    pub pool_id: String,
    pub records: Vec<Pool_Day_Data>,
}

impl From<PoolData> for Pool_Dataset {
    fn from(pool: PoolData) -> Self {
        Pool_Dataset {
            pool_id: pool.id,
            records: pool.poolDayData,
        }
    }
}

fn upstream_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_subgraph_strings() {
        let record: Pool_Day_Data = serde_json::from_value(json!({
            "date": 1709251200,
            "open": "3340.512",
            "high": "3450.0",
            "low": "3301.7",
            "close": "3421.09",
            "volumeUSD": "412345678.12",
            "feesUSD": "206172.83",
            "txCount": "18443"
        }))
        .unwrap();

        assert_eq!(record.date, 1709251200);
        assert_eq!(record.high, "3450.0");
        assert_eq!(record.txCount, "18443");
    }

    #[test]
    fn test_accepts_numbers() {
        let record: Pool_Day_Data = serde_json::from_value(json!({
            "date": 1,
            "open": 1,
            "high": 2.5,
            "low": "0.5",
            "close": "1.5",
            "volumeUSD": "100",
            "feesUSD": "1",
            "txCount": 5
        }))
        .unwrap();

        assert_eq!(record.open, "1");
        assert_eq!(record.high, "2.5");
        assert_eq!(record.txCount, "5");
    }

    #[test]
    fn test_keeps_upstream_text() {
        let record: Pool_Day_Data = serde_json::from_value(json!({
            "date": 1,
            "open": "1.500",
            "high": "n/a",
            "low": null,
            "close": "1.5",
            "volumeUSD": "100",
            "feesUSD": "1",
            "txCount": "05"
        }))
        .unwrap();

        assert_eq!(record.open, "1.500");
        assert_eq!(record.high, "n/a");
        assert_eq!(record.low, "");
        assert_eq!(record.txCount, "05");
    }
}
