//! Append-only monitoring log.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogType {
    /// A sweep or other registry round-trip finished.
    ApiCall,
    Error,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiCall => "API_CALL",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "API_CALL" => Ok(Self::ApiCall),
            "ERROR" => Ok(Self::Error),
            other => Err(UnknownVariant::new("log type", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringLog {
    pub id: i64,
    pub log_type: LogType,
    pub message: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLog {
    pub log_type: LogType,
    pub message: String,
    pub details: serde_json::Value,
}
