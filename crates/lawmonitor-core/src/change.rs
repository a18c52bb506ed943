//! Detected modifications of tracked laws.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Classification of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// Law entered monitoring for the first time.
    New,
    /// Content or official name differs from the stored snapshot.
    Amended,
    /// Law was repealed or vanished from the registry.
    Repealed,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Amended => "AMENDED",
            Self::Repealed => "REPEALED",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "AMENDED" => Ok(Self::Amended),
            "REPEALED" => Ok(Self::Repealed),
            other => Err(UnknownVariant::new("change type", other)),
        }
    }
}

/// A stored change record.
///
/// `is_reviewed` only ever moves from `false` to `true`, and `reviewed_by` /
/// `reviewed_at` are set exactly when it is `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub id: i64,
    pub law_id: String,
    pub change_type: ChangeType,
    pub change_date: NaiveDate,
    pub change_content: String,
    pub detected_at: DateTime<Utc>,
    pub is_reviewed: bool,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Change {
    /// Attribute the change to a reviewer. Returns `false` (and leaves the
    /// record untouched) if it was already reviewed.
    pub fn mark_reviewed(&mut self, reviewer: &str, now: DateTime<Utc>) -> bool {
        if self.is_reviewed {
            return false;
        }
        self.is_reviewed = true;
        self.reviewed_by = Some(reviewer.to_string());
        self.reviewed_at = Some(now);
        true
    }
}

/// Fields supplied when the detection sweep records a change.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChange {
    pub law_id: String,
    pub change_type: ChangeType,
    pub change_date: NaiveDate,
    pub change_content: String,
    pub detected_at: DateTime<Utc>,
}
