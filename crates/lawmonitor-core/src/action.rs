//! Action items and their linear status lifecycle.
//!
//! ```text
//! PENDING ──▶ IN_PROGRESS ──▶ COMPLETED
//! ```
//!
//! No step may be skipped and COMPLETED is terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(UnknownVariant::new("priority", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Pending,
    InProgress,
    /// Terminal.
    Completed,
}

impl ActionStatus {
    /// Statuses that still need work.
    pub const OPEN: [ActionStatus; 2] = [ActionStatus::Pending, ActionStatus::InProgress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The set of statuses reachable in one step from this one.
    pub fn valid_transitions(&self) -> &'static [ActionStatus] {
        match self {
            Self::Pending => &[Self::InProgress],
            Self::InProgress => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    pub fn can_transition_to(&self, target: ActionStatus) -> bool {
        self.valid_transitions().contains(&target)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(UnknownVariant::new("action status", other)),
        }
    }
}

/// A requested status change that the lifecycle does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move action from {from} to {to}")]
pub struct IllegalTransition {
    pub from: ActionStatus,
    pub to: ActionStatus,
}

/// A task tracking the organisational response to a change.
///
/// `completed_at` is set if and only if `status` is COMPLETED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: i64,
    pub law_change_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: ActionStatus,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActionItem {
    /// Move one step along the lifecycle. On error the item is left unchanged.
    pub fn advance(
        &mut self,
        target: ActionStatus,
        now: DateTime<Utc>,
    ) -> Result<(), IllegalTransition> {
        if !self.status.can_transition_to(target) {
            return Err(IllegalTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        if target == ActionStatus::Completed {
            self.completed_at = Some(now);
        }
        Ok(())
    }
}

/// Input for a new action item. There is no status field: new items always start PENDING.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAction {
    #[serde(default)]
    pub law_change_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}
