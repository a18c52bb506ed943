//! Change listing and the review operation.

use std::collections::HashMap;

use chrono::Utc;
use lawmonitor_core::Change;
use lawmonitor_store::ChangeFilter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Monitor, WorkflowError};

/// A change together with the display name of its law.
///
/// `law_name` falls back to the raw law id when the law row is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeView {
    #[serde(flatten)]
    pub change: Change,
    pub law_name: String,
}

/// Result of a review request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "change", rename_all = "snake_case")]
pub enum ReviewOutcome {
    Reviewed(Change),
    /// The change had already been reviewed; the stored record is returned as is.
    AlreadyReviewed(Change),
    /// Blank reviewer name. Nothing was read or written.
    Cancelled,
}

/// Review-state selector used by change listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    #[default]
    All,
    Pending,
    Reviewed,
}

impl ReviewState {
    pub fn filter(self) -> ChangeFilter {
        ChangeFilter {
            reviewed: match self {
                Self::All => None,
                Self::Pending => Some(false),
                Self::Reviewed => Some(true),
            },
            ..ChangeFilter::default()
        }
    }
}

impl Monitor {
    /// Record that `reviewer` has looked at a change.
    pub async fn review_change(
        &self,
        change_id: i64,
        reviewer: &str,
    ) -> Result<ReviewOutcome, WorkflowError> {
        let reviewer = reviewer.trim();
        if reviewer.is_empty() {
            debug!(change_id, "review cancelled: no reviewer");
            return Ok(ReviewOutcome::Cancelled);
        }

        let mut change = self
            .store
            .get_change(change_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("change", change_id))?;

        if !change.mark_reviewed(reviewer, Utc::now()) {
            debug!(change_id, "change already reviewed");
            return Ok(ReviewOutcome::AlreadyReviewed(change));
        }
        self.store.update_change(&change).await?;
        info!(change_id, reviewer, "change reviewed");
        Ok(ReviewOutcome::Reviewed(change))
    }

    /// Changes newest first, each with its law's name.
    pub async fn list_changes(
        &self,
        filter: &ChangeFilter,
    ) -> Result<Vec<ChangeView>, WorkflowError> {
        let changes = self.store.list_changes(filter).await?;
        self.with_law_names(changes).await
    }

    pub(crate) async fn with_law_names(
        &self,
        changes: Vec<Change>,
    ) -> Result<Vec<ChangeView>, WorkflowError> {
        let mut names: HashMap<String, String> = HashMap::new();
        for change in &changes {
            if names.contains_key(&change.law_id) {
                continue;
            }
            let name = match self.store.get_law(&change.law_id).await? {
                Some(law) => law.law_name,
                None => change.law_id.clone(),
            };
            names.insert(change.law_id.clone(), name);
        }

        Ok(changes
            .into_iter()
            .map(|change| ChangeView {
                law_name: names
                    .get(&change.law_id)
                    .cloned()
                    .unwrap_or_else(|| change.law_id.clone()),
                change,
            })
            .collect())
    }
}
