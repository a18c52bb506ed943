//! Tracked laws: promotion into monitoring, lookup, and search.

use chrono::Utc;
use lawmonitor_core::{Change, ChangeType, Law, LawDetail, LawSummary, NewChange};
use lawmonitor_store::LawFilter;
use serde::Serialize;
use tracing::info;

use crate::{Monitor, WorkflowError};

/// Maximum rows returned by a search over tracked laws.
pub const TRACKED_SEARCH_LIMIT: usize = 20;

/// Result of adding a law to monitoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Promotion {
    pub law: Law,
    /// The NEW change recorded when the law had never been tracked before.
    pub new_change: Option<Change>,
}

impl Monitor {
    /// Start (or resume) monitoring a law with the given registry snapshot.
    ///
    /// The stored row is overwritten and marked active. A law seen for the
    /// first time also gets a NEW change dated by its promulgation date.
    pub async fn add_to_monitoring(&self, detail: LawDetail) -> Result<Promotion, WorkflowError> {
        if detail.law_id.trim().is_empty() {
            return Err(WorkflowError::validation("law id is required"));
        }
        if detail.law_name.trim().is_empty() {
            return Err(WorkflowError::validation("law name is required"));
        }

        let now = Utc::now();
        let known = self.store.get_law(&detail.law_id).await?.is_some();
        let law = Law::from_detail(&detail, now);
        self.store.upsert_law(&law).await?;

        let new_change = if known {
            None
        } else {
            let change = self
                .store
                .insert_change(NewChange {
                    law_id: law.law_id.clone(),
                    change_type: ChangeType::New,
                    change_date: detail.promulgated_date.unwrap_or(now.date_naive()),
                    change_content: format!("{} added to monitoring", law.law_name),
                    detected_at: now,
                })
                .await?;
            Some(change)
        };

        info!(law_id = %law.law_id, law_name = %law.law_name, first_time = !known, "law monitored");
        Ok(Promotion { law, new_change })
    }

    /// Fetch a law from the registry and add it to monitoring.
    pub async fn track_law(&self, law_id: &str) -> Result<Promotion, WorkflowError> {
        let detail = self
            .lookup(law_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("law", law_id))?;
        self.add_to_monitoring(detail).await
    }

    /// Registry search by law name.
    pub async fn search_registry(&self, query: &str) -> Result<Vec<LawSummary>, WorkflowError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WorkflowError::validation("search query is required"));
        }
        let timeout = self.config.gateway_timeout;
        let laws = tokio::time::timeout(timeout, self.registry.search_laws(query))
            .await
            .map_err(|_| lawmonitor_registry::RegistryError::Timeout(timeout))??;
        Ok(laws)
    }

    /// Partial-match search over tracked laws (name or content).
    pub async fn search_tracked(&self, text: &str) -> Result<Vec<Law>, WorkflowError> {
        let filter = LawFilter {
            text: Some(text.trim().to_string()).filter(|t| !t.is_empty()),
            limit: Some(TRACKED_SEARCH_LIMIT),
            ..LawFilter::default()
        };
        Ok(self.store.list_laws(&filter).await?)
    }

    pub async fn get_law(&self, law_id: &str) -> Result<Law, WorkflowError> {
        self.store
            .get_law(law_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("law", law_id))
    }

    pub async fn list_laws(&self, filter: &LawFilter) -> Result<Vec<Law>, WorkflowError> {
        Ok(self.store.list_laws(filter).await?)
    }

    async fn lookup(&self, law_id: &str) -> Result<Option<LawDetail>, WorkflowError> {
        let timeout = self.config.gateway_timeout;
        let detail = tokio::time::timeout(timeout, self.registry.law_detail(law_id))
            .await
            .map_err(|_| lawmonitor_registry::RegistryError::Timeout(timeout))??;
        Ok(detail)
    }
}
