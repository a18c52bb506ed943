//! Dashboard aggregation.

use chrono::{DateTime, Utc};
use lawmonitor_core::{ActionItem, MonitoringLog, Priority};
use lawmonitor_store::{ActionFilter, ChangeFilter, LawFilter};
use serde::Serialize;

use crate::{ChangeView, Monitor, WorkflowError};

/// Rows shown in each of the dashboard's "recent" panels.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_laws: usize,
    pub unreviewed_changes: usize,
    pub active_keywords: usize,
    /// Actions still PENDING or IN_PROGRESS.
    pub open_actions: usize,
    pub recent_changes: Vec<ChangeView>,
    /// Open HIGH-priority actions, newest first.
    pub urgent_actions: Vec<ActionItem>,
    pub generated_at: DateTime<Utc>,
}

impl Monitor {
    /// Run the six dashboard queries concurrently. Any failure fails the whole snapshot.
    pub async fn dashboard(&self) -> Result<DashboardSnapshot, WorkflowError> {
        let store = &self.store;
        let all_laws = LawFilter::default();
        let unreviewed = ChangeFilter::unreviewed();
        let open = ActionFilter::open();
        let latest = ChangeFilter::recent(RECENT_LIMIT);
        let urgent = ActionFilter::open()
            .with_priority(Priority::High)
            .with_limit(RECENT_LIMIT);

        let (total_laws, unreviewed_changes, active_keywords, open_actions, recent, urgent_actions) =
            futures::try_join!(
                store.count_laws(&all_laws),
                store.count_changes(&unreviewed),
                store.count_keywords(true),
                store.count_actions(&open),
                store.list_changes(&latest),
                store.list_actions(&urgent),
            )?;

        Ok(DashboardSnapshot {
            total_laws,
            unreviewed_changes,
            active_keywords,
            open_actions,
            recent_changes: self.with_law_names(recent).await?,
            urgent_actions,
            generated_at: Utc::now(),
        })
    }

    /// Monitoring log entries, newest first.
    pub async fn recent_logs(&self, limit: usize) -> Result<Vec<MonitoringLog>, WorkflowError> {
        Ok(self.store.list_logs(limit).await?)
    }
}
