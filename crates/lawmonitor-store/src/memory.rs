//! In-process store. Backs tests and runs where no database file is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use lawmonitor_core::{
    ActionItem, ActionStatus, Change, Keyword, Law, MonitoringLog, NewAction, NewChange,
    NewKeyword, NewLog,
};
use tokio::sync::RwLock;

use crate::{ActionFilter, ChangeFilter, LawFilter, Store, StoreError};

/// All tables behind one lock. Rows live in insertion order; ids come from
/// per-table counters starting at 1.
#[derive(Debug, Default)]
struct Tables {
    laws: BTreeMap<String, Law>,
    changes: Vec<Change>,
    keywords: Vec<Keyword>,
    actions: Vec<ActionItem>,
    logs: Vec<MonitoringLog>,
    change_seq: i64,
    keyword_seq: i64,
    action_seq: i64,
    log_seq: i64,
}

fn next(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stable sort newest-first, then apply an optional limit.
fn newest_first<T: Clone, K: Ord>(
    rows: impl Iterator<Item = T>,
    key: impl Fn(&T) -> K,
    limit: Option<usize>,
) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

#[async_trait]
impl Store for MemoryStore {
    async fn upsert_law(&self, law: &Law) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        t.laws.insert(law.law_id.clone(), law.clone());
        Ok(())
    }

    async fn get_law(&self, law_id: &str) -> Result<Option<Law>, StoreError> {
        Ok(self.tables.read().await.laws.get(law_id).cloned())
    }

    async fn list_laws(&self, filter: &LawFilter) -> Result<Vec<Law>, StoreError> {
        let t = self.tables.read().await;
        let mut laws: Vec<Law> = t.laws.values().filter(|l| filter.matches(l)).cloned().collect();
        laws.sort_by(|a, b| a.law_name.cmp(&b.law_name).then(a.law_id.cmp(&b.law_id)));
        if let Some(limit) = filter.limit {
            laws.truncate(limit);
        }
        Ok(laws)
    }

    async fn count_laws(&self, filter: &LawFilter) -> Result<usize, StoreError> {
        let t = self.tables.read().await;
        Ok(t.laws.values().filter(|l| filter.matches(l)).count())
    }

    async fn insert_change(&self, change: NewChange) -> Result<Change, StoreError> {
        let mut t = self.tables.write().await;
        let row = Change {
            id: next(&mut t.change_seq),
            law_id: change.law_id,
            change_type: change.change_type,
            change_date: change.change_date,
            change_content: change.change_content,
            detected_at: change.detected_at,
            is_reviewed: false,
            reviewed_by: None,
            reviewed_at: None,
        };
        t.changes.push(row.clone());
        Ok(row)
    }

    async fn get_change(&self, id: i64) -> Result<Option<Change>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.changes.iter().find(|c| c.id == id).cloned())
    }

    async fn update_change(&self, change: &Change) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        let slot = t
            .changes
            .iter_mut()
            .find(|c| c.id == change.id)
            .ok_or_else(|| StoreError::not_found("change", change.id))?;
        *slot = change.clone();
        Ok(())
    }

    async fn list_changes(&self, filter: &ChangeFilter) -> Result<Vec<Change>, StoreError> {
        let t = self.tables.read().await;
        Ok(newest_first(
            t.changes.iter().filter(|c| filter.matches(c)).cloned(),
            |c| c.detected_at,
            filter.limit,
        ))
    }

    async fn count_changes(&self, filter: &ChangeFilter) -> Result<usize, StoreError> {
        let t = self.tables.read().await;
        Ok(t.changes.iter().filter(|c| filter.matches(c)).count())
    }

    async fn change_exists(&self, change: &NewChange) -> Result<bool, StoreError> {
        let t = self.tables.read().await;
        Ok(t.changes.iter().any(|c| {
            c.law_id == change.law_id
                && c.change_date == change.change_date
                && c.change_type == change.change_type
                && c.change_content == change.change_content
        }))
    }

    async fn insert_keyword(&self, keyword: NewKeyword) -> Result<Keyword, StoreError> {
        let mut t = self.tables.write().await;
        let row = Keyword {
            id: next(&mut t.keyword_seq),
            keyword: keyword.keyword,
            category: keyword.category,
            description: keyword.description,
            is_active: true,
            created_at: Utc::now(),
        };
        t.keywords.push(row.clone());
        Ok(row)
    }

    async fn delete_keyword(&self, id: i64) -> Result<bool, StoreError> {
        let mut t = self.tables.write().await;
        let before = t.keywords.len();
        t.keywords.retain(|k| k.id != id);
        Ok(t.keywords.len() != before)
    }

    async fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError> {
        let t = self.tables.read().await;
        Ok(newest_first(t.keywords.iter().cloned(), |k| k.created_at, None))
    }

    async fn count_keywords(&self, active_only: bool) -> Result<usize, StoreError> {
        let t = self.tables.read().await;
        Ok(t.keywords
            .iter()
            .filter(|k| !active_only || k.is_active)
            .count())
    }

    async fn insert_action(&self, action: NewAction) -> Result<ActionItem, StoreError> {
        let mut t = self.tables.write().await;
        let row = ActionItem {
            id: next(&mut t.action_seq),
            law_change_id: action.law_change_id,
            title: action.title,
            description: action.description,
            priority: action.priority,
            status: ActionStatus::Pending,
            assigned_to: action.assigned_to,
            due_date: action.due_date,
            completed_at: None,
            notes: None,
            created_at: Utc::now(),
        };
        t.actions.push(row.clone());
        Ok(row)
    }

    async fn get_action(&self, id: i64) -> Result<Option<ActionItem>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.actions.iter().find(|a| a.id == id).cloned())
    }

    async fn update_action(&self, action: &ActionItem) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        let slot = t
            .actions
            .iter_mut()
            .find(|a| a.id == action.id)
            .ok_or_else(|| StoreError::not_found("action", action.id))?;
        *slot = action.clone();
        Ok(())
    }

    async fn list_actions(&self, filter: &ActionFilter) -> Result<Vec<ActionItem>, StoreError> {
        let t = self.tables.read().await;
        Ok(newest_first(
            t.actions.iter().filter(|a| filter.matches(a)).cloned(),
            |a| a.created_at,
            filter.limit,
        ))
    }

    async fn count_actions(&self, filter: &ActionFilter) -> Result<usize, StoreError> {
        let t = self.tables.read().await;
        Ok(t.actions.iter().filter(|a| filter.matches(a)).count())
    }

    async fn append_log(&self, log: NewLog) -> Result<MonitoringLog, StoreError> {
        let mut t = self.tables.write().await;
        let row = MonitoringLog {
            id: next(&mut t.log_seq),
            log_type: log.log_type,
            message: log.message,
            details: log.details,
            created_at: Utc::now(),
        };
        t.logs.push(row.clone());
        Ok(row)
    }

    async fn list_logs(&self, limit: usize) -> Result<Vec<MonitoringLog>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.logs.iter().rev().take(limit).cloned().collect())
    }
}
