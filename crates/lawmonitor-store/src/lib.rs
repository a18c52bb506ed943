//! Storage layer: the `Store` contract plus in-memory and DuckDB backends.

mod error;
mod filter;
mod memory;

pub use error::StoreError;
pub use filter::{ActionFilter, ChangeFilter, LawFilter};
pub use memory::MemoryStore;

#[cfg(feature = "duckdb")]
mod duck;
#[cfg(feature = "duckdb")]
pub use duck::DuckStore;

use async_trait::async_trait;
use lawmonitor_core::{
    ActionItem, Change, Keyword, Law, MonitoringLog, NewAction, NewChange, NewKeyword, NewLog,
};

/// Persistence contract over the five collections.
///
/// Each method is atomic for the row(s) it touches; there are no cross-row
/// transactions. Listing methods return rows newest first except laws, which
/// come back ordered by name.
#[async_trait]
pub trait Store: Send + Sync {
    // ── laws ──

    /// Insert or fully overwrite the law keyed by `law_id`.
    async fn upsert_law(&self, law: &Law) -> Result<(), StoreError>;
    async fn get_law(&self, law_id: &str) -> Result<Option<Law>, StoreError>;
    async fn list_laws(&self, filter: &LawFilter) -> Result<Vec<Law>, StoreError>;
    async fn count_laws(&self, filter: &LawFilter) -> Result<usize, StoreError>;

    // ── law_changes ──

    async fn insert_change(&self, change: NewChange) -> Result<Change, StoreError>;
    async fn get_change(&self, id: i64) -> Result<Option<Change>, StoreError>;
    /// Overwrite an existing change. Fails with [`StoreError::NotFound`] if the id is unknown.
    async fn update_change(&self, change: &Change) -> Result<(), StoreError>;
    /// Ordered by `detected_at` descending; equal timestamps keep insertion order.
    async fn list_changes(&self, filter: &ChangeFilter) -> Result<Vec<Change>, StoreError>;
    async fn count_changes(&self, filter: &ChangeFilter) -> Result<usize, StoreError>;
    /// Whether a change with the same law, date, type and content is
    /// already recorded. `detected_at` is ignored.
    async fn change_exists(&self, change: &NewChange) -> Result<bool, StoreError>;

    // ── monitoring_keywords ──

    /// Insert an active keyword stamped with the current time.
    async fn insert_keyword(&self, keyword: NewKeyword) -> Result<Keyword, StoreError>;
    /// Hard delete. Returns `false` if nothing matched.
    async fn delete_keyword(&self, id: i64) -> Result<bool, StoreError>;
    async fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError>;
    async fn count_keywords(&self, active_only: bool) -> Result<usize, StoreError>;

    // ── action_items ──

    /// Insert a PENDING action stamped with the current time.
    async fn insert_action(&self, action: NewAction) -> Result<ActionItem, StoreError>;
    async fn get_action(&self, id: i64) -> Result<Option<ActionItem>, StoreError>;
    /// Overwrite an existing action. Fails with [`StoreError::NotFound`] if the id is unknown.
    async fn update_action(&self, action: &ActionItem) -> Result<(), StoreError>;
    /// Ordered by `created_at` descending; equal timestamps keep insertion order.
    async fn list_actions(&self, filter: &ActionFilter) -> Result<Vec<ActionItem>, StoreError>;
    async fn count_actions(&self, filter: &ActionFilter) -> Result<usize, StoreError>;

    // ── monitoring_logs ──

    async fn append_log(&self, log: NewLog) -> Result<MonitoringLog, StoreError>;
    async fn list_logs(&self, limit: usize) -> Result<Vec<MonitoringLog>, StoreError>;
}
