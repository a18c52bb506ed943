//! DuckDB storage layer for the monitoring tables.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use duckdb::{Connection, Row, params, params_from_iter};
use lawmonitor_core::{
    ActionItem, ActionStatus, Change, Keyword, Law, MonitoringLog, NewAction, NewChange,
    NewKeyword, NewLog,
};
use tracing::info;

use crate::{ActionFilter, ChangeFilter, LawFilter, Store, StoreError};

const SCHEMA: &str = "
CREATE SEQUENCE IF NOT EXISTS law_changes_id_seq START 1;
CREATE SEQUENCE IF NOT EXISTS monitoring_keywords_id_seq START 1;
CREATE SEQUENCE IF NOT EXISTS action_items_id_seq START 1;
CREATE SEQUENCE IF NOT EXISTS monitoring_logs_id_seq START 1;

CREATE TABLE IF NOT EXISTS laws (
    law_id        VARCHAR PRIMARY KEY,
    law_name      VARCHAR NOT NULL,
    law_type      VARCHAR,
    ministry      VARCHAR,
    enforced_date  VARCHAR,
    content       VARCHAR NOT NULL,
    is_active     BOOLEAN NOT NULL,
    last_updated  VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS law_changes (
    id              BIGINT PRIMARY KEY,
    law_id          VARCHAR NOT NULL,
    change_type     VARCHAR NOT NULL,
    change_date     VARCHAR NOT NULL,
    change_content  VARCHAR NOT NULL,
    detected_at     VARCHAR NOT NULL,
    is_reviewed     BOOLEAN NOT NULL,
    reviewed_by     VARCHAR,
    reviewed_at     VARCHAR
);

CREATE TABLE IF NOT EXISTS monitoring_keywords (
    id           BIGINT PRIMARY KEY,
    keyword      VARCHAR NOT NULL,
    category     VARCHAR,
    description  VARCHAR,
    is_active    BOOLEAN NOT NULL,
    created_at   VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS action_items (
    id             BIGINT PRIMARY KEY,
    law_change_id  BIGINT,
    title          VARCHAR NOT NULL,
    description    VARCHAR,
    priority       VARCHAR NOT NULL,
    status         VARCHAR NOT NULL,
    assigned_to    VARCHAR,
    due_date       VARCHAR,
    completed_at   VARCHAR,
    notes          VARCHAR,
    created_at     VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS monitoring_logs (
    id          BIGINT PRIMARY KEY,
    log_type    VARCHAR NOT NULL,
    message     VARCHAR NOT NULL,
    details     VARCHAR NOT NULL,
    created_at  VARCHAR NOT NULL
);
";

const LAW_COLUMNS: &str =
    "law_id, law_name, law_type, ministry, enforced_date, content, is_active, last_updated";
const CHANGE_COLUMNS: &str = "id, law_id, change_type, change_date, change_content, \
     detected_at, is_reviewed, reviewed_by, reviewed_at";
const KEYWORD_COLUMNS: &str = "id, keyword, category, description, is_active, created_at";
const ACTION_COLUMNS: &str = "id, law_change_id, title, description, priority, status, \
     assigned_to, due_date, completed_at, notes, created_at";

/// DuckDB store for the monitoring tables.
///
/// Timestamps are stored as fixed-width RFC 3339 strings (nanosecond
/// precision, `Z` suffix) so `ORDER BY` on the text column is chronological.
/// Dates are stored as `YYYY-MM-DD`.
///
/// Supports both in-memory (ephemeral) and persistent (file-backed) modes.
/// Use [`open`](Self::open) for in-memory and [`open_persistent`](Self::open_persistent)
/// for file-backed storage that survives across process restarts.
pub struct DuckStore {
    conn: Mutex<Connection>,
}

impl DuckStore {
    /// Open an in-memory DuckDB database with the schema created.
    pub fn open() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_schema(conn)
    }

    /// Open or create a persistent DuckDB database at the given path.
    ///
    /// Schema creation is idempotent, so reopening an existing file keeps its rows.
    pub fn open_persistent(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self::with_schema(conn)?;
        info!(path = %path.display(), laws = store.table_count("laws")?, "opened duckdb store");
        Ok(store)
    }

    fn with_schema(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Other("duckdb connection lock poisoned".into()))
    }

    fn table_count(&self, table: &str) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let sql = format!("SELECT count(*) FROM {table}");
        let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn next_id(conn: &Connection, sequence: &str) -> Result<i64, StoreError> {
        let sql = format!("SELECT nextval('{sequence}')");
        Ok(conn.query_row(&sql, [], |row| row.get(0))?)
    }

    fn count_where(&self, table: &str, clause: &WhereClause) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let sql = format!("SELECT count(*) FROM {table}{}", clause.sql());
        let n: i64 = conn.query_row(&sql, params_from_iter(clause.params.iter()), |row| {
            row.get(0)
        })?;
        Ok(n as usize)
    }
}

// ── Row encoding ──

fn ts(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn opt_ts(t: Option<DateTime<Utc>>) -> Option<String> {
    t.map(ts)
}

fn date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn opt_date(d: Option<NaiveDate>) -> Option<String> {
    d.map(date)
}

fn parse_ts(table: &'static str, s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt {
            table,
            reason: format!("bad timestamp {s:?}: {e}"),
        })
}

fn parse_opt_ts(table: &'static str, s: Option<String>) -> Result<Option<DateTime<Utc>>, StoreError> {
    s.map(|s| parse_ts(table, &s)).transpose()
}

fn parse_date(table: &'static str, s: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| StoreError::Corrupt {
        table,
        reason: format!("bad date {s:?}: {e}"),
    })
}

fn parse_opt_date(table: &'static str, s: Option<String>) -> Result<Option<NaiveDate>, StoreError> {
    s.map(|s| parse_date(table, &s)).transpose()
}

fn parse_enum<T: std::str::FromStr>(table: &'static str, s: &str) -> Result<T, StoreError>
where
    T::Err: std::fmt::Display,
{
    s.parse().map_err(|e: T::Err| StoreError::Corrupt {
        table,
        reason: e.to_string(),
    })
}

// Raw rows as DuckDB hands them back; decoded outside the row callback so
// decode failures surface as `StoreError::Corrupt` rather than duckdb errors.

struct RawLaw {
    law_id: String,
    law_name: String,
    law_type: Option<String>,
    ministry: Option<String>,
    enforced_date: Option<String>,
    content: String,
    is_active: bool,
    last_updated: String,
}

impl RawLaw {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            law_id: row.get(0)?,
            law_name: row.get(1)?,
            law_type: row.get(2)?,
            ministry: row.get(3)?,
            enforced_date: row.get(4)?,
            content: row.get(5)?,
            is_active: row.get(6)?,
            last_updated: row.get(7)?,
        })
    }

    fn decode(self) -> Result<Law, StoreError> {
        Ok(Law {
            law_id: self.law_id,
            law_name: self.law_name,
            law_type: self.law_type,
            ministry: self.ministry,
            enforced_date: parse_opt_date("laws", self.enforced_date)?,
            content: self.content,
            is_active: self.is_active,
            last_updated: parse_ts("laws", &self.last_updated)?,
        })
    }
}

struct RawChange {
    id: i64,
    law_id: String,
    change_type: String,
    change_date: String,
    change_content: String,
    detected_at: String,
    is_reviewed: bool,
    reviewed_by: Option<String>,
    reviewed_at: Option<String>,
}

impl RawChange {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            law_id: row.get(1)?,
            change_type: row.get(2)?,
            change_date: row.get(3)?,
            change_content: row.get(4)?,
            detected_at: row.get(5)?,
            is_reviewed: row.get(6)?,
            reviewed_by: row.get(7)?,
            reviewed_at: row.get(8)?,
        })
    }

    fn decode(self) -> Result<Change, StoreError> {
        const T: &str = "law_changes";
        Ok(Change {
            id: self.id,
            law_id: self.law_id,
            change_type: parse_enum(T, &self.change_type)?,
            change_date: parse_date(T, &self.change_date)?,
            change_content: self.change_content,
            detected_at: parse_ts(T, &self.detected_at)?,
            is_reviewed: self.is_reviewed,
            reviewed_by: self.reviewed_by,
            reviewed_at: parse_opt_ts(T, self.reviewed_at)?,
        })
    }
}

struct RawKeyword {
    id: i64,
    keyword: String,
    category: Option<String>,
    description: Option<String>,
    is_active: bool,
    created_at: String,
}

impl RawKeyword {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            keyword: row.get(1)?,
            category: row.get(2)?,
            description: row.get(3)?,
            is_active: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn decode(self) -> Result<Keyword, StoreError> {
        Ok(Keyword {
            id: self.id,
            keyword: self.keyword,
            category: self.category,
            description: self.description,
            is_active: self.is_active,
            created_at: parse_ts("monitoring_keywords", &self.created_at)?,
        })
    }
}

struct RawAction {
    id: i64,
    law_change_id: Option<i64>,
    title: String,
    description: Option<String>,
    priority: String,
    status: String,
    assigned_to: Option<String>,
    due_date: Option<String>,
    completed_at: Option<String>,
    notes: Option<String>,
    created_at: String,
}

impl RawAction {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            law_change_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            priority: row.get(4)?,
            status: row.get(5)?,
            assigned_to: row.get(6)?,
            due_date: row.get(7)?,
            completed_at: row.get(8)?,
            notes: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn decode(self) -> Result<ActionItem, StoreError> {
        const T: &str = "action_items";
        Ok(ActionItem {
            id: self.id,
            law_change_id: self.law_change_id,
            title: self.title,
            description: self.description,
            priority: parse_enum(T, &self.priority)?,
            status: parse_enum(T, &self.status)?,
            assigned_to: self.assigned_to,
            due_date: parse_opt_date(T, self.due_date)?,
            completed_at: parse_opt_ts(T, self.completed_at)?,
            notes: self.notes,
            created_at: parse_ts(T, &self.created_at)?,
        })
    }
}

// ── Filters → SQL ──

/// A WHERE clause with positional string parameters. Enum and boolean values
/// come from typed filters and are inlined; free text always goes through a
/// parameter.
#[derive(Default)]
struct WhereClause {
    conditions: Vec<String>,
    params: Vec<String>,
}

impl WhereClause {
    fn sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    fn for_laws(filter: &LawFilter) -> Self {
        let mut w = Self::default();
        if let Some(active) = filter.active {
            w.conditions.push(format!("is_active = {active}"));
        }
        if let Some(text) = &filter.text {
            w.conditions.push(
                "(law_name ILIKE ? ESCAPE '\\' OR content ILIKE ? ESCAPE '\\')".to_string(),
            );
            let pattern = format!("%{}%", escape_like(text));
            w.params.push(pattern.clone());
            w.params.push(pattern);
        }
        w
    }

    fn for_changes(filter: &ChangeFilter) -> Self {
        let mut w = Self::default();
        if let Some(reviewed) = filter.reviewed {
            w.conditions.push(format!("is_reviewed = {reviewed}"));
        }
        if let Some(law_id) = &filter.law_id {
            w.conditions.push("law_id = ?".to_string());
            w.params.push(law_id.clone());
        }
        w
    }

    fn for_actions(filter: &ActionFilter) -> Self {
        let mut w = Self::default();
        if let Some(statuses) = &filter.statuses {
            if statuses.is_empty() {
                w.conditions.push("false".to_string());
            } else {
                let set: Vec<String> = statuses.iter().map(|s| format!("'{}'", s.as_str())).collect();
                w.conditions.push(format!("status IN ({})", set.join(", ")));
            }
        }
        if let Some(priority) = filter.priority {
            w.conditions.push(format!("priority = '{}'", priority.as_str()));
        }
        w
    }
}

/// Escape `%`, `_` and the escape character so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn limit_sql(limit: Option<usize>) -> String {
    limit.map(|n| format!(" LIMIT {n}")).unwrap_or_default()
}

#[async_trait]
impl Store for DuckStore {
    async fn upsert_law(&self, law: &Law) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            &format!("INSERT OR REPLACE INTO laws ({LAW_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"),
            params![
                law.law_id,
                law.law_name,
                law.law_type,
                law.ministry,
                opt_date(law.enforced_date),
                law.content,
                law.is_active,
                ts(law.last_updated),
            ],
        )?;
        Ok(())
    }

    async fn get_law(&self, law_id: &str) -> Result<Option<Law>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {LAW_COLUMNS} FROM laws WHERE law_id = ?"))?;
        let raw = stmt
            .query_map([law_id], RawLaw::from_row)?
            .next()
            .transpose()?;
        raw.map(RawLaw::decode).transpose()
    }

    async fn list_laws(&self, filter: &LawFilter) -> Result<Vec<Law>, StoreError> {
        let clause = WhereClause::for_laws(filter);
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {LAW_COLUMNS} FROM laws{} ORDER BY law_name, law_id{}",
            clause.sql(),
            limit_sql(filter.limit)
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(clause.params.iter()), RawLaw::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawLaw::decode).collect()
    }

    async fn count_laws(&self, filter: &LawFilter) -> Result<usize, StoreError> {
        self.count_where("laws", &WhereClause::for_laws(filter))
    }

    async fn insert_change(&self, change: NewChange) -> Result<Change, StoreError> {
        let conn = self.conn()?;
        let id = Self::next_id(&conn, "law_changes_id_seq")?;
        conn.execute(
            &format!(
                "INSERT INTO law_changes ({CHANGE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, false, NULL, NULL)"
            ),
            params![
                id,
                change.law_id,
                change.change_type.as_str(),
                date(change.change_date),
                change.change_content,
                ts(change.detected_at),
            ],
        )?;
        Ok(Change {
            id,
            law_id: change.law_id,
            change_type: change.change_type,
            change_date: change.change_date,
            change_content: change.change_content,
            detected_at: change.detected_at,
            is_reviewed: false,
            reviewed_by: None,
            reviewed_at: None,
        })
    }

    async fn get_change(&self, id: i64) -> Result<Option<Change>, StoreError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {CHANGE_COLUMNS} FROM law_changes WHERE id = ?"))?;
        let raw = stmt
            .query_map([id], RawChange::from_row)?
            .next()
            .transpose()?;
        raw.map(RawChange::decode).transpose()
    }

    async fn update_change(&self, change: &Change) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE law_changes SET law_id = ?, change_type = ?, change_date = ?, \
             change_content = ?, detected_at = ?, is_reviewed = ?, reviewed_by = ?, \
             reviewed_at = ? WHERE id = ?",
            params![
                change.law_id,
                change.change_type.as_str(),
                date(change.change_date),
                change.change_content,
                ts(change.detected_at),
                change.is_reviewed,
                change.reviewed_by,
                opt_ts(change.reviewed_at),
                change.id,
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::not_found("change", change.id));
        }
        Ok(())
    }

    async fn list_changes(&self, filter: &ChangeFilter) -> Result<Vec<Change>, StoreError> {
        let clause = WhereClause::for_changes(filter);
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {CHANGE_COLUMNS} FROM law_changes{} ORDER BY detected_at DESC, id ASC{}",
            clause.sql(),
            limit_sql(filter.limit)
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(clause.params.iter()), RawChange::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawChange::decode).collect()
    }

    async fn count_changes(&self, filter: &ChangeFilter) -> Result<usize, StoreError> {
        self.count_where("law_changes", &WhereClause::for_changes(filter))
    }

    async fn change_exists(&self, change: &NewChange) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row(
            "SELECT count(*) FROM law_changes WHERE law_id = ? AND change_date = ? \
             AND change_type = ? AND change_content = ?",
            params![
                change.law_id,
                date(change.change_date),
                change.change_type.as_str(),
                change.change_content,
            ],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    async fn insert_keyword(&self, keyword: NewKeyword) -> Result<Keyword, StoreError> {
        let conn = self.conn()?;
        let id = Self::next_id(&conn, "monitoring_keywords_id_seq")?;
        let created_at = Utc::now();
        conn.execute(
            &format!("INSERT INTO monitoring_keywords ({KEYWORD_COLUMNS}) VALUES (?, ?, ?, ?, true, ?)"),
            params![
                id,
                keyword.keyword,
                keyword.category,
                keyword.description,
                ts(created_at),
            ],
        )?;
        Ok(Keyword {
            id,
            keyword: keyword.keyword,
            category: keyword.category,
            description: keyword.description,
            is_active: true,
            created_at,
        })
    }

    async fn delete_keyword(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM monitoring_keywords WHERE id = ?", [id])?;
        Ok(deleted > 0)
    }

    async fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {KEYWORD_COLUMNS} FROM monitoring_keywords ORDER BY created_at DESC, id ASC"
        ))?;
        let rows = stmt
            .query_map([], RawKeyword::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawKeyword::decode).collect()
    }

    async fn count_keywords(&self, active_only: bool) -> Result<usize, StoreError> {
        let mut clause = WhereClause::default();
        if active_only {
            clause.conditions.push("is_active = true".to_string());
        }
        self.count_where("monitoring_keywords", &clause)
    }

    async fn insert_action(&self, action: NewAction) -> Result<ActionItem, StoreError> {
        let conn = self.conn()?;
        let id = Self::next_id(&conn, "action_items_id_seq")?;
        let created_at = Utc::now();
        conn.execute(
            &format!(
                "INSERT INTO action_items ({ACTION_COLUMNS}) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, NULL, ?)"
            ),
            params![
                id,
                action.law_change_id,
                action.title,
                action.description,
                action.priority.as_str(),
                ActionStatus::Pending.as_str(),
                action.assigned_to,
                opt_date(action.due_date),
                ts(created_at),
            ],
        )?;
        Ok(ActionItem {
            id,
            law_change_id: action.law_change_id,
            title: action.title,
            description: action.description,
            priority: action.priority,
            status: ActionStatus::Pending,
            assigned_to: action.assigned_to,
            due_date: action.due_date,
            completed_at: None,
            notes: None,
            created_at,
        })
    }

    async fn get_action(&self, id: i64) -> Result<Option<ActionItem>, StoreError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {ACTION_COLUMNS} FROM action_items WHERE id = ?"))?;
        let raw = stmt
            .query_map([id], RawAction::from_row)?
            .next()
            .transpose()?;
        raw.map(RawAction::decode).transpose()
    }

    async fn update_action(&self, action: &ActionItem) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE action_items SET law_change_id = ?, title = ?, description = ?, \
             priority = ?, status = ?, assigned_to = ?, due_date = ?, completed_at = ?, \
             notes = ?, created_at = ? WHERE id = ?",
            params![
                action.law_change_id,
                action.title,
                action.description,
                action.priority.as_str(),
                action.status.as_str(),
                action.assigned_to,
                opt_date(action.due_date),
                opt_ts(action.completed_at),
                action.notes,
                ts(action.created_at),
                action.id,
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::not_found("action", action.id));
        }
        Ok(())
    }

    async fn list_actions(&self, filter: &ActionFilter) -> Result<Vec<ActionItem>, StoreError> {
        let clause = WhereClause::for_actions(filter);
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {ACTION_COLUMNS} FROM action_items{} ORDER BY created_at DESC, id ASC{}",
            clause.sql(),
            limit_sql(filter.limit)
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(clause.params.iter()), RawAction::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawAction::decode).collect()
    }

    async fn count_actions(&self, filter: &ActionFilter) -> Result<usize, StoreError> {
        self.count_where("action_items", &WhereClause::for_actions(filter))
    }

    async fn append_log(&self, log: NewLog) -> Result<MonitoringLog, StoreError> {
        let conn = self.conn()?;
        let id = Self::next_id(&conn, "monitoring_logs_id_seq")?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO monitoring_logs (id, log_type, message, details, created_at) \
             VALUES (?, ?, ?, ?, ?)",
            params![
                id,
                log.log_type.as_str(),
                log.message,
                serde_json::to_string(&log.details)?,
                ts(created_at),
            ],
        )?;
        Ok(MonitoringLog {
            id,
            log_type: log.log_type,
            message: log.message,
            details: log.details,
            created_at,
        })
    }

    async fn list_logs(&self, limit: usize) -> Result<Vec<MonitoringLog>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, log_type, message, details, created_at FROM monitoring_logs \
             ORDER BY id DESC LIMIT {limit}"
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(id, log_type, message, details, created_at)| {
                Ok(MonitoringLog {
                    id,
                    log_type: parse_enum("monitoring_logs", &log_type)?,
                    message,
                    details: serde_json::from_str(&details)?,
                    created_at: parse_ts("monitoring_logs", &created_at)?,
                })
            })
            .collect()
    }
}
