// Shared fixtures for the engine integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use lawmonitor_core::{
    ActionItem, Change, Keyword, Law, LawDetail, LawSummary, MonitoringLog, NewAction, NewChange,
    NewKeyword, NewLog,
};
use lawmonitor_engine::{Monitor, SweepConfig};
use lawmonitor_registry::{LawRegistry, RegistryError};
use lawmonitor_store::{ActionFilter, ChangeFilter, LawFilter, MemoryStore, Store, StoreError};

// ── Registry ──

/// What the scripted registry answers for one law.
#[derive(Clone)]
pub enum Script {
    Found(LawDetail),
    Missing,
    Fail(u16),
    /// Never answers within any reasonable timeout.
    Hang,
}

#[derive(Default)]
pub struct ScriptedRegistry {
    scripts: Mutex<HashMap<String, Script>>,
    calls: AtomicUsize,
}

impl ScriptedRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, law_id: &str, script: Script) {
        self.scripts
            .lock()
            .unwrap()
            .insert(law_id.to_string(), script);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LawRegistry for ScriptedRegistry {
    async fn search_laws(&self, query: &str) -> Result<Vec<LawSummary>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripts = self.scripts.lock().unwrap().clone();
        let mut hits: Vec<LawSummary> = scripts
            .into_values()
            .filter_map(|s| match s {
                Script::Found(d) if d.law_name.contains(query) => Some(LawSummary {
                    law_id: d.law_id,
                    law_name: d.law_name,
                    law_type: d.law_type,
                    ministry: d.ministry,
                    promulgated_date: d.promulgated_date,
                    enforced_date: d.enforced_date,
                    revision_kind: None,
                }),
                _ => None,
            })
            .collect();
        hits.sort_by(|a, b| a.law_id.cmp(&b.law_id));
        Ok(hits)
    }

    async fn law_detail(&self, law_id: &str) -> Result<Option<LawDetail>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .lock()
            .unwrap()
            .get(law_id)
            .cloned()
            .unwrap_or(Script::Missing);
        match script {
            Script::Found(detail) => Ok(Some(detail)),
            Script::Missing => Ok(None),
            Script::Fail(status) => Err(RegistryError::Server {
                status,
                body: "registry unavailable".into(),
            }),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(None)
            }
        }
    }
}

// ── Store ──

/// A [`MemoryStore`] that fails the named operations on demand.
#[derive(Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    failing: Mutex<HashSet<&'static str>>,
}

impl FaultyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_on(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    fn check(&self, op: &'static str) -> Result<(), StoreError> {
        if self.failing.lock().unwrap().contains(op) {
            return Err(StoreError::Other(format!("injected failure in {op}")));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for FaultyStore {
    async fn upsert_law(&self, law: &Law) -> Result<(), StoreError> {
        self.check("upsert_law")?;
        self.inner.upsert_law(law).await
    }
    async fn get_law(&self, law_id: &str) -> Result<Option<Law>, StoreError> {
        self.check("get_law")?;
        self.inner.get_law(law_id).await
    }
    async fn list_laws(&self, filter: &LawFilter) -> Result<Vec<Law>, StoreError> {
        self.check("list_laws")?;
        self.inner.list_laws(filter).await
    }
    async fn count_laws(&self, filter: &LawFilter) -> Result<usize, StoreError> {
        self.check("count_laws")?;
        self.inner.count_laws(filter).await
    }
    async fn insert_change(&self, change: NewChange) -> Result<Change, StoreError> {
        self.check("insert_change")?;
        self.inner.insert_change(change).await
    }
    async fn get_change(&self, id: i64) -> Result<Option<Change>, StoreError> {
        self.check("get_change")?;
        self.inner.get_change(id).await
    }
    async fn update_change(&self, change: &Change) -> Result<(), StoreError> {
        self.check("update_change")?;
        self.inner.update_change(change).await
    }
    async fn list_changes(&self, filter: &ChangeFilter) -> Result<Vec<Change>, StoreError> {
        self.check("list_changes")?;
        self.inner.list_changes(filter).await
    }
    async fn count_changes(&self, filter: &ChangeFilter) -> Result<usize, StoreError> {
        self.check("count_changes")?;
        self.inner.count_changes(filter).await
    }
    async fn change_exists(&self, change: &NewChange) -> Result<bool, StoreError> {
        self.check("change_exists")?;
        self.inner.change_exists(change).await
    }
    async fn insert_keyword(&self, keyword: NewKeyword) -> Result<Keyword, StoreError> {
        self.check("insert_keyword")?;
        self.inner.insert_keyword(keyword).await
    }
    async fn delete_keyword(&self, id: i64) -> Result<bool, StoreError> {
        self.check("delete_keyword")?;
        self.inner.delete_keyword(id).await
    }
    async fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError> {
        self.check("list_keywords")?;
        self.inner.list_keywords().await
    }
    async fn count_keywords(&self, active_only: bool) -> Result<usize, StoreError> {
        self.check("count_keywords")?;
        self.inner.count_keywords(active_only).await
    }
    async fn insert_action(&self, action: NewAction) -> Result<ActionItem, StoreError> {
        self.check("insert_action")?;
        self.inner.insert_action(action).await
    }
    async fn get_action(&self, id: i64) -> Result<Option<ActionItem>, StoreError> {
        self.check("get_action")?;
        self.inner.get_action(id).await
    }
    async fn update_action(&self, action: &ActionItem) -> Result<(), StoreError> {
        self.check("update_action")?;
        self.inner.update_action(action).await
    }
    async fn list_actions(&self, filter: &ActionFilter) -> Result<Vec<ActionItem>, StoreError> {
        self.check("list_actions")?;
        self.inner.list_actions(filter).await
    }
    async fn count_actions(&self, filter: &ActionFilter) -> Result<usize, StoreError> {
        self.check("count_actions")?;
        self.inner.count_actions(filter).await
    }
    async fn append_log(&self, log: NewLog) -> Result<MonitoringLog, StoreError> {
        self.check("append_log")?;
        self.inner.append_log(log).await
    }
    async fn list_logs(&self, limit: usize) -> Result<Vec<MonitoringLog>, StoreError> {
        self.check("list_logs")?;
        self.inner.list_logs(limit).await
    }
}

// ── Fixtures ──

pub struct Harness {
    pub store: Arc<FaultyStore>,
    pub registry: Arc<ScriptedRegistry>,
    pub monitor: Monitor,
}

impl Harness {
    pub fn new() -> Self {
        let store = FaultyStore::new();
        let registry = ScriptedRegistry::new();
        let monitor = Monitor::new(store.clone(), registry.clone()).with_config(SweepConfig {
            concurrency: 4,
            gateway_timeout: Duration::from_millis(200),
        });
        Self {
            store,
            registry,
            monitor,
        }
    }

    /// Store an active law and script the registry to return the same text.
    pub async fn track(&self, law_id: &str, name: &str, content: &str) -> Law {
        let law = law(law_id, name, content);
        self.store.upsert_law(&law).await.unwrap();
        self.registry
            .set(law_id, Script::Found(detail(law_id, name, content)));
        law
    }
}

pub fn law(law_id: &str, name: &str, content: &str) -> Law {
    Law {
        law_id: law_id.into(),
        law_name: name.into(),
        law_type: Some("법률".into()),
        ministry: Some("법무부".into()),
        enforced_date: NaiveDate::from_ymd_opt(2020, 1, 1),
        content: content.into(),
        is_active: true,
        last_updated: Utc::now(),
    }
}

pub fn detail(law_id: &str, name: &str, content: &str) -> LawDetail {
    LawDetail {
        law_id: law_id.into(),
        law_name: name.into(),
        law_type: Some("법률".into()),
        ministry: Some("법무부".into()),
        enforced_date: NaiveDate::from_ymd_opt(2020, 1, 1),
        promulgated_date: None,
        content: content.into(),
        repealed: false,
    }
}
