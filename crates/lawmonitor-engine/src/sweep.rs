//! Detection sweep: compare tracked laws against the registry and record
//! what changed.

use chrono::{DateTime, NaiveDate, Utc};
use futures::{StreamExt, TryStreamExt, stream};
use lawmonitor_core::{
    ChangeType, Law, LawDetail, LogType, NewChange, NewLog, diff_lines, fingerprint,
};
use lawmonitor_registry::RegistryError;
use lawmonitor_store::{LawFilter, StoreError};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{Monitor, WorkflowError};

/// Added lines quoted in an amendment summary.
pub const SUMMARY_LINES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub laws_checked: usize,
    pub changes_detected: usize,
    /// Ids of the change rows created by this sweep, ascending.
    pub change_ids: Vec<i64>,
    /// Laws whose registry lookup failed, ordered by law id.
    pub failures: Vec<SweepFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A law that could not be checked this round. It is retried on the next sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepFailure {
    pub law_id: String,
    pub error: String,
}

enum Outcome {
    Unchanged,
    Recorded(i64),
    /// A change for this law and date already exists.
    Duplicate,
    Failed(SweepFailure),
}

impl Monitor {
    /// Sweep every active law in the store.
    pub async fn run_sweep(&self) -> Result<DetectionReport, WorkflowError> {
        let laws = self.store.list_laws(&LawFilter::active()).await?;
        self.run_detection_sweep(laws).await
    }

    /// Check the given laws against the registry. Inactive laws are skipped.
    ///
    /// Registry failures (including timeouts) are collected per law in the
    /// report. A store failure aborts the sweep. One `API_CALL` log entry is
    /// appended after every law has been processed.
    pub async fn run_detection_sweep(
        &self,
        laws: Vec<Law>,
    ) -> Result<DetectionReport, WorkflowError> {
        let started_at = Utc::now();
        let active: Vec<Law> = laws.into_iter().filter(|l| l.is_active).collect();
        let laws_checked = active.len();
        info!(laws = laws_checked, "starting detection sweep");

        let outcomes: Vec<Outcome> = stream::iter(active)
            .map(|law| self.check_law(law, started_at.date_naive()))
            .buffer_unordered(self.config.concurrency.max(1))
            .try_collect()
            .await?;

        let mut change_ids = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Recorded(id) => change_ids.push(id),
                Outcome::Failed(failure) => failures.push(failure),
                Outcome::Unchanged | Outcome::Duplicate => {}
            }
        }
        change_ids.sort_unstable();
        failures.sort_by(|a, b| a.law_id.cmp(&b.law_id));

        let report = DetectionReport {
            laws_checked,
            changes_detected: change_ids.len(),
            change_ids,
            failures,
            started_at,
            finished_at: Utc::now(),
        };

        self.store
            .append_log(NewLog {
                log_type: LogType::ApiCall,
                message: format!(
                    "{} laws checked, {} changes detected",
                    report.laws_checked, report.changes_detected
                ),
                details: serde_json::json!({
                    "laws_checked": report.laws_checked,
                    "changes_detected": report.changes_detected,
                    "change_ids": report.change_ids,
                    "failures": report.failures,
                }),
            })
            .await?;

        info!(
            laws_checked = report.laws_checked,
            changes_detected = report.changes_detected,
            failures = report.failures.len(),
            "detection sweep complete"
        );
        Ok(report)
    }

    async fn check_law(&self, law: Law, today: NaiveDate) -> Result<Outcome, StoreError> {
        let timeout = self.config.gateway_timeout;
        let lookup = tokio::time::timeout(timeout, self.registry.law_detail(&law.law_id)).await;
        let detail = match lookup {
            Ok(Ok(detail)) => detail,
            Ok(Err(e)) => return Ok(failed(&law, e)),
            Err(_) => return Ok(failed(&law, RegistryError::Timeout(timeout))),
        };

        match detail {
            None => {
                self.record_repeal(law, today, "no longer listed by the registry")
                    .await
            }
            Some(detail) if detail.repealed => {
                self.record_repeal(law, today, "repealed according to the registry")
                    .await
            }
            Some(detail) => self.record_amendment(law, detail, today).await,
        }
    }

    async fn record_amendment(
        &self,
        mut law: Law,
        detail: LawDetail,
        today: NaiveDate,
    ) -> Result<Outcome, StoreError> {
        let renamed = detail.law_name != law.law_name;
        if !renamed && fingerprint(&detail.content) == fingerprint(&law.content) {
            debug!(law_id = %law.law_id, "unchanged");
            return Ok(Outcome::Unchanged);
        }

        let change_date = detail.promulgated_date.unwrap_or(today);
        let mut summary = diff_lines(&law.content, &detail.content).summary(SUMMARY_LINES);
        if renamed {
            summary = format!("renamed from {:?} to {:?}\n{summary}", law.law_name, detail.law_name);
        }

        let now = Utc::now();
        let outcome = self
            .record_once(NewChange {
                law_id: law.law_id.clone(),
                change_type: ChangeType::Amended,
                change_date,
                change_content: summary,
                detected_at: now,
            })
            .await?;

        law.refresh_from(&detail, now);
        self.store.upsert_law(&law).await?;
        Ok(outcome)
    }

    async fn record_repeal(
        &self,
        mut law: Law,
        today: NaiveDate,
        reason: &str,
    ) -> Result<Outcome, StoreError> {
        let now = Utc::now();
        let outcome = self
            .record_once(NewChange {
                law_id: law.law_id.clone(),
                change_type: ChangeType::Repealed,
                change_date: today,
                change_content: format!("{} {reason}", law.law_name),
                detected_at: now,
            })
            .await?;

        law.is_active = false;
        law.last_updated = now;
        self.store.upsert_law(&law).await?;
        Ok(outcome)
    }

    /// Insert `change` unless an identical one (same law, date, type and
    /// content) is already recorded.
    async fn record_once(&self, change: NewChange) -> Result<Outcome, StoreError> {
        if self.store.change_exists(&change).await? {
            debug!(law_id = %change.law_id, change_type = %change.change_type, "change already recorded");
            return Ok(Outcome::Duplicate);
        }
        let change_type = change.change_type;
        let change = self.store.insert_change(change).await?;
        info!(law_id = %change.law_id, change_id = change.id, %change_type, "change detected");
        Ok(Outcome::Recorded(change.id))
    }
}

fn failed(law: &Law, error: RegistryError) -> Outcome {
    warn!(law_id = %law.law_id, error = %error, "registry lookup failed");
    Outcome::Failed(SweepFailure {
        law_id: law.law_id.clone(),
        error: error.to_string(),
    })
}
