//! Plain-text cards for sweep reports, dashboard snapshots, and search hits.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, Utc};
use lawmonitor_core::LawSummary;
use lawmonitor_engine::{DashboardSnapshot, DetectionReport};

const MAX_LIST_ITEMS: usize = 10;

// ── Public API ──

pub fn print_report(report: &DetectionReport) {
    print!("{}", render_report(report));
}

pub fn print_dashboard(snapshot: &DashboardSnapshot) {
    print!("{}", render_dashboard(snapshot));
}

pub fn print_search_results(query: &str, laws: &[LawSummary]) {
    print!("{}", render_search_results(query, laws));
}

// ── Rendering ──

fn row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {label:<26} {value}");
}

fn timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

fn render_report(report: &DetectionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Detection sweep ===");
    out.push('\n');

    let _ = writeln!(out, "Summary");
    row(&mut out, "laws_checked", report.laws_checked);
    row(&mut out, "changes_detected", report.changes_detected);
    row(&mut out, "failures", report.failures.len());
    row(&mut out, "started_at", timestamp(report.started_at));
    row(&mut out, "finished_at", timestamp(report.finished_at));
    out.push('\n');

    if !report.change_ids.is_empty() {
        let ids: Vec<String> = report.change_ids.iter().map(|id| id.to_string()).collect();
        let _ = writeln!(out, "New changes");
        row(&mut out, "change_ids", ids.join(", "));
        out.push('\n');
    }

    if !report.failures.is_empty() {
        let _ = writeln!(out, "Failures ({}):", report.failures.len());
        for failure in report.failures.iter().take(MAX_LIST_ITEMS) {
            let _ = writeln!(out, "  {}: {}", failure.law_id, failure.error);
        }
        if report.failures.len() > MAX_LIST_ITEMS {
            let _ = writeln!(out, "  ... and {} more", report.failures.len() - MAX_LIST_ITEMS);
        }
        out.push('\n');
    }
    out
}

fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Dashboard ===");
    let _ = writeln!(out, "generated {}", timestamp(snapshot.generated_at));
    out.push('\n');

    let _ = writeln!(out, "Counts");
    row(&mut out, "tracked laws", snapshot.total_laws);
    row(&mut out, "unreviewed changes", snapshot.unreviewed_changes);
    row(&mut out, "active keywords", snapshot.active_keywords);
    row(&mut out, "open actions", snapshot.open_actions);
    out.push('\n');

    if !snapshot.recent_changes.is_empty() {
        let _ = writeln!(out, "Recent changes ({}):", snapshot.recent_changes.len());
        for view in &snapshot.recent_changes {
            let c = &view.change;
            let mark = if c.is_reviewed { "✓" } else { " " };
            let _ = writeln!(
                out,
                "  [{mark}] #{:<5} {:<9} {} {}",
                c.id,
                c.change_type.as_str(),
                c.change_date,
                view.law_name
            );
        }
        out.push('\n');
    }

    if !snapshot.urgent_actions.is_empty() {
        let _ = writeln!(out, "Urgent actions ({}):", snapshot.urgent_actions.len());
        for item in &snapshot.urgent_actions {
            let _ = writeln!(
                out,
                "  #{:<5} {:<11} due {:<10} {}",
                item.id,
                item.status.as_str(),
                date(item.due_date),
                item.title
            );
        }
        out.push('\n');
    }
    out
}

fn render_search_results(query: &str, laws: &[LawSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Registry search: {query} ===");
    if laws.is_empty() {
        let _ = writeln!(out, "  (no matches)");
        return out;
    }
    let _ = writeln!(out, "{} result(s)", laws.len());
    out.push('\n');

    for law in laws.iter().take(MAX_LIST_ITEMS) {
        let _ = writeln!(out, "{}", law.law_name);
        row(&mut out, "law_id (MST)", &law.law_id);
        if let Some(kind) = &law.law_type {
            row(&mut out, "type", kind);
        }
        if let Some(ministry) = &law.ministry {
            row(&mut out, "ministry", ministry);
        }
        row(&mut out, "promulgated", date(law.promulgated_date));
        row(&mut out, "enforced", date(law.enforced_date));
        out.push('\n');
    }
    if laws.len() > MAX_LIST_ITEMS {
        let _ = writeln!(out, "... and {} more", laws.len() - MAX_LIST_ITEMS);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawmonitor_engine::SweepFailure;

    fn report() -> DetectionReport {
        DetectionReport {
            laws_checked: 3,
            changes_detected: 1,
            change_ids: vec![17],
            failures: vec![SweepFailure {
                law_id: "L9".into(),
                error: "server returned 503: maintenance".into(),
            }],
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn report_lists_counts_and_failures() {
        let text = render_report(&report());
        assert!(text.starts_with("=== Detection sweep ==="));
        assert!(text.contains("laws_checked"));
        assert!(text.contains("17"));
        assert!(text.contains("L9: server returned 503"));
    }

    #[test]
    fn empty_dashboard_renders_counts_only() {
        let snapshot = DashboardSnapshot {
            total_laws: 0,
            unreviewed_changes: 0,
            active_keywords: 0,
            open_actions: 0,
            recent_changes: vec![],
            urgent_actions: vec![],
            generated_at: Utc::now(),
        };
        let text = render_dashboard(&snapshot);
        assert!(text.contains("tracked laws"));
        assert!(!text.contains("Recent changes"));
    }

    #[test]
    fn search_results_are_capped() {
        let laws: Vec<LawSummary> = (0..12)
            .map(|i| LawSummary {
                law_id: i.to_string(),
                law_name: format!("법률 {i}"),
                law_type: None,
                ministry: None,
                promulgated_date: None,
                enforced_date: None,
                revision_kind: None,
            })
            .collect();
        let text = render_search_results("법률", &laws);
        assert!(text.contains("12 result(s)"));
        assert!(text.contains("... and 2 more"));
        assert!(!text.contains("법률 11\n"));
    }

    #[test]
    fn no_search_results() {
        assert!(render_search_results("x", &[]).contains("(no matches)"));
    }
}
