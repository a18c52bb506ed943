//! Review, action lifecycle, keyword, and law promotion operations.

mod common;

use chrono::{NaiveDate, Utc};
use common::*;
use lawmonitor_core::{ActionStatus, ChangeType, NewAction, NewChange, NewKeyword, Priority};
use lawmonitor_engine::{ReviewOutcome, ReviewState, TRACKED_SEARCH_LIMIT, WorkflowError};
use lawmonitor_store::Store;

async fn seed_change(h: &Harness, law_id: &str) -> i64 {
    h.store
        .insert_change(NewChange {
            law_id: law_id.into(),
            change_type: ChangeType::Amended,
            change_date: Utc::now().date_naive(),
            change_content: "1 line(s) added, 0 line(s) removed".into(),
            detected_at: Utc::now(),
        })
        .await
        .unwrap()
        .id
}

fn high_priority(title: &str) -> NewAction {
    NewAction {
        law_change_id: None,
        title: title.into(),
        description: None,
        priority: Priority::High,
        assigned_to: None,
        due_date: None,
    }
}

// ── Review ──

#[tokio::test]
async fn review_sets_reviewer_and_timestamp() {
    let h = Harness::new();
    let id = seed_change(&h, "L1").await;

    let outcome = h.monitor.review_change(id, "Kim").await.unwrap();
    let ReviewOutcome::Reviewed(change) = outcome else {
        panic!("expected Reviewed, got {outcome:?}");
    };
    assert!(change.is_reviewed);
    assert_eq!(change.reviewed_by.as_deref(), Some("Kim"));
    assert!(change.reviewed_at.is_some());

    let stored = h.store.get_change(id).await.unwrap().unwrap();
    assert_eq!(stored, change);
}

#[tokio::test]
async fn second_review_keeps_first_reviewer() {
    let h = Harness::new();
    let id = seed_change(&h, "L1").await;

    h.monitor.review_change(id, "Kim").await.unwrap();
    let outcome = h.monitor.review_change(id, "Lee").await.unwrap();
    let ReviewOutcome::AlreadyReviewed(change) = outcome else {
        panic!("expected AlreadyReviewed, got {outcome:?}");
    };
    assert_eq!(change.reviewed_by.as_deref(), Some("Kim"));

    let stored = h.store.get_change(id).await.unwrap().unwrap();
    assert_eq!(stored.reviewed_by.as_deref(), Some("Kim"));
}

#[tokio::test]
async fn blank_reviewer_cancels_without_mutation() {
    let h = Harness::new();
    let id = seed_change(&h, "L1").await;

    let outcome = h.monitor.review_change(id, "   ").await.unwrap();
    assert_eq!(outcome, ReviewOutcome::Cancelled);
    let stored = h.store.get_change(id).await.unwrap().unwrap();
    assert!(!stored.is_reviewed);
    assert!(stored.reviewed_by.is_none());
    assert!(stored.reviewed_at.is_none());
}

#[tokio::test]
async fn review_of_missing_change_is_not_found() {
    let h = Harness::new();
    let err = h.monitor.review_change(42, "Kim").await.unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { entity: "change", .. }));
}

#[tokio::test]
async fn listing_by_review_state_carries_law_names() {
    let h = Harness::new();
    h.track("L1", "Act A", "v1").await;
    let reviewed = seed_change(&h, "L1").await;
    seed_change(&h, "ORPHAN").await;
    h.monitor.review_change(reviewed, "Kim").await.unwrap();

    let pending = h
        .monitor
        .list_changes(&ReviewState::Pending.filter())
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].law_name, "ORPHAN");

    let done = h
        .monitor
        .list_changes(&ReviewState::Reviewed.filter())
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].law_name, "Act A");
}

// ── Actions ──

#[tokio::test]
async fn action_lifecycle_runs_forward_only() {
    let h = Harness::new();
    let item = h.monitor.create_action(high_priority("Update contract")).await.unwrap();
    assert_eq!(item.status, ActionStatus::Pending);
    assert!(item.completed_at.is_none());

    let item = h
        .monitor
        .advance_status(item.id, ActionStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(item.status, ActionStatus::InProgress);
    assert!(item.completed_at.is_none());

    let item = h
        .monitor
        .advance_status(item.id, ActionStatus::Completed)
        .await
        .unwrap();
    assert_eq!(item.status, ActionStatus::Completed);
    assert!(item.completed_at.is_some());

    let err = h
        .monitor
        .advance_status(item.id, ActionStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::IllegalTransition(_)));
    let stored = h.store.get_action(item.id).await.unwrap().unwrap();
    assert_eq!(stored, item);
}

#[tokio::test]
async fn skipping_in_progress_is_rejected() {
    let h = Harness::new();
    let item = h.monitor.create_action(high_priority("Audit")).await.unwrap();

    let err = h
        .monitor
        .advance_status(item.id, ActionStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::IllegalTransition(_)));
    let stored = h.store.get_action(item.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ActionStatus::Pending);
    assert!(stored.completed_at.is_none());
}

#[tokio::test]
async fn create_action_validates_input() {
    let h = Harness::new();
    let err = h.monitor.create_action(high_priority("  ")).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let mut linked = high_priority("Follow up");
    linked.law_change_id = Some(99);
    let err = h.monitor.create_action(linked).await.unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { entity: "change", .. }));

    assert!(
        h.store
            .list_actions(&Default::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn create_action_links_change_and_trims_fields() {
    let h = Harness::new();
    let change_id = seed_change(&h, "L1").await;
    let item = h
        .monitor
        .create_action(NewAction {
            law_change_id: Some(change_id),
            title: "  Update contract  ".into(),
            description: Some("   ".into()),
            priority: Priority::Medium,
            assigned_to: Some(" Park ".into()),
            due_date: NaiveDate::from_ymd_opt(2025, 6, 30),
        })
        .await
        .unwrap();
    assert_eq!(item.title, "Update contract");
    assert_eq!(item.law_change_id, Some(change_id));
    assert!(item.description.is_none());
    assert_eq!(item.assigned_to.as_deref(), Some("Park"));
}

#[tokio::test]
async fn notes_overwrite_and_blank_clears() {
    let h = Harness::new();
    let item = h.monitor.create_action(high_priority("Update")).await.unwrap();

    let item = h.monitor.set_note(item.id, "first").await.unwrap();
    assert_eq!(item.notes.as_deref(), Some("first"));
    let item = h.monitor.set_note(item.id, "second").await.unwrap();
    assert_eq!(item.notes.as_deref(), Some("second"));
    let item = h.monitor.set_note(item.id, " ").await.unwrap();
    assert!(item.notes.is_none());

    let err = h.monitor.set_note(404, "x").await.unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { entity: "action", .. }));
}

#[tokio::test]
async fn advance_missing_action_is_not_found() {
    let h = Harness::new();
    let err = h
        .monitor
        .advance_status(7, ActionStatus::InProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { .. }));
}

// ── Keywords ──

#[tokio::test]
async fn keywords_add_and_delete() {
    let h = Harness::new();
    let kw = h
        .monitor
        .add_keyword(NewKeyword {
            keyword: " 개인정보 ".into(),
            category: Some("".into()),
            description: Some("privacy".into()),
        })
        .await
        .unwrap();
    assert_eq!(kw.keyword, "개인정보");
    assert!(kw.category.is_none());
    assert!(kw.is_active);

    assert_eq!(h.monitor.list_keywords().await.unwrap().len(), 1);
    h.monitor.delete_keyword(kw.id).await.unwrap();
    assert!(h.monitor.list_keywords().await.unwrap().is_empty());

    let err = h.monitor.delete_keyword(kw.id).await.unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { entity: "keyword", .. }));
}

#[tokio::test]
async fn blank_keyword_is_rejected() {
    let h = Harness::new();
    let err = h
        .monitor
        .add_keyword(NewKeyword::default())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

// ── Laws ──

#[tokio::test]
async fn first_promotion_records_new_change() {
    let h = Harness::new();
    let mut d = detail("L1", "Act A", "v1");
    d.promulgated_date = NaiveDate::from_ymd_opt(2023, 3, 14);

    let first = h.monitor.add_to_monitoring(d.clone()).await.unwrap();
    assert!(first.law.is_active);
    let change = first.new_change.unwrap();
    assert_eq!(change.change_type, ChangeType::New);
    assert_eq!(change.change_date, NaiveDate::from_ymd_opt(2023, 3, 14).unwrap());

    let again = h.monitor.add_to_monitoring(d).await.unwrap();
    assert!(again.new_change.is_none());
    assert_eq!(h.store.count_changes(&Default::default()).await.unwrap(), 1);
}

#[tokio::test]
async fn promotion_reactivates_a_repealed_law() {
    let h = Harness::new();
    let mut old = law("L1", "Act A", "v1");
    old.is_active = false;
    h.store.upsert_law(&old).await.unwrap();

    let promoted = h
        .monitor
        .add_to_monitoring(detail("L1", "Act A", "v1"))
        .await
        .unwrap();
    assert!(promoted.law.is_active);
    assert!(promoted.new_change.is_none());
}

#[tokio::test]
async fn track_law_fetches_from_registry() {
    let h = Harness::new();
    h.registry
        .set("L7", Script::Found(detail("L7", "근로기준법", "제1조")));

    let promoted = h.monitor.track_law("L7").await.unwrap();
    assert_eq!(promoted.law.law_name, "근로기준법");
    assert_eq!(h.monitor.get_law("L7").await.unwrap().content, "제1조");

    let err = h.monitor.track_law("nope").await.unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { entity: "law", .. }));
}

#[tokio::test]
async fn registry_errors_surface_on_direct_calls() {
    let h = Harness::new();
    h.registry.set("L1", Script::Fail(500));
    let err = h.monitor.track_law("L1").await.unwrap_err();
    assert!(matches!(err, WorkflowError::Gateway(_)));

    let err = h.monitor.search_registry("  ").await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn registry_search_returns_matches() {
    let h = Harness::new();
    h.registry
        .set("L1", Script::Found(detail("L1", "개인정보 보호법", "x")));
    h.registry
        .set("L2", Script::Found(detail("L2", "도로교통법", "y")));

    let hits = h.monitor.search_registry("개인정보").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].law_id, "L1");
}

#[tokio::test]
async fn tracked_search_matches_name_or_content_with_limit() {
    let h = Harness::new();
    for i in 0..25 {
        h.track(&format!("L{i:02}"), &format!("Act {i}"), "safety duty")
            .await;
    }
    h.track("X1", "Privacy Act", "data").await;

    assert_eq!(
        h.monitor.search_tracked("SAFETY").await.unwrap().len(),
        TRACKED_SEARCH_LIMIT
    );
    let hits = h.monitor.search_tracked("privacy").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].law_id, "X1");
}
