//! Delete flow against an in-memory backend.

mod common;

use std::sync::Arc;

use common::*;
use lec_client::board::RowAffordances;
use lec_client::console::{EventOutcome, UiEvent};
use lec_client::coordinator::DeleteOutcome;
use lec_client::transport::{Method, WireResponse};
use lec_client::{DispatchError, OperationError};
use lec_core::enums::{DeleteState, OperationKind, Severity};
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

/// Accepts only the dedicated soft-delete path and flips the flag.
fn soft_delete_backend() -> FakeBackend {
    FakeBackend::new(|req, store| {
        let soft = req.method == Method::Post && req.path.ends_with("/soft-delete");
        if !soft {
            return WireResponse::new(404, "");
        }
        let id = req
            .path
            .trim_start_matches("/api/questions/")
            .trim_end_matches("/soft-delete");
        match store.get_mut(id) {
            Some(q) => {
                q.is_deleted = true;
                WireResponse::new(200, r#"{"success":true}"#)
            }
            None => WireResponse::new(404, ""),
        }
    })
}

#[tokio::test]
async fn ephemeral_question_is_removed_without_network() {
    let h = harness(
        FakeBackend::not_found(),
        Answering::yes(),
        Chapter::selected("ch-1"),
        None,
    );
    h.console.board().show(Some("ch-1"), vec![persisted("q-1", "ch-1")]);
    let draft_id = h.console.add_draft(single_choice("ch-1"));
    assert_eq!(h.screen.row_ids(), vec!["q-1".to_string(), draft_id.clone()]);

    let mut delete = h.console.delete_coordinator();
    let outcome = delete.run(&draft_id).await;

    assert!(matches!(
        outcome,
        DeleteOutcome::Removed {
            local: true,
            list_empty: false
        }
    ));
    assert_eq!(delete.state(), DeleteState::SettledSuccess);
    assert!(h.backend.requests().is_empty());
    assert!(h.console.store().is_empty());
    assert_eq!(h.screen.row_ids(), vec!["q-1".to_string()]);
    assert_eq!(h.notes.count(Severity::Success), 1);
}

#[tokio::test]
async fn ephemeral_sole_row_leaves_one_placeholder() {
    let h = harness(
        FakeBackend::not_found(),
        Answering::yes(),
        Chapter::selected("ch-1"),
        None,
    );
    h.console.board().show(Some("ch-1"), vec![]);
    let draft_id = h.console.add_draft(single_choice("ch-1"));
    assert_eq!(h.screen.placeholders(), 0);

    let outcome = h.console.delete_coordinator().run(&draft_id).await;
    assert!(matches!(outcome, DeleteOutcome::Removed { list_empty: true, .. }));
    assert_eq!(h.screen.placeholders(), 1);
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn every_candidate_not_found_restores_row() {
    let h = harness(
        FakeBackend::not_found(),
        Answering::yes(),
        Chapter::selected("ch-1"),
        None,
    );
    h.console
        .board()
        .show(Some("ch-1"), vec![persisted("q-1", "ch-1"), persisted("q-2", "ch-1")]);
    let before = h.console.board().affordances("q-1").unwrap();

    let mut delete = h.console.delete_coordinator();
    let outcome = delete.run("q-1").await;

    let DeleteOutcome::Failed(OperationError::Dispatch(DispatchError::Exhausted { attempts, .. })) =
        outcome
    else {
        panic!("expected exhausted dispatch");
    };
    assert_eq!(attempts, 7);
    assert_eq!(h.backend.requests().len(), 7);
    assert_eq!(delete.state(), DeleteState::SettledFailure);

    assert_eq!(h.console.board().affordances("q-1"), Some(before.clone()));
    assert_eq!(
        h.screen.row_updates(),
        vec![
            ("q-1".to_string(), RowAffordances::Busy),
            ("q-1".to_string(), before),
        ]
    );
    assert_eq!(h.screen.row_ids(), vec!["q-1".to_string(), "q-2".to_string()]);

    let errors: Vec<_> = h
        .notes
        .all()
        .into_iter()
        .filter(|(_, s)| *s == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].0.contains("Not Found"), "{errors:?}");
    assert!(h.console.context().memory().get(OperationKind::Delete).is_none());
}

#[tokio::test]
async fn chapter_scoped_candidate_uses_row_chapter() {
    let backend = FakeBackend::new(|req, _| {
        if req.method == Method::Delete && req.path == "/api/chapters/ch-9/questions/q-1" {
            WireResponse::new(204, "")
        } else {
            WireResponse::new(404, "")
        }
    });
    let h = harness(backend, Answering::yes(), Chapter::selected("ch-other"), None);
    h.console.board().show(Some("ch-9"), vec![persisted("q-1", "ch-9")]);

    let outcome = h.console.delete_coordinator().run("q-1").await;
    assert!(matches!(outcome, DeleteOutcome::Removed { local: false, list_empty: true }));
    assert_eq!(h.backend.requests().len(), 7);
    assert_eq!(h.screen.placeholders(), 1);
}

#[tokio::test]
async fn declining_confirmation_changes_nothing() {
    let h = harness(
        soft_delete_backend(),
        Answering::no(),
        Chapter::selected("ch-1"),
        None,
    );
    h.console.board().show(Some("ch-1"), vec![persisted("q-1", "ch-1")]);

    let mut delete = h.console.delete_coordinator();
    let outcome = delete.run("q-1").await;

    assert!(matches!(outcome, DeleteOutcome::Declined));
    assert_eq!(delete.state(), DeleteState::Idle);
    assert_eq!(h.confirm.asked(), 1);
    assert!(h.backend.requests().is_empty());
    assert!(h.notes.all().is_empty());
    assert_eq!(h.screen.row_ids(), vec!["q-1".to_string()]);
}

#[tokio::test]
async fn placeholder_id_is_rejected_before_confirmation() {
    let h = harness(
        soft_delete_backend(),
        Answering::yes(),
        Chapter::selected("ch-1"),
        None,
    );
    let outcome = h.console.delete_coordinator().run("undefined").await;

    assert!(matches!(
        outcome,
        DeleteOutcome::Rejected(OperationError::Validation(_))
    ));
    assert_eq!(h.confirm.asked(), 0);
    assert!(h.backend.requests().is_empty());
    assert_eq!(h.notes.count(Severity::Error), 1);
}

#[tokio::test]
async fn repeated_soft_delete_keeps_flag_set() {
    let h = harness(
        soft_delete_backend(),
        Answering::yes(),
        Chapter::selected("ch-1"),
        None,
    );
    h.backend.seed(persisted("q-1", "ch-1"));
    h.console.board().show(Some("ch-1"), vec![persisted("q-1", "ch-1")]);

    let first = h.console.delete_coordinator().run("q-1").await;
    assert!(first.is_removed());
    assert_eq!(h.backend.requests().len(), 1);
    assert!(h.backend.stored("q-1").unwrap().is_deleted);

    let _second = h.console.delete_coordinator().run("q-1").await;
    assert!(h.backend.stored("q-1").unwrap().is_deleted);
    assert_eq!(h.backend.requests()[1].path, "/api/questions/q-1/soft-delete");
}

#[tokio::test]
async fn successful_delete_calls_refresh_hook_with_chapter() {
    let hook = Hook::default();
    let h = harness(
        soft_delete_backend(),
        Answering::yes(),
        Chapter::selected("ch-1"),
        Some(hook.clone()),
    );
    h.backend.seed(persisted("q-1", "ch-1"));
    h.console
        .board()
        .show(Some("ch-1"), vec![persisted("q-1", "ch-1"), persisted("q-2", "ch-1")]);

    let outcome = h.console.delete_coordinator().run("q-1").await;
    assert!(matches!(outcome, DeleteOutcome::Removed { list_empty: false, .. }));
    assert_eq!(hook.calls(), vec!["ch-1".to_string()]);
    assert_eq!(h.screen.row_ids(), vec!["q-2".to_string()]);
}

#[tokio::test]
async fn sole_row_delete_wins_over_stale_background_refresh() {
    let gate = Arc::new(Notify::new());
    let backend = FakeBackend::new(|req, _| match req.method {
        Method::Get => {
            // Stale: still lists the row that is being deleted.
            let body = serde_json::json!({ "data": [persisted("q-1", "ch-1")] });
            WireResponse::new(200, body.to_string())
        }
        Method::Post if req.path.ends_with("/soft-delete") => WireResponse::new(200, ""),
        _ => WireResponse::new(404, ""),
    })
    .with_fetch_gate(Arc::clone(&gate));
    let h = harness(backend, Answering::yes(), Chapter::selected("ch-1"), None);
    h.console.board().show(Some("ch-1"), vec![persisted("q-1", "ch-1")]);

    let (reloaded, deleted) = tokio::join!(h.console.reload("ch-1"), async {
        let outcome = h.console.delete_coordinator().run("q-1").await;
        gate.notify_one();
        outcome
    });

    assert!(matches!(deleted, DeleteOutcome::Removed { list_empty: true, .. }));
    assert_eq!(reloaded.unwrap(), 0);
    assert!(h.console.board().is_empty());
    assert_eq!(h.screen.placeholders(), 1);
    assert!(h.screen.row_ids().is_empty());
}

#[tokio::test]
async fn deletes_on_different_rows_interleave() {
    let h = harness(
        soft_delete_backend(),
        Answering::yes(),
        Chapter::selected("ch-1"),
        None,
    );
    for id in ["q-1", "q-2"] {
        h.backend.seed(persisted(id, "ch-1"));
    }
    h.console
        .board()
        .show(Some("ch-1"), vec![persisted("q-1", "ch-1"), persisted("q-2", "ch-1")]);

    let (a, b) = tokio::join!(
        h.console.handle(UiEvent::Delete { id: "q-1".into() }),
        h.console.handle(UiEvent::Delete { id: "q-2".into() }),
    );

    assert!(matches!(a, EventOutcome::Deleted(ref o) if o.is_removed()));
    assert!(matches!(b, EventOutcome::Deleted(ref o) if o.is_removed()));
    assert!(h.console.board().is_empty());
    assert_eq!(h.screen.placeholders(), 1);
    assert_eq!(h.notes.count(Severity::Success), 2);
}

#[tokio::test]
async fn one_coordinator_runs_consecutive_deletes() {
    let h = harness(
        soft_delete_backend(),
        Answering::yes(),
        Chapter::selected("ch-1"),
        None,
    );
    for id in ["q-1", "q-2"] {
        h.backend.seed(persisted(id, "ch-1"));
    }
    h.console
        .board()
        .show(Some("ch-1"), vec![persisted("q-1", "ch-1"), persisted("q-2", "ch-1")]);

    let mut delete = h.console.delete_coordinator();
    assert!(delete.run("q-1").await.is_removed());
    assert_eq!(delete.state(), DeleteState::SettledSuccess);

    assert!(delete.run("q-2").await.is_removed());
    assert_eq!(delete.state(), DeleteState::SettledSuccess);
    assert!(h.backend.stored("q-2").unwrap().is_deleted);
    assert!(h.console.board().is_empty());
}
