//! In-memory integration tests for claiming tasks.

use super::helpers::{Harness, harness, payload, snapshot};
use rstest::rstest;
use taskboard::student::{
    adapters::memory::BackendCall,
    domain::{CommandRequest, TaskStatus},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn verified_student_claims_open_task(harness: Harness) -> Result<(), eyre::Report> {
    harness.verified(&["alice"])?;
    let task = snapshot(3001, 11, TaskStatus::Open, None);
    harness.seed(&task, &[])?;

    let result = harness
        .service
        .handle(&payload("alice", "/request-assign", task.clone(), &[]))
        .await?;

    eyre::ensure!(result.result, "claim should succeed: {}", result.message);
    assert_eq!(
        result.message,
        "Claim received. A mentor will review your request shortly."
    );
    let stored = harness.stored(&task)?;
    assert_eq!(stored.task_status, TaskStatus::RequestAssign);
    assert!(stored.is_bound_to("alice"));
    assert_eq!(
        harness.backend.calls()?,
        vec![
            BackendCall::VerifyIdentity("alice".to_owned()),
            BackendCall::ActiveTask("alice".to_owned()),
            BackendCall::RequestAssign(CommandRequest::new(task.github_issue_id, "alice")),
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_claim_on_pending_task_is_turned_away(
    harness: Harness,
) -> Result<(), eyre::Report> {
    harness.verified(&["alice", "bob"])?;
    let task = snapshot(3002, 12, TaskStatus::Open, None);
    harness.seed(&task, &[])?;
    harness
        .service
        .handle(&payload("alice", "/request-assign", task.clone(), &[]))
        .await?;
    let calls_after_first = harness.backend.calls()?.len();

    let pending = harness.stored(&task)?;
    let result = harness
        .service
        .handle(&payload("bob", "/request-assign", pending, &[]))
        .await?;

    assert!(!result.result);
    assert_eq!(
        result.message,
        "This task has already been claimed by another student and is pending review."
    );
    assert_eq!(harness.backend.calls()?.len(), calls_after_first);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn student_with_active_task_cannot_claim_another(
    harness: Harness,
) -> Result<(), eyre::Report> {
    harness.verified(&["alice"])?;
    harness.seed(&snapshot(3003, 13, TaskStatus::Assigned, Some("alice")), &[])?;
    let open = snapshot(3004, 14, TaskStatus::Open, None);
    harness.seed(&open, &[])?;

    let result = harness
        .service
        .handle(&payload("alice", "/request-assign", open.clone(), &[]))
        .await?;

    assert!(!result.result);
    assert!(result.message.starts_with("You already have an active task."));
    assert_eq!(harness.stored(&open)?, open);
    assert!(
        !harness
            .backend
            .calls()?
            .iter()
            .any(BackendCall::is_transition)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unregistered_student_waits_for_review(harness: Harness) -> Result<(), eyre::Report> {
    let task = snapshot(3005, 15, TaskStatus::Open, None);
    harness.seed(&task, &[])?;

    let result = harness
        .service
        .handle(&payload("newcomer", "/request-assign", task.clone(), &[]))
        .await?;

    assert!(!result.result);
    assert!(result.message.contains("still under review"));
    assert_eq!(
        harness.backend.calls()?,
        vec![BackendCall::VerifyIdentity("newcomer".to_owned())]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backend_refusing_claim_reports_api_error(harness: Harness) -> Result<(), eyre::Report> {
    harness.verified(&["alice"])?;
    let task = snapshot(3006, 16, TaskStatus::Open, None);
    harness.seed(&task, &[])?;
    harness.backend.reject_transitions()?;

    let result = harness
        .service
        .handle(&payload("alice", "/request-assign", task.clone(), &[]))
        .await?;

    assert!(!result.result);
    assert_eq!(result.message, "API ERROR");
    assert_eq!(harness.stored(&task)?, task);
    Ok(())
}
