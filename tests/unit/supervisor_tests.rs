//! Latest-wins supervision semantics.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tweetpress::supervisor::{TaskOutcome, TaskSupervisor};
use tweetpress::AppError;

#[tokio::test]
async fn completed_task_delivers_its_value() {
    let supervisor = TaskSupervisor::new();

    let handle = supervisor
        .submit("u1", |_cancel| async { Ok(TaskOutcome::Completed(42)) })
        .await;

    let outcome = handle.outcome().await.expect("delivered").expect("ok");
    assert_eq!(outcome, 42);
    assert_eq!(supervisor.active_count().await, 0);
}

#[tokio::test]
async fn failed_task_delivers_its_error() {
    let supervisor = TaskSupervisor::new();

    let handle = supervisor
        .submit("u1", |_cancel| async {
            Err::<TaskOutcome<()>, _>(AppError::Platform("boom".into()))
        })
        .await;

    let result = handle.outcome().await.expect("delivered");
    match result {
        Err(AppError::Platform(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected platform error, got {other:?}"),
    }
}

#[tokio::test]
async fn newer_submission_supersedes_older_one() {
    let supervisor = TaskSupervisor::new();
    let gate = Arc::new(Semaphore::new(0));

    let first_gate = Arc::clone(&gate);
    let first = supervisor
        .submit("u1", move |cancel| async move {
            // Hold before the first checkpoint until the test releases us.
            let permit = first_gate.acquire().await.expect("gate open");
            permit.forget();
            if cancel.is_cancelled() {
                return Ok(TaskOutcome::Cancelled);
            }
            Ok(TaskOutcome::Completed(1))
        })
        .await;

    let second = supervisor
        .submit("u1", |_cancel| async { Ok(TaskOutcome::Completed(2)) })
        .await;

    gate.add_permits(1);

    let delivered = second.outcome().await.expect("delivered").expect("ok");
    assert_eq!(delivered, 2);
    // The superseded task observed its token and delivered nothing.
    assert!(first.outcome().await.is_none());
}

#[tokio::test]
async fn owners_are_supervised_independently() {
    let supervisor = TaskSupervisor::new();
    let gate = Arc::new(Semaphore::new(0));

    let slow_gate = Arc::clone(&gate);
    let slow = supervisor
        .submit("u1", move |cancel| async move {
            let permit = slow_gate.acquire().await.expect("gate open");
            permit.forget();
            if cancel.is_cancelled() {
                return Ok(TaskOutcome::Cancelled);
            }
            Ok(TaskOutcome::Completed("u1"))
        })
        .await;

    // A submission for a different owner must not touch u1's token.
    let other = supervisor
        .submit("u2", |_cancel| async { Ok(TaskOutcome::Completed("u2")) })
        .await;

    let other_value = other.outcome().await.expect("delivered").expect("ok");
    assert_eq!(other_value, "u2");

    gate.add_permits(1);
    let slow_value = slow.outcome().await.expect("delivered").expect("ok");
    assert_eq!(slow_value, "u1");
}

#[tokio::test]
async fn registry_empties_after_terminal_outcomes() {
    let supervisor = TaskSupervisor::new();

    let first = supervisor
        .submit("u1", |_cancel| async { Ok(TaskOutcome::Completed(())) })
        .await;
    let second = supervisor
        .submit("u2", |_cancel| async { Ok(TaskOutcome::Completed(())) })
        .await;

    first.outcome().await.expect("delivered").expect("ok");
    second.outcome().await.expect("delivered").expect("ok");
    assert_eq!(supervisor.active_count().await, 0);
}
