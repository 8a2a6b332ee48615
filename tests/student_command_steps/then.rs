//! Then steps for student command BDD scenarios.

use super::world::StudentWorld;
use rstest_bdd_macros::then;
use taskboard::student::{
    adapters::memory::BackendCall,
    domain::{
        CommandResult, DEFAULT_CLAIMED_LABEL, MessageKey, StudentCommand, TaskStatus,
        TemplateContext,
    },
};

fn expected_reply(
    world: &StudentWorld,
    command_text: &str,
    key: &str,
) -> Result<String, eyre::Report> {
    let key = MessageKey::ALL
        .into_iter()
        .find(|candidate| candidate.as_str() == key)
        .ok_or_else(|| eyre::eyre!("unknown message key {key}"))?;
    let context = TemplateContext {
        command: StudentCommand::parse(command_text).map_or("", StudentCommand::as_str),
        claimed_label: DEFAULT_CLAIMED_LABEL,
    };
    Ok(world.templates.render(key, &context)?)
}

fn check_reply(
    world: &StudentWorld,
    (command, reply): &(String, CommandResult),
    key: &str,
    succeeded: bool,
) -> Result<(), eyre::Report> {
    let expected = expected_reply(world, command, key)?;
    eyre::ensure!(
        reply.result == succeeded && reply.message == expected,
        "expected {{result: {succeeded}, message: {expected:?}}}, got {reply:?}"
    );
    Ok(())
}

#[then(r#"the command succeeds with the "{key}" reply"#)]
fn command_succeeds(world: &StudentWorld, key: String) -> Result<(), eyre::Report> {
    check_reply(world, world.last_reply()?, &key, true)
}

#[then(r#"the command is rejected with the "{key}" reply"#)]
fn command_rejected(world: &StudentWorld, key: String) -> Result<(), eyre::Report> {
    check_reply(world, world.last_reply()?, &key, false)
}

#[then(r#"every reply is rejected with the "{key}" reply"#)]
fn every_reply_rejected(world: &StudentWorld, key: String) -> Result<(), eyre::Report> {
    eyre::ensure!(!world.replies.is_empty(), "no command was issued");
    for reply in &world.replies {
        check_reply(world, reply, &key, false)?;
    }
    Ok(())
}

#[then("the backend received no calls")]
fn backend_untouched(world: &StudentWorld) -> Result<(), eyre::Report> {
    let calls = world.backend.calls()?;
    eyre::ensure!(calls.is_empty(), "unexpected backend calls: {calls:?}");
    Ok(())
}

#[then("the backend received no transitions")]
fn backend_not_transitioned(world: &StudentWorld) -> Result<(), eyre::Report> {
    let calls = world.backend.calls()?;
    eyre::ensure!(
        !calls.iter().any(BackendCall::is_transition),
        "unexpected backend transitions: {calls:?}"
    );
    Ok(())
}

#[then("the tracker received no calls")]
fn tracker_untouched(world: &StudentWorld) -> Result<(), eyre::Report> {
    let calls = world.tracker.calls()?;
    eyre::ensure!(calls.is_empty(), "unexpected tracker calls: {calls:?}");
    Ok(())
}

#[then("the claimed label is removed from the issue")]
fn claimed_label_removed(world: &StudentWorld) -> Result<(), eyre::Report> {
    let labels = world.tracker.labels(&world.task()?.locator())?;
    eyre::ensure!(
        !labels.iter().any(|label| label == DEFAULT_CLAIMED_LABEL),
        "claimed label still present: {labels:?}"
    );
    Ok(())
}

#[then(r#""{login}" is no longer assigned on the issue"#)]
fn student_unassigned(world: &StudentWorld, login: String) -> Result<(), eyre::Report> {
    let assignees = world.tracker.assignees(&world.task()?.locator())?;
    eyre::ensure!(
        !assignees.contains(&login),
        "{login} is still assigned: {assignees:?}"
    );
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &StudentWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let id = world.task()?.github_issue_id;
    let stored = world
        .backend
        .task(id)?
        .ok_or_else(|| eyre::eyre!("task {id} missing from backend"))?;
    eyre::ensure!(
        stored.task_status == expected,
        "expected status {expected}, found {}",
        stored.task_status
    );
    Ok(())
}
