//! When steps for student command BDD scenarios.

use super::world::{StudentWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::student::domain::{Actor, TrackerIssue};

#[when(r#""{login}" comments "{command}""#)]
fn student_comments(
    world: &mut StudentWorld,
    login: String,
    command: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let actor = Actor::new(login)?;
    let issue = TrackerIssue::with_labels(world.labels.iter().cloned());

    let reply = run_async(world.service.dispatch(&actor, &command, &task, &issue))
        .wrap_err("dispatch student command")?;
    world.replies.push((command, reply));
    Ok(())
}
