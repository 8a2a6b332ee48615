//! Given steps for student command BDD scenarios.

use super::world::StudentWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::student::domain::{
    DEFAULT_CLAIMED_LABEL, GithubIssueId, IssueNumber, StudentVerification, TaskSnapshot,
    TaskStatus,
};

fn store_task(
    world: &mut StudentWorld,
    number: u64,
    status: TaskStatus,
    student: Option<String>,
) -> Result<(), eyre::Report> {
    let task = TaskSnapshot {
        github_issue_id: GithubIssueId::new(number)?,
        github_issue_number: IssueNumber::new(number)?,
        owner: "org".to_owned(),
        repo: "tasks".to_owned(),
        task_status: status,
        student_github_login: student,
    };
    world
        .backend
        .insert_task(task.clone())
        .wrap_err("seed backend task")?;
    world.task = Some(task);
    Ok(())
}

#[given("an open task #{number:u64}")]
fn open_task(world: &mut StudentWorld, number: u64) -> Result<(), eyre::Report> {
    store_task(world, number, TaskStatus::Open, None)
}

#[given(r#"a task #{number:u64} in status "{status}" held by "{login}""#)]
fn held_task(
    world: &mut StudentWorld,
    number: u64,
    status: String,
    login: String,
) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(status.as_str())?;
    store_task(world, number, status, Some(login))
}

#[given(r#""{login}" is a verified student"#)]
fn verified_student(world: &mut StudentWorld, login: String) -> Result<(), eyre::Report> {
    world
        .backend
        .register_student(login, StudentVerification::verified())
        .wrap_err("register verified student")
}

#[given("the issue carries the claimed label")]
fn issue_carries_claimed_label(world: &mut StudentWorld) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    world.labels.push(DEFAULT_CLAIMED_LABEL.to_owned());
    world
        .tracker
        .insert_issue(
            task.locator(),
            world.labels.iter().cloned(),
            task.student_github_login.iter().cloned(),
        )
        .wrap_err("seed tracker issue")
}

#[given("the backend refuses transitions")]
fn backend_refuses_transitions(world: &mut StudentWorld) -> Result<(), eyre::Report> {
    world
        .backend
        .reject_transitions()
        .wrap_err("configure backend refusal")
}
