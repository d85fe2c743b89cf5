//! Then steps for draft reconciliation BDD scenarios.

use super::world::{DraftWorld, run_async};
use rstest_bdd_macros::then;
use std::sync::atomic::Ordering;
use taskdesk::draft::{
    ports::{DraftService, LocalDraftStore},
    services::{DraftState, LoadSource},
};

#[then("the local draft matches the form")]
fn local_matches_form(world: &DraftWorld) -> Result<(), eyre::Report> {
    let stored = world
        .store
        .load()
        .ok_or_else(|| eyre::eyre!("no local draft stored"))?;
    let form = world.reconciler.form();
    if stored.form() != &form {
        return Err(eyre::eyre!(
            "local draft {:?} differs from form {form:?}",
            stored.form()
        ));
    }
    Ok(())
}

#[then(r#"the draft state is "{state}""#)]
fn draft_state_is(world: &DraftWorld, state: String) -> Result<(), eyre::Report> {
    let expected = match state.as_str() {
        "empty" => DraftState::Empty,
        "dirty" => DraftState::DirtyUnsaved,
        "synced" => DraftState::Synced,
        other => return Err(eyre::eyre!("unknown draft state in scenario: {other}")),
    };
    let actual = world.reconciler.state();
    if actual != expected {
        return Err(eyre::eyre!("expected state {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("confirmation was requested {count:usize} times")]
fn confirmation_requested(world: &DraftWorld, count: usize) -> Result<(), eyre::Report> {
    let prompt = world
        .prompt
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no prompt recorded in scenario world"))?;
    let asked = prompt.asked.load(Ordering::SeqCst);
    if asked != count {
        return Err(eyre::eyre!("expected {count} confirmations, got {asked}"));
    }
    Ok(())
}

#[then("the form is empty")]
fn form_is_empty(world: &DraftWorld) -> Result<(), eyre::Report> {
    if world.reconciler.form().is_meaningful() {
        return Err(eyre::eyre!("form still holds data"));
    }
    Ok(())
}

#[then(r#"the form project name is "{project}""#)]
fn form_project_is(world: &DraftWorld, project: String) -> Result<(), eyre::Report> {
    let form = world.reconciler.form();
    if form.project_name() != project {
        return Err(eyre::eyre!(
            "expected project {project}, found {}",
            form.project_name()
        ));
    }
    Ok(())
}

#[then("the task is created")]
fn task_is_created(world: &DraftWorld) -> Result<(), eyre::Report> {
    match &world.last_create_result {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected a created task, got {other:?}")),
    }
}

#[then("no local draft remains")]
fn no_local_draft(world: &DraftWorld) -> Result<(), eyre::Report> {
    if let Some(snapshot) = world.store.load() {
        return Err(eyre::eyre!("local draft still stored: {snapshot:?}"));
    }
    Ok(())
}

#[then("no remote draft remains")]
fn no_remote_draft(world: &DraftWorld) -> Result<(), eyre::Report> {
    let latest = run_async(world.drafts.fetch_latest())
        .map_err(|err| eyre::eyre!("latest draft query failed: {err}"))?;
    if let Some(draft) = latest {
        return Err(eyre::eyre!("remote draft still stored: {draft:?}"));
    }
    Ok(())
}

#[then(r#"task creation fails with "{message}""#)]
fn task_creation_fails(world: &DraftWorld, message: String) -> Result<(), eyre::Report> {
    let Some(Err(err)) = &world.last_create_result else {
        return Err(eyre::eyre!(
            "expected a failed creation, got {:?}",
            world.last_create_result
        ));
    };
    if err.user_message() != message {
        return Err(eyre::eyre!(
            "expected message {message:?}, got {:?}",
            err.user_message()
        ));
    }
    Ok(())
}

#[then("no task was sent to the backend")]
fn no_task_sent(world: &DraftWorld) -> Result<(), eyre::Report> {
    let calls = world.tasks.calls().create;
    if calls != 0 {
        return Err(eyre::eyre!("expected no create calls, got {calls}"));
    }
    Ok(())
}

#[then("exactly {count:usize} remote drafts exist")]
fn remote_draft_count(world: &DraftWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.drafts.len();
    if stored != count {
        return Err(eyre::eyre!("expected {count} remote drafts, found {stored}"));
    }
    Ok(())
}

#[then(r#"the remote draft project name is "{project}""#)]
fn remote_draft_project(world: &DraftWorld, project: String) -> Result<(), eyre::Report> {
    let latest = run_async(world.drafts.fetch_latest())
        .map_err(|err| eyre::eyre!("latest draft query failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("no remote draft stored"))?;
    if latest.form.project_name() != project {
        return Err(eyre::eyre!(
            "expected remote project {project}, found {}",
            latest.form.project_name()
        ));
    }
    Ok(())
}

#[then("the draft was loaded from the server")]
fn loaded_from_server(world: &DraftWorld) -> Result<(), eyre::Report> {
    match &world.last_load_source {
        Some(LoadSource::Remote(_)) => Ok(()),
        other => Err(eyre::eyre!("expected a server load, got {other:?}")),
    }
}
