//! Given steps for draft reconciliation BDD scenarios.

use super::world::{DraftWorld, run_async};
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskdesk::draft::{
    domain::{DraftForm, DraftSnapshot, TextField},
    ports::LocalDraftStore,
    services::AutosaveOutcome,
};

#[given("an empty assign-task form")]
fn empty_form(world: &mut DraftWorld) {
    world.reconciler.edit(|form| *form = DraftForm::new());
}

#[given(r#"an assign-task form for project "{project}" and task "{task}""#)]
fn filled_form(world: &mut DraftWorld, project: String, task: String) {
    world.reconciler.edit(|form| {
        form.set_text(TextField::ProjectName, project);
        form.set_text(TextField::TaskName, task);
    });
}

#[given("the draft has been autosaved")]
fn draft_autosaved(world: &mut DraftWorld) -> Result<(), eyre::Report> {
    match run_async(world.reconciler.autosave_tick()) {
        AutosaveOutcome::Saved(_) => Ok(()),
        other => Err(eyre::eyre!("expected the autosave to reach the server, got {other:?}")),
    }
}

#[given("the remote draft is deleted by someone else")]
fn remote_draft_deleted(world: &mut DraftWorld) -> Result<(), eyre::Report> {
    let id = world
        .reconciler
        .draft_id()
        .ok_or_else(|| eyre::eyre!("no remote draft tracked in scenario world"))?;
    world.drafts.remove_externally(&id);
    Ok(())
}

#[given(r#"the local draft is overwritten with project "{project}""#)]
fn local_draft_overwritten(world: &mut DraftWorld, project: String) {
    let form = DraftForm::new().with_text(TextField::ProjectName, project);
    world
        .store
        .save(&DraftSnapshot::capture(None, form, &DefaultClock));
}
