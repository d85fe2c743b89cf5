//! When steps for draft reconciliation BDD scenarios.

use super::world::{CountingPrompt, DraftWorld, run_async};
use rstest_bdd_macros::when;
use taskdesk::draft::domain::TextField;

#[when(r#"the user types "{project}" as the project name"#)]
fn user_types_project(world: &mut DraftWorld, project: String) {
    world
        .reconciler
        .edit(|form| form.set_text(TextField::ProjectName, project));
}

#[when("the autosave timer fires")]
fn autosave_fires(world: &mut DraftWorld) {
    run_async(world.reconciler.autosave_tick());
}

#[when(r#"the user clears the form answering "{answer}""#)]
fn user_clears_form(world: &mut DraftWorld, answer: String) -> Result<(), eyre::Report> {
    let reply = match answer.as_str() {
        "yes" => true,
        "no" => false,
        other => return Err(eyre::eyre!("unsupported prompt answer in scenario: {other}")),
    };
    let prompt = CountingPrompt {
        answer: reply,
        ..CountingPrompt::default()
    };
    run_async(world.reconciler.clear_form(&prompt));
    world.prompt = Some(prompt);
    Ok(())
}

#[when("the user creates the task")]
fn user_creates_task(world: &mut DraftWorld) {
    world.last_create_result = Some(run_async(world.reconciler.create_task()));
}

#[when("the view is reopened")]
fn view_reopened(world: &mut DraftWorld) {
    world.reconciler = DraftWorld::open(&world.store, &world.drafts, &world.tasks);
    world.last_load_source = Some(run_async(world.reconciler.load_on_mount()));
}
