//! Then steps for shared list BDD scenarios.

use super::world::{ListWorld, run_async, user};
use crosslist::todo::{
    domain::{IssueStatus, ListKind},
    ports::{IssueRegistry, ReferenceDirectory},
};
use rstest_bdd_macros::then;

fn ensure_empty(world: &ListWorld, owner: &str, list: ListKind) -> Result<(), eyre::Report> {
    let entries = run_async(world.store.list(&user(owner)?, list))
        .map_err(|err| eyre::eyre!("cannot read {list} list of {owner}: {err}"))?;
    if !entries.is_empty() {
        return Err(eyre::eyre!(
            "expected the {list} list of {owner} to be empty, found {} entries",
            entries.len()
        ));
    }
    Ok(())
}

#[then(r#"the outgoing list of "{owner}" is empty"#)]
fn outgoing_list_is_empty(world: &ListWorld, owner: String) -> Result<(), eyre::Report> {
    ensure_empty(world, &owner, ListKind::Outgoing)
}

#[then(r#"the incoming list of "{owner}" is empty"#)]
fn incoming_list_is_empty(world: &ListWorld, owner: String) -> Result<(), eyre::Report> {
    ensure_empty(world, &owner, ListKind::Incoming)
}

#[then(r#"the copy of "{message}" held by "{owner}" is completed"#)]
fn copy_is_completed(
    world: &ListWorld,
    message: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let issue = world.copy_of(&user(&owner)?, &message)?;
    let stored = run_async(world.store.issue(issue))
        .map_err(|err| eyre::eyre!("cannot load issue {issue}: {err}"))?;
    if stored.status() != IssueStatus::Completed {
        return Err(eyre::eyre!(
            "expected {message:?} of {owner} to be completed, found {}",
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the removal was made by the receiver")]
fn removal_by_receiver(world: &ListWorld) -> Result<(), eyre::Report> {
    let removal = world
        .last_removal
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing removal outcome in scenario world"))?;
    if removal.is_sender {
        return Err(eyre::eyre!("expected a decline, got a removal by the sender"));
    }
    if removal.foreign_list != Some(ListKind::Outgoing) {
        return Err(eyre::eyre!(
            "expected the sender copy to leave the outgoing list, got {:?}",
            removal.foreign_list
        ));
    }
    Ok(())
}

#[then(r#""{message}" is at the front of the incoming list of "{owner}""#)]
fn issue_at_front_of_incoming(
    world: &ListWorld,
    message: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let receiver = user(&owner)?;
    let expected = world.copy_of(&receiver, &message)?;
    let entries = run_async(world.store.list(&receiver, ListKind::Incoming))
        .map_err(|err| eyre::eyre!("cannot read incoming list of {owner}: {err}"))?;
    let front = entries
        .first()
        .ok_or_else(|| eyre::eyre!("incoming list of {owner} is empty"))?;
    if front.issue() != expected {
        return Err(eyre::eyre!(
            "expected {message:?} at the front of the incoming list of {owner}"
        ));
    }
    Ok(())
}

#[then("the operation fails because the list is empty")]
fn fails_with_empty_list(world: &ListWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(err) if err.is_empty_list() => Ok(()),
        other => Err(eyre::eyre!("expected an empty list error, got {other:?}")),
    }
}

#[then("the operation fails as a self assignment")]
fn fails_with_self_assignment(world: &ListWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(crosslist::todo::services::ListSyncError::SelfAssignment(_)) => Ok(()),
        other => Err(eyre::eyre!("expected a self assignment error, got {other:?}")),
    }
}
