//! Given steps for shared list BDD scenarios.

use super::world::{ListWorld, run_async, user};
use crosslist::todo::domain::IssueFields;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#""{sender}" sent "{message}" to "{receiver}""#)]
fn issue_was_sent(
    world: &mut ListWorld,
    sender: String,
    message: String,
    receiver: String,
) -> Result<(), eyre::Report> {
    let fields = IssueFields::new(message.as_str()).wrap_err("build issue fields")?;
    let outcome = run_async(
        world
            .service
            .send_issue(&user(&sender)?, &user(&receiver)?, fields),
    )
    .wrap_err("send issue for scenario setup")?;
    world.sent.insert(message, outcome);
    Ok(())
}

#[given(r#""{receiver}" accepted "{message}""#)]
fn issue_was_accepted(
    world: &mut ListWorld,
    receiver: String,
    message: String,
) -> Result<(), eyre::Report> {
    let owner = user(&receiver)?;
    let issue = world.copy_of(&owner, &message)?;
    run_async(world.service.accept_issue(&owner, issue))
        .wrap_err("accept issue for scenario setup")?;
    Ok(())
}
