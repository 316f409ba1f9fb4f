use crate::cli::{AddArgs, DeleteArgs, UpdateArgs};
use crate::client::UserApi;
use crate::error::{Result, UserSyncError};
use crate::output;
use crate::prompt::{AssumeYes, StdinConfirm};
use crate::sync::{Outcome, UserListSynchronizer};

/// Turn a failed outcome into the error held in the slot.
fn check<A: UserApi>(sync: &UserListSynchronizer<A>, outcome: Outcome) -> Result<()> {
    if outcome.is_failed() {
        let message = sync.error().unwrap_or("Request failed").to_string();
        return Err(UserSyncError::Failed(message));
    }
    Ok(())
}

/// Show the list after a mutation, plus any error left by the re-fetch.
fn show_result<A: UserApi>(sync: &UserListSynchronizer<A>) {
    if let Some(error) = sync.error() {
        output::print_error(error);
    } else if !output::is_quiet() {
        output::print_users(sync.users());
    }
}

pub async fn list<A: UserApi>(api: A) -> Result<()> {
    let sync = UserListSynchronizer::connect(api).await;

    if let Some(error) = sync.error() {
        return Err(UserSyncError::Failed(error.to_string()));
    }

    output::print_users(sync.users());
    Ok(())
}

pub async fn add<A: UserApi>(api: A, args: AddArgs) -> Result<()> {
    let mut sync = UserListSynchronizer::new(api);

    let form = sync.form_mut();
    form.set_username(args.username);
    form.set_email(args.email);
    form.validate()?;

    let username = sync.form().username.clone();
    let outcome = sync.submit().await;
    check(&sync, outcome)?;

    output::print_message(&format!("Created user {username}"));
    show_result(&sync);
    Ok(())
}

pub async fn update<A: UserApi>(api: A, args: UpdateArgs) -> Result<()> {
    let mut sync = UserListSynchronizer::connect(api).await;
    if let Some(error) = sync.error() {
        return Err(UserSyncError::Failed(error.to_string()));
    }

    sync.edit(args.id)?;

    let form = sync.form_mut();
    if let Some(username) = args.username {
        form.set_username(username);
    }
    if let Some(email) = args.email {
        form.set_email(email);
    }
    form.validate()?;

    let outcome = sync.submit().await;
    check(&sync, outcome)?;

    output::print_message(&format!("Updated user {}", args.id));
    show_result(&sync);
    Ok(())
}

pub async fn delete<A: UserApi>(api: A, args: DeleteArgs) -> Result<()> {
    let mut sync = UserListSynchronizer::new(api);

    let outcome = if args.yes {
        sync.remove(args.id, &mut AssumeYes).await
    } else {
        sync.remove(args.id, &mut StdinConfirm).await
    };

    match outcome {
        Outcome::Declined => output::print_message("Aborted."),
        Outcome::Failed => check(&sync, outcome)?,
        Outcome::Applied => {
            output::print_message(&format!("Deleted user {}", args.id));
            show_result(&sync);
        }
    }
    Ok(())
}
