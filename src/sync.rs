//! Local mirror of the server's user collection.
//!
//! [`UserListSynchronizer`] owns the list, the form and the error slot, and is
//! only changed through its operations. Mutations go to the server first and
//! the list is then re-fetched in full, never patched locally, so whatever the
//! server did to the record (normalization, deduplication) shows up as is.
//!
//! Operations never return their failure: it lands in the error slot, and the
//! returned [`Outcome`] only says whether the call went through.

use tracing::{info, warn};

use crate::client::UserApi;
use crate::error::{Result, UserSyncError};
use crate::form::{FormMode, UserForm};
use crate::prompt::{Confirm, DELETE_CONFIRMATION};
use crate::types::{User, UserId};

pub const FETCH_FAILED: &str = "Failed to fetch users";
pub const CREATE_FAILED: &str = "Failed to create user";
pub const UPDATE_FAILED: &str = "Failed to update user";
pub const DELETE_FAILED: &str = "Failed to delete user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    /// The confirmation guard said no; nothing was sent.
    Declined,
}

impl Outcome {
    pub fn is_failed(self) -> bool {
        self == Outcome::Failed
    }
}

pub struct UserListSynchronizer<A> {
    api: A,
    users: Vec<User>,
    form: UserForm,
    edit_target: Option<User>,
    error: Option<String>,
}

impl<A: UserApi> UserListSynchronizer<A> {
    /// An empty mirror in Creating mode. Nothing is fetched yet.
    pub fn new(api: A) -> Self {
        Self {
            api,
            users: Vec::new(),
            form: UserForm::default(),
            edit_target: None,
            error: None,
        }
    }

    /// Build the synchronizer and load the initial collection.
    pub async fn connect(api: A) -> Self {
        let mut sync = Self::new(api);
        sync.refresh().await;
        sync
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub fn edit_target(&self) -> Option<&User> {
        self.edit_target.as_ref()
    }

    pub fn mode(&self) -> FormMode {
        if self.edit_target.is_some() {
            FormMode::Editing
        } else {
            FormMode::Creating
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Replace the mirror with the server's collection. On failure the stale
    /// list stays in place.
    pub async fn refresh(&mut self) -> Outcome {
        match self.api.list_users().await {
            Ok(users) => {
                self.users = users;
                Outcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "Error fetching users");
                self.error = Some(FETCH_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    /// Create a user from the form, or update the edit target if there is one.
    ///
    /// On failure the form keeps its values so the input can be corrected and
    /// submitted again, and no refresh happens.
    pub async fn submit(&mut self) -> Outcome {
        let fields = self.form.to_fields();

        let (result, fallback) = match &self.edit_target {
            Some(target) => (
                self.api.update_user(target.id, &fields).await,
                UPDATE_FAILED,
            ),
            None => (self.api.create_user(&fields).await, CREATE_FAILED),
        };

        let saved = match result {
            Ok(user) => user,
            Err(e) => {
                let verb = if self.edit_target.is_some() {
                    "updating"
                } else {
                    "creating"
                };
                warn!(error = %e, "Error {verb} user");
                self.error = Some(failure_message(&e, fallback));
                return Outcome::Failed;
            }
        };

        match self.edit_target.take() {
            Some(_) => info!(id = saved.id, "Updated user"),
            None => info!(id = saved.id, username = %saved.username, "Created user"),
        }
        self.form.clear();
        self.error = None;

        // A failed re-fetch is still reported through the error slot.
        self.refresh().await;
        Outcome::Applied
    }

    /// Load a user from the mirror into the form and switch to Editing.
    pub fn edit(&mut self, id: UserId) -> Result<()> {
        let user = self.find(id).cloned().ok_or(UserSyncError::UserNotFound(id))?;
        self.form = UserForm::from(user.fields());
        self.edit_target = Some(user);
        self.error = None;
        Ok(())
    }

    /// Delete a user after `confirm` agrees. Declining sends nothing.
    pub async fn remove(&mut self, id: UserId, confirm: &mut impl Confirm) -> Outcome {
        if !confirm.confirm(DELETE_CONFIRMATION) {
            return Outcome::Declined;
        }

        if let Err(e) = self.api.delete_user(id).await {
            warn!(error = %e, id, "Error deleting user");
            self.error = Some(failure_message(&e, DELETE_FAILED));
            return Outcome::Failed;
        }

        info!(id, "Deleted user");
        self.error = None;
        self.refresh().await;
        Outcome::Applied
    }

    /// Cancel: back to an empty form in Creating mode.
    pub fn reset_form(&mut self) {
        self.form.clear();
        self.edit_target = None;
        self.error = None;
    }
}

fn failure_message(err: &UserSyncError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}
