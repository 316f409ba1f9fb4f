//! Form fields bound to the username/email inputs.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, UserSyncError};
use crate::types::UserFields;

// Same shape a browser accepts for an `email` input: something@something, no spaces.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing,
}

impl FormMode {
    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Creating => "Add User",
            FormMode::Editing => "Update User",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
}

impl UserForm {
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.email.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.email.is_empty()
    }

    /// Input-layer checks run before a submit is allowed through.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(UserSyncError::InvalidForm(
                "Username is required".to_string(),
            ));
        }
        if self.email.trim().is_empty() {
            return Err(UserSyncError::InvalidForm("Email is required".to_string()));
        }
        if !EMAIL_SHAPE.is_match(self.email.trim()) {
            return Err(UserSyncError::InvalidForm(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }

    pub fn to_fields(&self) -> UserFields {
        UserFields {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

impl From<UserFields> for UserForm {
    fn from(fields: UserFields) -> Self {
        Self {
            username: fields.username,
            email: fields.email,
        }
    }
}
