use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a user.
pub type UserId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl User {
    /// The editable part of the user, as sent in create/update bodies.
    pub fn fields(&self) -> UserFields {
        UserFields {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Request body for `POST /users` and `PUT /users/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    pub username: String,
    pub email: String,
}
