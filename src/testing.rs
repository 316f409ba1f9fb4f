//! In-memory user service for tests.

use std::cell::{Cell, RefCell};

use crate::client::UserApi;
use crate::error::{Result, UserSyncError};
use crate::types::{User, UserFields, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Create,
    Update(UserId),
    Delete(UserId),
}

/// In-memory user service with the same rules as the real backend.
#[derive(Default)]
pub struct FakeService {
    pub users: RefCell<Vec<User>>,
    next_id: Cell<UserId>,
    calls: RefCell<Vec<Op>>,
    failures: RefCell<Vec<(Op, u16, Option<&'static str>)>>,
}

impl FakeService {
    pub fn with_users(users: &[(&str, &str)]) -> Self {
        let service = Self::default();
        for (username, email) in users {
            service.insert(username, email);
        }
        service
    }

    pub fn insert(&self, username: &str, email: &str) -> User {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let user = User {
            id,
            username: username.to_string(),
            email: email.to_lowercase(),
        };
        self.users.borrow_mut().push(user.clone());
        user
    }

    pub fn fail(&self, op: Op, status: u16, message: Option<&'static str>) {
        self.failures.borrow_mut().push((op, status, message));
    }

    fn call(&self, op: Op) -> Result<()> {
        self.calls.borrow_mut().push(op);
        let mut failures = self.failures.borrow_mut();
        if let Some(pos) = failures.iter().position(|(f, _, _)| *f == op) {
            let (_, status, message) = failures.remove(pos);
            return Err(UserSyncError::Api {
                status,
                message: message.map(String::from),
            });
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.borrow().clone()
    }

    pub fn mutations(&self) -> usize {
        self.calls().iter().filter(|op| **op != Op::List).count()
    }
}

impl UserApi for FakeService {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.call(Op::List)?;
        Ok(self.users.borrow().clone())
    }

    async fn create_user(&self, fields: &UserFields) -> Result<User> {
        self.call(Op::Create)?;
        let taken = self
            .users
            .borrow()
            .iter()
            .any(|u| u.username == fields.username || u.email == fields.email);
        if taken {
            return Err(UserSyncError::Api {
                status: 400,
                message: Some("Username or email already exists".to_string()),
            });
        }
        Ok(self.insert(&fields.username, &fields.email))
    }

    async fn update_user(&self, id: UserId, fields: &UserFields) -> Result<User> {
        self.call(Op::Update(id))?;
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserSyncError::Api {
                status: 404,
                message: Some("User not found".to_string()),
            })?;
        user.username = fields.username.clone();
        user.email = fields.email.clone();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        self.call(Op::Delete(id))?;
        self.users.borrow_mut().retain(|u| u.id != id);
        Ok(())
    }
}
