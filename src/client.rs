use const_format::concatcp;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;
use url::Url;

use crate::error::{Result, UserSyncError};
use crate::types::{User, UserFields, UserId};

const USER_AGENT: &str = concatcp!("usersync/", env!("CARGO_PKG_VERSION"));

/// The four calls of the user-service contract.
///
/// Any non-2xx response must surface as [`UserSyncError::Api`], carrying the
/// `error` field of the failure payload when the server sent one.
pub trait UserApi {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn create_user(&self, fields: &UserFields) -> Result<User>;
    async fn update_user(&self, id: UserId, fields: &UserFields) -> Result<User>;
    async fn delete_user(&self, id: UserId) -> Result<()>;
}

impl<T: UserApi> UserApi for &T {
    async fn list_users(&self) -> Result<Vec<User>> {
        (**self).list_users().await
    }

    async fn create_user(&self, fields: &UserFields) -> Result<User> {
        (**self).create_user(fields).await
    }

    async fn update_user(&self, id: UserId, fields: &UserFields) -> Result<User> {
        (**self).update_user(id, fields).await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        (**self).delete_user(id).await
    }
}

pub struct UsersClient {
    http: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

impl UsersClient {
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(UserSyncError::InvalidUrl {
                url: base_url.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    /// `{base}/users` or `{base}/users/{id}`, keeping any path prefix of the base.
    fn endpoint(&self, id: Option<UserId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        Ok(Self::check(response).await?.json().await?)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(UserSyncError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Extract the human-readable `error` field from a failure body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.error)
        .filter(|message| !message.is_empty())
}

impl UserApi for UsersClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.endpoint(None);
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        Self::json(response).await
    }

    async fn create_user(&self, fields: &UserFields) -> Result<User> {
        let url = self.endpoint(None);
        debug!(%url, username = %fields.username, "POST");
        let response = self.http.post(url).json(fields).send().await?;
        Self::json(response).await
    }

    async fn update_user(&self, id: UserId, fields: &UserFields) -> Result<User> {
        let url = self.endpoint(Some(id));
        debug!(%url, username = %fields.username, "PUT");
        let response = self.http.put(url).json(fields).send().await?;
        Self::json(response).await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        let url = self.endpoint(Some(id));
        debug!(%url, "DELETE");
        let response = self.http.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
