//! User operations.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::pagination::{ListOptions, Page};
use crate::query::segment;
use crate::types::User;
use serde::Serialize;

/// Service for user operations.
pub struct UsersService<'a> {
    client: &'a GitHubClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Gets a user by username.
    pub async fn get(&self, username: &str) -> GitHubResult<User> {
        self.client
            .get(&format!("/users/{}", segment("username", username)?))
            .await
    }

    /// Gets the authenticated user.
    pub async fn get_authenticated(&self) -> GitHubResult<User> {
        self.client.get("/user").await
    }

    /// Edits the authenticated user's profile. Only fields set on `user` are changed.
    pub async fn edit(&self, user: &User) -> GitHubResult<User> {
        self.client.patch("/user", user).await
    }

    /// Lists every user in sign-up order, starting after the ID in `opts.since`.
    pub async fn list_all(&self, opts: &UserListOptions) -> GitHubResult<Page<User>> {
        self.client.get_page("/users", opts).await
    }

    /// Lists followers of `user`, or of the authenticated user when `None`.
    pub async fn list_followers(&self, user: Option<&str>, opts: &ListOptions) -> GitHubResult<Page<User>> {
        let path = format!("{}/followers", Self::user_base(user)?);
        self.client.get_page(&path, opts).await
    }

    /// Lists users followed by `user`, or by the authenticated user when `None`.
    pub async fn list_following(&self, user: Option<&str>, opts: &ListOptions) -> GitHubResult<Page<User>> {
        let path = format!("{}/following", Self::user_base(user)?);
        self.client.get_page(&path, opts).await
    }

    /// Checks whether `user` (or the authenticated user) follows `target`.
    pub async fn is_following(&self, user: Option<&str>, target: &str) -> GitHubResult<bool> {
        self.client
            .check(&format!(
                "{}/following/{}",
                Self::user_base(user)?,
                segment("target", target)?
            ))
            .await
    }

    /// Follows a user.
    pub async fn follow(&self, username: &str) -> GitHubResult<()> {
        self.client
            .put_empty(&format!("/user/following/{}", segment("username", username)?))
            .await
    }

    /// Unfollows a user.
    pub async fn unfollow(&self, username: &str) -> GitHubResult<()> {
        self.client
            .delete(&format!("/user/following/{}", segment("username", username)?))
            .await
    }

    fn user_base(user: Option<&str>) -> GitHubResult<String> {
        match user {
            Some(user) => Ok(format!("/users/{}", segment("user", user)?)),
            None => Ok("/user".to_string()),
        }
    }
}

/// Options for [`UsersService::list_all`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserListOptions {
    /// Only users with an ID greater than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    /// Items per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}
