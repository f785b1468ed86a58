use reqwest::Method;
use tracing::info;
use crate::client::ApiClient;
use crate::core::errors::ClientError;
use crate::models::models::Profile;
use crate::users::profile_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Unfollow,
}

impl FollowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowAction::Follow => "follow",
            FollowAction::Unfollow => "unfollow",
        }
    }
}

impl ApiClient {
    pub async fn follow(&self, name: &str) -> Result<Profile, ClientError> {
        self.set_following(name, FollowAction::Follow).await
    }

    pub async fn unfollow(&self, name: &str) -> Result<Profile, ClientError> {
        self.set_following(name, FollowAction::Unfollow).await
    }

    /// Sends the follow change, then re-reads the profile so counts come from the server.
    pub async fn set_following(&self, name: &str, action: FollowAction) -> Result<Profile, ClientError> {
        if name.trim().is_empty() {
            return Err(ClientError::Validation("Profile name is required".to_string()));
        }
        let token = self.require_token()?;

        let url = self.social_endpoint(&format!("{}/{}", profile_path(name), action.as_str()));
        let request = self.request(Method::PUT, &url, Some(token));
        self.send(request, "Something went wrong. Try again.").await?;
        info!(profile = name, action = action.as_str(), "Follow state changed");

        self.fetch_profile(name).await
    }
}
