use reqwest::Method;
use crate::client::ApiClient;
use crate::core::errors::ClientError;
use crate::models::models::{Post, Profile};

pub(crate) fn profile_path(name: &str) -> String {
    format!("/profiles/{}", urlencoding::encode(name.trim()))
}

impl ApiClient {
    /// Profile with follower and following lists expanded.
    pub async fn fetch_profile(&self, name: &str) -> Result<Profile, ClientError> {
        if name.trim().is_empty() {
            return Err(ClientError::Validation("Profile name is required".to_string()));
        }
        let token = self.require_token()?;

        let url = self.social_endpoint(&format!("{}?_followers=true&_following=true", profile_path(name)));
        let request = self.request(Method::GET, &url, Some(token));

        self.send_enveloped(request, "Failed to load profile").await
    }

    pub async fn fetch_profile_posts(&self, name: &str) -> Result<Vec<Post>, ClientError> {
        let token = self.require_token()?;

        let url = self.social_endpoint(&format!("{}/posts", profile_path(name)));
        let request = self.request(Method::GET, &url, Some(token));

        self.send_list(request, "Failed to load posts").await
    }
}
