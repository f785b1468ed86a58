use reqwest::Method;
use tracing::{info, warn};
use crate::client::ApiClient;
use crate::config::CONFIRM_DELETE_MESSAGE;
use crate::core::errors::ClientError;
use crate::dialog::Dialog;
use crate::models::models::{Post, PostDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Cancelled,
}

fn post_path(id: &str) -> String {
    format!("/posts/{}", urlencoding::encode(id.trim()))
}

impl ApiClient {
    /// Posts from every author, newest first as the server orders them.
    pub async fn fetch_all_posts(&self) -> Result<Vec<Post>, ClientError> {
        let token = self.require_token()?;
        let request = self.request(Method::GET, &self.social_endpoint("/posts?_author=true"), Some(token));

        self.send_list(request, "Failed to fetch posts. Please try again.").await
    }

    /// Readable without a session; the token is sent when there is one.
    pub async fn fetch_post(&self, id: &str) -> Result<Post, ClientError> {
        if id.trim().is_empty() {
            return Err(ClientError::Validation("No post ID provided.".to_string()));
        }
        let request = self.request(Method::GET, &self.social_endpoint(&post_path(id)), self.token());

        self.send_enveloped(request, "Failed to load post.").await
    }

    /// Posts of the logged-in user. Posts without an owner are attributed to the session user.
    pub async fn fetch_my_posts(&self) -> Result<Vec<Post>, ClientError> {
        let token = self.require_token()?;
        let user = self.viewer().ok_or_else(|| {
            ClientError::Auth("No auth token or user info found. Please log in.".to_string())
        })?;

        let path = format!("/profiles/{}/posts", urlencoding::encode(&user.name));
        let request = self.request(Method::GET, &self.social_endpoint(&path), Some(token));
        let mut posts: Vec<Post> = self
            .send_list(request, "Failed to fetch your posts. Please try again.")
            .await?;

        for post in posts.iter_mut() {
            let attributed = match &post.owner {
                None => true,
                Some(owner) => owner.id.is_none() && owner.name == user.name,
            };
            if attributed {
                post.owner = Some(user.clone());
            }
        }
        Ok(posts)
    }

    pub async fn create_post(&self, title: &str, body: &str, media_url: Option<&str>) -> Result<Post, ClientError> {
        let draft = PostDraft::new(title, body, media_url)?;
        let token = self.require_token()?;

        let request = self
            .request(Method::POST, &self.social_endpoint("/posts"), Some(token))
            .json(&draft);
        let post: Post = self
            .send_enveloped(request, "Failed to create post. Please try again.")
            .await?;

        info!(post_id = %post.id, "Created post");
        Ok(post)
    }

    /// Full replace of title, body and media.
    pub async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post, ClientError> {
        let token = self.require_token()?;

        let request = self
            .request(Method::PUT, &self.social_endpoint(&post_path(id)), Some(token))
            .json(draft);
        let post: Post = self.send_enveloped(request, "Update failed").await?;

        info!(post_id = %post.id, "Updated post");
        Ok(post)
    }

    /// Asks for confirmation first. A declined prompt sends nothing.
    pub async fn delete_post(&self, id: &str, dialog: &dyn Dialog) -> Result<Deletion, ClientError> {
        let token = self.require_token()?;

        if !dialog.confirm(CONFIRM_DELETE_MESSAGE) {
            return Ok(Deletion::Cancelled);
        }

        let request = self.request(Method::DELETE, &self.social_endpoint(&post_path(id)), Some(token));
        match self.send(request, "Failed to delete post.").await {
            Ok(_) => {
                info!(post_id = id, "Deleted post");
                Ok(Deletion::Deleted)
            }
            Err(e) => {
                warn!(post_id = id, "Failed to delete post: {}", e);
                Err(e)
            }
        }
    }
}
