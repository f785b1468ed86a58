use tracing::{debug, error};
use crate::config::{FEED_PAGE, LOGIN_PAGE, MY_POSTS_PAGE};
use crate::core::errors::ClientError;
use crate::core::storage::KeyValueStore;
use crate::dialog::Dialog;
use crate::models::models::PostDraft;
use crate::views::PostFormView;
use super::{field, query_param, FormFields, PageContext, PageOutcome};

/// `/edit.html?id=..`: fills `#editForm` from the stored post.
pub async fn load_edit_form<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    location: &str,
) -> PageOutcome<PostFormView> {
    if !ctx.has_session() {
        ctx.dialog.alert("You must be logged in to edit a post.");
        return PageOutcome::Redirect(LOGIN_PAGE.to_string());
    }

    let Some(post_id) = query_param(location, "id") else {
        ctx.dialog.alert("No post ID provided.");
        return PageOutcome::Redirect(MY_POSTS_PAGE.to_string());
    };

    match ctx.client.fetch_post(&post_id).await {
        Ok(post) => {
            debug!(post_id = %post.id, "Loaded post for editing");
            PageOutcome::Rendered(PostFormView::from(&post))
        }
        Err(e) => {
            error!("Error fetching post: {}", e);
            let message = match e.status() {
                Some(status) => format!("Could not load post (status {}).", status),
                None => "Could not load post details.".to_string(),
            };
            ctx.dialog.alert(&message);
            PageOutcome::Failed(message)
        }
    }
}

/// `#editForm` submit: replaces the post and returns to the feed.
pub async fn submit_edit<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    post_id: &str,
    form: &FormFields,
) -> PageOutcome<()> {
    let draft = PostDraft::new(field(form, "title"), field(form, "body"), Some(field(form, "image")));
    let result = match draft {
        Ok(draft) => ctx.client.update_post(post_id, &draft).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => {
            ctx.dialog.alert("Post updated successfully!");
            PageOutcome::Redirect(FEED_PAGE.to_string())
        }
        Err(ClientError::Validation(msg)) => {
            ctx.dialog.alert(&msg);
            PageOutcome::Failed(msg)
        }
        Err(e) => {
            error!("Error updating post: {}", e);
            ctx.dialog.alert("Could not update post. Please try again.");
            PageOutcome::Failed(e.message().to_string())
        }
    }
}

/// `#cancelBtn`.
pub fn cancel_edit() -> PageOutcome<()> {
    PageOutcome::Redirect(FEED_PAGE.to_string())
}
