use tracing::error;
use crate::config::FEED_PAGE;
use crate::core::storage::KeyValueStore;
use crate::dialog::Dialog;
use crate::posts::Deletion;
use crate::views::{render_post, PostCard};
use super::feed::delete_failed;
use super::{query_param, PageContext, PageOutcome};

/// `/post.html?id=..` into `#postContainer`. Works without a session.
pub async fn load_post<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    location: &str,
) -> PageOutcome<PostCard> {
    let Some(post_id) = query_param(location, "id") else {
        return PageOutcome::Failed("No post ID provided.".to_string());
    };

    match ctx.client.fetch_post(&post_id).await {
        Ok(post) => PageOutcome::Rendered(render_post(&post, ctx.viewer(), ctx.locale())),
        Err(e) => {
            error!("Error loading post: {}", e);
            PageOutcome::Failed("Could not load post details.".to_string())
        }
    }
}

/// `#deleteBtn`: back to the feed once the post is gone.
pub async fn delete_post<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    post_id: &str,
) -> PageOutcome<Deletion> {
    match ctx.client.delete_post(post_id, &ctx.dialog).await {
        Ok(Deletion::Deleted) => {
            ctx.dialog.alert("Post deleted successfully.");
            PageOutcome::Redirect(FEED_PAGE.to_string())
        }
        Ok(Deletion::Cancelled) => PageOutcome::Rendered(Deletion::Cancelled),
        Err(e) => delete_failed(ctx, e),
    }
}
