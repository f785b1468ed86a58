use tracing::{error, warn};
use crate::config::LOGIN_FORM_PAGE;
use crate::core::errors::ClientError;
use crate::core::storage::KeyValueStore;
use crate::dialog::Dialog;
use crate::posts::Deletion;
use crate::views::{render_posts, FeedView};
use super::{create_from_form, FormFields, PageContext, PageOutcome};

/// `#feedContainer` on load.
pub async fn load_feed<S: KeyValueStore, D: Dialog>(ctx: &PageContext<S, D>) -> PageOutcome<FeedView> {
    if !ctx.has_session() {
        warn!("No token found. Redirecting to login...");
        return PageOutcome::Redirect(LOGIN_FORM_PAGE.to_string());
    }

    match ctx.client.fetch_all_posts().await {
        Ok(posts) => PageOutcome::Rendered(render_posts(&posts, ctx.viewer(), ctx.locale())),
        Err(e) => {
            error!("Error while fetching posts: {}", e);
            PageOutcome::Failed("Failed to load posts. Please log in again.".to_string())
        }
    }
}

/// `#postForm` submit: creates the post and re-renders the feed.
pub async fn submit_post<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    form: &FormFields,
) -> PageOutcome<FeedView> {
    match create_from_form(ctx, form).await {
        Ok(()) => load_feed(ctx).await,
        Err(message) => PageOutcome::Failed(message),
    }
}

/// `.delete-btn` in the feed: deletes, then drops the card without re-fetching.
pub async fn delete_from_feed<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    view: &mut FeedView,
    post_id: &str,
) -> PageOutcome<Deletion> {
    match ctx.client.delete_post(post_id, &ctx.dialog).await {
        Ok(Deletion::Deleted) => {
            view.remove_post(post_id);
            ctx.dialog.alert("Post deleted successfully!");
            PageOutcome::Rendered(Deletion::Deleted)
        }
        Ok(Deletion::Cancelled) => PageOutcome::Rendered(Deletion::Cancelled),
        Err(e) => delete_failed(ctx, e),
    }
}

pub(super) fn delete_failed<S: KeyValueStore, D: Dialog, V>(
    ctx: &PageContext<S, D>,
    err: ClientError,
) -> PageOutcome<V> {
    error!("Error deleting post: {}", err);
    ctx.dialog.alert("Could not delete post. Try again.");
    PageOutcome::Failed(err.message().to_string())
}
