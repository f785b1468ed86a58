use tracing::{error, warn};
use crate::config::LOGIN_PAGE;
use crate::core::storage::KeyValueStore;
use crate::dialog::Dialog;
use crate::posts::Deletion;
use crate::views::{render_posts, FeedView};
use super::feed::delete_failed;
use super::{create_from_form, FormFields, PageContext, PageOutcome};

pub async fn load_my_posts<S: KeyValueStore, D: Dialog>(ctx: &PageContext<S, D>) -> PageOutcome<FeedView> {
    if !ctx.has_session() {
        warn!("No token found. Redirecting to login...");
        return PageOutcome::Redirect(LOGIN_PAGE.to_string());
    }

    match ctx.client.fetch_my_posts().await {
        Ok(posts) => PageOutcome::Rendered(render_posts(&posts, ctx.viewer(), ctx.locale())),
        Err(e) => {
            error!("Error fetching your posts: {}", e);
            PageOutcome::Failed("Could not load your posts. Please log in again.".to_string())
        }
    }
}

pub async fn submit_post<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    form: &FormFields,
) -> PageOutcome<FeedView> {
    match create_from_form(ctx, form).await {
        Ok(()) => load_my_posts(ctx).await,
        Err(message) => PageOutcome::Failed(message),
    }
}

/// Deletes and reloads the list from the server.
pub async fn delete_my_post<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    view: &mut FeedView,
    post_id: &str,
) -> PageOutcome<Deletion> {
    match ctx.client.delete_post(post_id, &ctx.dialog).await {
        Ok(Deletion::Deleted) => {
            ctx.dialog.alert("Post deleted successfully!");
            match load_my_posts(ctx).await {
                PageOutcome::Rendered(fresh) => {
                    *view = fresh;
                    PageOutcome::Rendered(Deletion::Deleted)
                }
                PageOutcome::Redirect(to) => PageOutcome::Redirect(to),
                PageOutcome::Failed(msg) => PageOutcome::Failed(msg),
            }
        }
        Ok(Deletion::Cancelled) => PageOutcome::Rendered(Deletion::Cancelled),
        Err(e) => delete_failed(ctx, e),
    }
}
