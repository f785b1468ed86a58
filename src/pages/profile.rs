use tracing::error;
use crate::core::errors::ClientError;
use crate::core::storage::KeyValueStore;
use crate::dialog::Dialog;
use crate::follow::FollowAction;
use crate::views::{render_profile, FollowButton, ProfileView};
use super::{query_param, PageContext, PageOutcome};

/// `/profile.html?name=..`, defaulting to the logged-in user's own profile.
pub async fn load_profile<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    location: &str,
) -> PageOutcome<ProfileView> {
    let name = query_param(location, "name").or_else(|| ctx.viewer().map(|u| u.name.clone()));
    let name = match name {
        Some(name) if ctx.has_session() => name,
        _ => return PageOutcome::Failed("Please log in to view profiles.".to_string()),
    };

    let loaded = async {
        let profile = ctx.client.fetch_profile(&name).await?;
        let posts = ctx.client.fetch_profile_posts(&name).await?;
        Ok::<_, ClientError>((profile, posts))
    }
    .await;

    match loaded {
        Ok((profile, posts)) => {
            PageOutcome::Rendered(render_profile(&profile, &posts, ctx.viewer(), ctx.locale()))
        }
        Err(e) => {
            error!("Error loading profile: {}", e);
            PageOutcome::Failed("Could not load profile. Try again later.".to_string())
        }
    }
}

/// `#followBtn`: follows or unfollows, then refreshes counts from the re-fetched profile.
pub async fn toggle_follow<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    view: &mut ProfileView,
) -> PageOutcome<FollowButton> {
    let action = match view.follow_button {
        FollowButton::Hidden => return PageOutcome::Rendered(FollowButton::Hidden),
        FollowButton::Follow => FollowAction::Follow,
        FollowButton::Unfollow => FollowAction::Unfollow,
    };

    match ctx.client.set_following(&view.name, action).await {
        Ok(profile) => {
            view.apply_profile(&profile, ctx.viewer());
            PageOutcome::Rendered(view.follow_button)
        }
        Err(e) => {
            error!("Follow/unfollow failed: {}", e);
            ctx.dialog.alert("Something went wrong. Try again.");
            PageOutcome::Failed(e.message().to_string())
        }
    }
}
