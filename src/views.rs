use std::fmt;
use crate::config::{self, NO_BIO_MESSAGE, NO_POSTS_MESSAGE, NO_PROFILE_POSTS_MESSAGE};
use crate::core::helpers::format_created;
use crate::models::models::{Media, Post, Profile, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostActions {
    pub edit_href: String,
    pub delete_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub body: String,
    pub owner_name: String,
    pub media: Option<Media>,
    pub created_label: Option<String>,
    pub link: String,
    pub actions: Option<PostActions>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    Empty { message: String },
    Cards(Vec<PostCard>),
}

impl FeedView {
    fn empty(message: &str) -> Self {
        FeedView::Empty { message: message.to_string() }
    }

    pub fn cards(&self) -> &[PostCard] {
        match self {
            FeedView::Cards(cards) => cards,
            FeedView::Empty { .. } => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            FeedView::Empty { message } => Some(message),
            FeedView::Cards(_) => None,
        }
    }

    /// Drops the card for a deleted post in place. Returns whether a card was removed.
    pub fn remove_post(&mut self, id: &str) -> bool {
        let FeedView::Cards(cards) = self else {
            return false;
        };
        let before = cards.len();
        cards.retain(|c| c.id != id);
        let removed = cards.len() != before;

        if cards.is_empty() {
            *self = FeedView::empty(NO_POSTS_MESSAGE);
        }
        removed
    }
}

/// One card per post, in input order, or the placeholder when there are none.
pub fn render_posts(posts: &[Post], viewer: Option<&User>, locale: &str) -> FeedView {
    if posts.is_empty() {
        return FeedView::empty(NO_POSTS_MESSAGE);
    }
    FeedView::Cards(posts.iter().map(|p| render_post(p, viewer, locale)).collect())
}

pub fn render_post(post: &Post, viewer: Option<&User>, locale: &str) -> PostCard {
    let media = post.media.as_ref().map(|m| Media {
        url: m.url.clone(),
        alt: m
            .alt
            .clone()
            .filter(|a| !a.is_empty())
            .or_else(|| Some(post.title.clone())),
    });

    let actions = post.is_owned_by(viewer).then(|| PostActions {
        edit_href: config::edit_page(&post.id),
        delete_id: post.id.clone(),
    });

    PostCard {
        id: post.id.clone(),
        title: post.title.clone(),
        body: post.body().to_string(),
        owner_name: post.owner_name().unwrap_or("Unknown").to_string(),
        media,
        created_label: post
            .created_at()
            .and_then(|ts| format_created(ts, locale))
            .map(|date| format!("Created: {}", date)),
        link: config::post_page(&post.id),
        actions,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowButton {
    Hidden,
    Follow,
    Unfollow,
}

impl FollowButton {
    pub fn for_profile(profile: &Profile, viewer: Option<&User>) -> Self {
        let viewer_name = viewer.map(|v| v.name.as_str());
        if viewer_name == Some(profile.name.as_str()) {
            FollowButton::Hidden
        } else if viewer_name.map_or(false, |name| profile.is_followed_by(name)) {
            FollowButton::Unfollow
        } else {
            FollowButton::Follow
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            FollowButton::Hidden => None,
            FollowButton::Follow => Some("Follow"),
            FollowButton::Unfollow => Some("Unfollow"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub posts: usize,
    pub followers: usize,
    pub following: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub bio: String,
    pub avatar: Option<Media>,
    pub stats: ProfileStats,
    pub follow_button: FollowButton,
    pub posts: FeedView,
}

pub fn render_profile(profile: &Profile, posts: &[Post], viewer: Option<&User>, locale: &str) -> ProfileView {
    let mut view = ProfileView {
        name: profile.name.clone(),
        bio: profile
            .bio
            .clone()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| NO_BIO_MESSAGE.to_string()),
        avatar: profile.avatar.clone(),
        stats: ProfileStats { posts: posts.len(), ..ProfileStats::default() },
        follow_button: FollowButton::Hidden,
        posts: match render_posts(posts, viewer, locale) {
            FeedView::Empty { .. } => FeedView::empty(NO_PROFILE_POSTS_MESSAGE),
            cards => cards,
        },
    };
    view.apply_profile(profile, viewer);
    view
}

impl ProfileView {
    /// Refreshes counts and the follow button from a re-fetched profile.
    pub fn apply_profile(&mut self, profile: &Profile, viewer: Option<&User>) {
        let counts = profile.count.clone().unwrap_or_default();
        self.stats.followers = match &profile.followers {
            Some(list) => list.len(),
            None => counts.followers.unwrap_or(0) as usize,
        };
        self.stats.following = match &profile.following {
            Some(list) => list.len(),
            None => counts.following.unwrap_or(0) as usize,
        };
        self.follow_button = FollowButton::for_profile(profile, viewer);
    }
}

/// Edit form, pre-filled from the stored post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFormView {
    pub post_id: String,
    pub title: String,
    pub body: String,
    pub image_url: String,
}

impl From<&Post> for PostFormView {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.id.clone(),
            title: post.title.clone(),
            body: post.body().to_string(),
            image_url: post.media.as_ref().map(|m| m.url.clone()).unwrap_or_default(),
        }
    }
}

// === Terminal output ===

impl fmt::Display for PostCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.id, self.title)?;
        if let Some(media) = &self.media {
            writeln!(f, "  image: {}", media.url)?;
        }
        if !self.body.is_empty() {
            for line in self.body.lines() {
                writeln!(f, "  {}", line)?;
            }
        }
        write!(f, "  By {}", self.owner_name)?;
        if let Some(created) = &self.created_label {
            write!(f, " | {}", created)?;
        }
        if let Some(actions) = &self.actions {
            write!(f, "\n  edit: {} | delete: {}", actions.edit_href, actions.delete_id)?;
        }
        Ok(())
    }
}

impl fmt::Display for FeedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedView::Empty { message } => write!(f, "{}", message),
            FeedView::Cards(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                        writeln!(f)?;
                    }
                    write!(f, "{}", card)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.bio)?;
        writeln!(
            f,
            "{} Posts | {} Followers | {} Following",
            self.stats.posts, self.stats.followers, self.stats.following
        )?;
        if let Some(label) = self.follow_button.label() {
            writeln!(f, "[{}]", label)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.posts)
    }
}

impl fmt::Display for PostFormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "title: {}", self.title)?;
        writeln!(f, "body: {}", self.body)?;
        write!(f, "image: {}", self.image_url)
    }
}
