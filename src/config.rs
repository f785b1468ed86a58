use std::path::PathBuf;

// === API ===
pub const DEFAULT_AUTH_URL: &str = "https://v2.api.noroff.dev/auth";
pub const DEFAULT_SOCIAL_URL: &str = "https://v2.api.noroff.dev/social";
pub const API_KEY_HEADER: &str = "X-Noroff-API-Key";

// === Local storage ===
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const DEFAULT_STORAGE_DIR: &str = ".feedr";
pub const DEFAULT_LOCALE: &str = "en_US";

// === Pages ===
pub const LOGIN_PAGE: &str = "/account/login.html";
pub const LOGIN_FORM_PAGE: &str = "/login.html";
pub const INDEX_PAGE: &str = "/index.html";
pub const FEED_PAGE: &str = "/feed.html";
pub const MY_POSTS_PAGE: &str = "/myPosts.html";

pub fn post_page(id: &str) -> String {
    format!("/post.html?id={}", id)
}

pub fn edit_page(id: &str) -> String {
    format!("/edit.html?id={}", id)
}

pub fn profile_page(name: &str) -> String {
    format!("/profile.html?name={}", urlencoding::encode(name))
}

// === Messages ===
pub const NO_TOKEN_MESSAGE: &str = "No auth token found. Please log in.";
pub const NO_POSTS_MESSAGE: &str = "No posts available.";
pub const NO_PROFILE_POSTS_MESSAGE: &str = "No posts yet.";
pub const NO_BIO_MESSAGE: &str = "No bio provided.";
pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this post?";
pub const MISSING_FIELDS_MESSAGE: &str =
    "Please fill in both the title and content before submitting.";

pub fn auth_url() -> String {
    env_or("FEEDR_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn social_url() -> String {
    env_or("FEEDR_SOCIAL_URL", DEFAULT_SOCIAL_URL)
}

pub fn api_key() -> String {
    env_or("FEEDR_API_KEY", "")
}

pub fn storage_dir() -> PathBuf {
    PathBuf::from(env_or("FEEDR_STORAGE_DIR", DEFAULT_STORAGE_DIR))
}

pub fn locale() -> String {
    env_or("FEEDR_LOCALE", DEFAULT_LOCALE)
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Everything the API client needs to reach the service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub auth_url: String,
    pub social_url: String,
    pub api_key: String,
    pub locale: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            auth_url: auth_url(),
            social_url: social_url(),
            api_key: api_key(),
            locale: locale(),
        }
    }

    /// Points both endpoint groups at one host, laid out as `<base>/auth` and `<base>/social`.
    pub fn with_base_url(base: &str, api_key: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            auth_url: format!("{}/auth", base),
            social_url: format!("{}/social", base),
            api_key: api_key.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}
