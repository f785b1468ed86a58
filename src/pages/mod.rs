//! Page controllers. Each one handles a single load or a single user action and never
//! lets an error escape: failures come back as `PageOutcome::Failed` or an alert.

pub mod account;
pub mod edit_post;
pub mod feed;
pub mod my_posts;
pub mod profile;
pub mod single_post;

use std::collections::HashMap;
use tracing::error;
use crate::client::ApiClient;
use crate::config::{ClientConfig, MISSING_FIELDS_MESSAGE};
use crate::core::errors::ClientError;
use crate::core::query_params::parse_query_params;
use crate::core::storage::KeyValueStore;
use crate::dialog::Dialog;
use crate::models::models::User;
use crate::session::SessionStore;

/// Form inputs keyed by element id (`title`, `body`, `imageUrl`, ...).
pub type FormFields = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome<V> {
    Rendered(V),
    Redirect(String),
    Failed(String),
}

impl<V> PageOutcome<V> {
    pub fn rendered(self) -> Option<V> {
        match self {
            PageOutcome::Rendered(view) => Some(view),
            _ => None,
        }
    }
}

/// What every page needs: the API client, persisted session, and the user's dialogs.
pub struct PageContext<S: KeyValueStore, D: Dialog> {
    pub client: ApiClient,
    pub sessions: SessionStore<S>,
    pub dialog: D,
}

impl<S: KeyValueStore, D: Dialog> PageContext<S, D> {
    /// Restores the persisted session, if any, into the client.
    pub fn new(config: ClientConfig, store: S, dialog: D) -> Result<Self, ClientError> {
        let sessions = SessionStore::new(store);
        let client = ApiClient::new(config)?.with_session(sessions.load()?);
        Ok(Self { client, sessions, dialog })
    }

    pub fn has_session(&self) -> bool {
        self.client.session().is_some()
    }

    pub fn viewer(&self) -> Option<&User> {
        self.client.viewer()
    }

    pub fn locale(&self) -> &str {
        &self.client.config().locale
    }
}

pub(crate) fn field<'a>(form: &'a FormFields, id: &str) -> &'a str {
    form.get(id).map(|v| v.trim()).unwrap_or_default()
}

pub(crate) fn query_param(location: &str, key: &str) -> Option<String> {
    crate::core::query_params::get_string(&parse_query_params(location), key, None)
}

/// `#postForm` submit shared by the feed and my-posts pages. Missing fields alert and
/// send nothing; the error carries the message the page should show.
pub(crate) async fn create_from_form<S: KeyValueStore, D: Dialog>(
    ctx: &PageContext<S, D>,
    form: &FormFields,
) -> Result<(), String> {
    let (title, body) = (field(form, "title"), field(form, "body"));
    if title.is_empty() || body.is_empty() {
        ctx.dialog.alert(MISSING_FIELDS_MESSAGE);
        return Err(MISSING_FIELDS_MESSAGE.to_string());
    }

    let image_url = Some(field(form, "imageUrl")).filter(|u| !u.is_empty());
    match ctx.client.create_post(title, body, image_url).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Error creating post: {}", e);
            Err(e.message().to_string())
        }
    }
}
