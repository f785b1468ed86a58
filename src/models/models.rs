use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::errors::ClientError;
use crate::core::helpers::{media_or_url, non_empty, required_id, string_or_number, user_or_name};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Media {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "media_or_url", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
}

impl User {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "user_or_name", skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    #[serde(default, deserialize_with = "user_or_name", skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default, deserialize_with = "media_or_url", skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl Post {
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .or(self.author.as_ref())
            .map(|u| u.name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created.as_deref().or(self.published.as_deref())
    }

    /// Client-side gate for edit/delete. Both ids must be known and equal.
    pub fn is_owned_by(&self, viewer: Option<&User>) -> bool {
        let owner_id = self.owner.as_ref().and_then(|o| o.id.as_deref());
        let viewer_id = viewer.and_then(|v| v.id.as_deref());
        matches!((owner_id, viewer_id), (Some(a), Some(b)) if a == b)
    }
}

/// Body of create and edit requests. Edits replace the whole post.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

impl PostDraft {
    pub fn new(title: &str, body: &str, media_url: Option<&str>) -> Result<Self, ClientError> {
        let (title, body) = match (non_empty(Some(title)), non_empty(Some(body))) {
            (Some(t), Some(b)) => (t, b),
            _ => {
                return Err(ClientError::Validation(
                    crate::config::MISSING_FIELDS_MESSAGE.to_string(),
                ))
            }
        };
        let media = non_empty(media_url).map(|url| Media { url, alt: Some(title.clone()) });

        Ok(Self { title, body, media })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileCount {
    #[serde(default)]
    pub posts: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "media_or_url", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
    #[serde(default, deserialize_with = "media_or_url", skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
    #[serde(default)]
    pub followers: Option<Vec<User>>,
    #[serde(default)]
    pub following: Option<Vec<User>>,
    #[serde(default, rename = "_count", skip_serializing_if = "Option::is_none")]
    pub count: Option<ProfileCount>,
}

impl Profile {
    pub fn followers(&self) -> &[User] {
        self.followers.as_deref().unwrap_or_default()
    }

    pub fn following(&self) -> &[User] {
        self.following.as_deref().unwrap_or_default()
    }

    pub fn is_followed_by(&self, name: &str) -> bool {
        self.followers().iter().any(|f| f.name == name)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self { token: token.into(), user }
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

/// Login responses carry the token as `accessToken` (or `token`) next to the user summary.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[serde(default, alias = "token")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "media_or_url")]
    pub avatar: Option<Media>,
}

impl LoginPayload {
    /// `None` when the response carried no usable token.
    pub fn into_session(self) -> Option<Session> {
        let token = non_empty(self.access_token.as_deref())?;
        let user = self.name.filter(|n| !n.is_empty()).map(|name| User {
            id: self.id,
            name,
            email: self.email,
            avatar: self.avatar,
        });
        Some(Session::new(token, user))
    }
}

/// A response payload, either wrapped as `{ "data": ... }` or sent bare.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Wrapped(T),
    Bare(T),
}

impl<T: DeserializeOwned> Envelope<T> {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut map) if map.contains_key("data") => {
                let inner = map.remove("data").unwrap_or(Value::Null);
                Ok(Envelope::Wrapped(serde_json::from_value(inner)?))
            }
            other => Ok(Envelope::Bare(serde_json::from_value(other)?)),
        }
    }
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped(inner) | Envelope::Bare(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_unwraps_data_and_accepts_bare() {
        let wrapped = Envelope::<Post>::from_value(json!({"data": {"id": 3, "title": "a"}, "meta": {}})).unwrap();
        assert!(matches!(wrapped, Envelope::Wrapped(_)));
        assert_eq!(wrapped.into_inner().id, "3");

        let bare = Envelope::<Post>::from_value(json!({"id": "4", "title": "b"})).unwrap();
        assert!(matches!(bare, Envelope::Bare(_)));
        assert_eq!(bare.into_inner().title, "b");
    }

    #[test]
    fn owner_may_be_a_name_or_a_profile() {
        let by_name: Post = serde_json::from_value(json!({"id": 1, "title": "t", "owner": "kari"})).unwrap();
        assert_eq!(by_name.owner_name(), Some("kari"));
        assert!(!by_name.is_owned_by(Some(&User::named("kari"))));

        let by_profile: Post = serde_json::from_value(json!({
            "id": 1, "title": "t", "owner": {"id": 9, "name": "kari", "avatar": "https://img/a.png"}
        }))
        .unwrap();
        let viewer = User { id: Some("9".into()), ..User::named("kari") };
        assert!(by_profile.is_owned_by(Some(&viewer)));
        assert!(!by_profile.is_owned_by(None));
    }

    #[test]
    fn draft_requires_title_and_body() {
        assert!(matches!(PostDraft::new("  ", "body", None), Err(ClientError::Validation(_))));
        let draft = PostDraft::new(" Hi ", "there", Some(" https://img/x.png ")).unwrap();
        assert_eq!(draft.title, "Hi");
        assert_eq!(draft.media, Some(Media { url: "https://img/x.png".into(), alt: Some("Hi".into()) }));
    }

    #[test]
    fn login_payload_without_token_has_no_session() {
        let payload: LoginPayload = serde_json::from_value(json!({"name": "A"})).unwrap();
        assert!(payload.into_session().is_none());

        let payload: LoginPayload = serde_json::from_value(json!({"token": "t2", "name": "B"})).unwrap();
        assert_eq!(payload.into_session().unwrap().token, "t2");
    }
}
