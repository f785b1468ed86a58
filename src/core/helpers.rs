use chrono::{DateTime, Local, Locale};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use crate::models::models::{Media, User};

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Trimmed input, or `None` when nothing is left.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Formats an RFC 3339 timestamp in local time using the given locale (`en_US`, `nb_NO`, ...).
/// Unknown locales fall back to `en_US`.
pub fn format_created(timestamp: &str, locale: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp.trim()).ok()?;
    let locale = Locale::try_from(locale).unwrap_or(Locale::en_US);
    Some(
        parsed
            .with_timezone(&Local)
            .format_localized("%x %X", locale)
            .to_string(),
    )
}

// === Lenient field decoding ===

/// Ids come back as numbers from some endpoints and strings from others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("missing post id"))
}

/// Media is either a bare URL or `{ url, alt }`.
pub fn media_or_url<'de, D>(deserializer: D) -> Result<Option<Media>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(url)) if !url.trim().is_empty() => Some(Media { url, alt: None }),
        Some(value @ Value::Object(_)) => serde_json::from_value::<Media>(value)
            .ok()
            .filter(|m| !m.url.trim().is_empty()),
        _ => None,
    })
}

/// Owners are either a profile object or just the owner's name.
pub fn user_or_name<'de, D>(deserializer: D) -> Result<Option<User>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) => Some(User::named(&name)),
        Some(value @ Value::Object(_)) => serde_json::from_value::<User>(value).ok(),
        _ => None,
    })
}
