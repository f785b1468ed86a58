use std::collections::HashMap;
use std::sync::OnceLock;
use ammonia::Builder;
use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::{Captures, Regex};
use rust_embed::RustEmbed;
use crate::models::models::Media;
use crate::views::{FeedView, FollowButton, PostCard, PostFormView, ProfileView};

#[derive(RustEmbed)]
#[folder = "templates"]
struct Assets;

fn load(name: &str) -> anyhow::Result<String> {
    let template = Assets::get(name)
        .ok_or_else(|| anyhow::anyhow!("Template {} not found", name))?
        .data
        .to_vec();
    Ok(String::from_utf8(template)?)
}

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("Regex should compile"))
}

fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("Regex should compile"))
}

/// Single pass, so values that look like placeholders are left alone.
fn fill(template: &str, values: &HashMap<&str, String>) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        })
        .to_string()
}

/// Sentence punctuation after a URL belongs to the text, not the link.
/// A `;` that closes an escaped entity such as `&amp;` stays with the URL.
fn split_trailing_punctuation(url: &str) -> (&str, &str) {
    let mut end = url.len();
    for (i, c) in url.char_indices().rev() {
        match c {
            '.' | ',' | ':' | '!' | '?' | ')' => end = i,
            ';' if !ends_with_entity(&url[..=i]) => end = i,
            _ => break,
        }
    }
    url.split_at(end)
}

fn ends_with_entity(text: &str) -> bool {
    match text.rfind('&') {
        Some(amp) => {
            let name = &text[amp + 1..text.len() - 1];
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
        }
        None => false,
    }
}

/// Escapes the body, turns URLs into links and runs the result through the sanitizer.
pub fn filter_post_body(body: &str) -> String {
    let escaped = encode_text(body).to_string();
    let linked = url_regex().replace_all(&escaped, |caps: &Captures| {
        let (url, trailing) = split_trailing_punctuation(&caps[0]);
        format!(r#"<a href="{}">{}</a>{}"#, url, url, trailing)
    });

    Builder::default()
        .link_rel(Some("noopener noreferrer"))
        .clean(&linked)
        .to_string()
}

fn media_html(media: Option<&Media>) -> String {
    media
        .map(|m| {
            format!(
                r#"<img src="{}" alt="{}" class="post-image">"#,
                encode_double_quoted_attribute(&m.url),
                encode_double_quoted_attribute(m.alt.as_deref().unwrap_or_default())
            )
        })
        .unwrap_or_default()
}

fn card_values(card: &PostCard) -> HashMap<&'static str, String> {
    HashMap::from([
        ("id", encode_double_quoted_attribute(&card.id).to_string()),
        ("link", encode_double_quoted_attribute(&card.link).to_string()),
        ("title", encode_text(&card.title).to_string()),
        ("media", media_html(card.media.as_ref())),
        ("body", filter_post_body(&card.body)),
        ("owner", encode_text(&card.owner_name).to_string()),
        ("created", encode_text(card.created_label.as_deref().unwrap_or_default()).to_string()),
    ])
}

pub fn post_card_html(card: &PostCard) -> anyhow::Result<String> {
    let mut values = card_values(card);
    let actions = match &card.actions {
        Some(actions) => fill(
            &load("post_actions.html")?,
            &HashMap::from([
                ("id", encode_double_quoted_attribute(&actions.delete_id).to_string()),
                ("edit_href", encode_double_quoted_attribute(&actions.edit_href).to_string()),
            ]),
        ),
        None => String::new(),
    };
    values.insert("actions", actions);

    Ok(fill(&load("post_card.html")?, &values))
}

pub fn feed_html(view: &FeedView) -> anyhow::Result<String> {
    match view {
        FeedView::Empty { message } => Ok(format!("<p>{}</p>", encode_text(message))),
        FeedView::Cards(cards) => {
            let rendered = cards
                .iter()
                .map(post_card_html)
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(rendered.join("\n"))
        }
    }
}

/// Single post page. The action bar stays in the markup and is hidden for non-owners.
pub fn post_html(card: &PostCard) -> anyhow::Result<String> {
    let mut values = card_values(card);
    values.insert("actions_class", if card.actions.is_some() { "" } else { "hidden" }.to_string());
    values.insert(
        "edit_href",
        card.actions
            .as_ref()
            .map(|a| encode_double_quoted_attribute(&a.edit_href).to_string())
            .unwrap_or_default(),
    );

    Ok(fill(&load("post.html")?, &values))
}

pub fn profile_html(view: &ProfileView) -> anyhow::Result<String> {
    let avatar = view
        .avatar
        .as_ref()
        .map(|a| {
            format!(
                r#"<img id="profileAvatar" src="{}" alt="{}">"#,
                encode_double_quoted_attribute(&a.url),
                encode_double_quoted_attribute(a.alt.as_deref().unwrap_or(&view.name))
            )
        })
        .unwrap_or_default();

    let values = HashMap::from([
        ("avatar", avatar),
        ("name", encode_text(&view.name).to_string()),
        ("bio", encode_text(&view.bio).to_string()),
        ("posts_count", view.stats.posts.to_string()),
        ("followers_count", view.stats.followers.to_string()),
        ("following_count", view.stats.following.to_string()),
        (
            "follow_class",
            if view.follow_button == FollowButton::Hidden { "hidden" } else { "" }.to_string(),
        ),
        ("follow_label", view.follow_button.label().unwrap_or_default().to_string()),
        ("posts", feed_html(&view.posts)?),
    ]);

    Ok(fill(&load("profile.html")?, &values))
}

pub fn edit_form_html(form: &PostFormView) -> anyhow::Result<String> {
    let values = HashMap::from([
        ("id", encode_double_quoted_attribute(&form.post_id).to_string()),
        ("title", encode_double_quoted_attribute(&form.title).to_string()),
        ("body", encode_text(&form.body).to_string()),
        ("image", encode_double_quoted_attribute(&form.image_url).to_string()),
    ]);

    Ok(fill(&load("edit_form.html")?, &values))
}
