use feedr::config::{TOKEN_KEY, USER_KEY};
use feedr::{ClientConfig, FileStore, KeyValueStore, MemoryStore, Session, SessionStore, User};
use feedr::pages::PageContext;

fn user() -> User {
    User { id: Some("u1".to_string()), email: Some("a@b.com".to_string()), ..User::named("A") }
}

struct Silent;

impl feedr::Dialog for Silent {
    fn alert(&self, _message: &str) {}

    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path().join("nested")).expect("Failed to open store");

    assert_eq!(store.get("missing").unwrap(), None);
    store.set("k", "v1").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"));

    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
    // Removing twice is fine.
    store.remove("k").unwrap();
}

#[test]
fn test_stores_share_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let first = SessionStore::new(FileStore::open(dir.path()).unwrap());
    let second = SessionStore::new(FileStore::open(dir.path()).unwrap());

    first.save_token("t1").unwrap();
    assert_eq!(second.get_token().unwrap().as_deref(), Some("t1"));

    // Last writer wins.
    second.save_token("t2").unwrap();
    assert_eq!(first.get_token().unwrap().as_deref(), Some("t2"));
}

#[test]
fn test_session_save_load_clear() {
    let dir = tempfile::tempdir().unwrap();
    let sessions = SessionStore::new(FileStore::open(dir.path()).unwrap());
    assert_eq!(sessions.load().unwrap(), None);

    let session = Session::new("t1", Some(user()));
    sessions.save(&session).unwrap();
    assert_eq!(sessions.load().unwrap(), Some(session));

    sessions.clear().unwrap();
    assert_eq!(sessions.load().unwrap(), None);
    assert!(!dir.path().join(TOKEN_KEY).exists());
    assert!(!dir.path().join(USER_KEY).exists());
}

#[test]
fn test_session_without_user_drops_stale_user() {
    let sessions = SessionStore::new(MemoryStore::new());
    sessions.save(&Session::new("t1", Some(user()))).unwrap();

    sessions.save(&Session::new("t2", None)).unwrap();

    assert_eq!(sessions.load().unwrap(), Some(Session::new("t2", None)));
}

#[test]
fn test_unreadable_user_reads_as_absent() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "t1").unwrap();
    store.set(USER_KEY, "{not json").unwrap();
    let sessions = SessionStore::new(store);

    assert_eq!(sessions.get_user().unwrap(), None);
    assert_eq!(sessions.load().unwrap(), Some(Session::new("t1", None)));
}

#[test]
fn test_empty_token_is_no_session() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "").unwrap();
    let sessions = SessionStore::new(store);

    assert_eq!(sessions.get_token().unwrap(), None);
    assert_eq!(sessions.load().unwrap(), None);
}

#[test]
fn test_user_stored_as_json() {
    let store = MemoryStore::new();
    let sessions = SessionStore::new(store);
    sessions.save_user(&user()).unwrap();

    assert_eq!(sessions.get_user().unwrap(), Some(user()));
}

#[test]
fn test_page_context_restores_persisted_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    SessionStore::new(store.clone()).save(&Session::new("t1", Some(user()))).unwrap();

    let ctx = PageContext::new(ClientConfig::with_base_url("http://127.0.0.1:9", "k"), store, Silent).unwrap();

    assert!(ctx.has_session());
    assert_eq!(ctx.viewer().map(|u| u.name.as_str()), Some("A"));
    assert_eq!(ctx.client.session().map(|s| s.token.as_str()), Some("t1"));
    assert_eq!(ctx.locale(), "en_US");
}

#[test]
fn test_config_with_base_url() {
    let config = ClientConfig::with_base_url("http://localhost:8080/", "key");

    assert_eq!(config.auth_url, "http://localhost:8080/auth");
    assert_eq!(config.social_url, "http://localhost:8080/social");
    assert_eq!(config.api_key, "key");
}
