#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::net::TcpListener;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use feedr::pages::PageContext;
use feedr::{ClientConfig, Dialog, MemoryStore};

pub const API_KEY: &str = "test-api-key";

/// The logged-in user as the mock sees it.
pub const ME_ID: &str = "u1";
pub const ME_NAME: &str = "A";
pub const ME_EMAIL: &str = "a@b.com";
pub const TOKEN: &str = "t1";

pub struct MockState {
    pub requests: AtomicUsize,
    pub next_id: AtomicU64,
    pub login_response: Mutex<Value>,
    pub posts: Mutex<Vec<Value>>,
    pub followers: Mutex<Vec<String>>,
    pub last_api_key: Mutex<Option<String>>,
    pub last_auth: Mutex<Option<String>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            requests: AtomicUsize::new(0),
            next_id: AtomicU64::new(100),
            login_response: Mutex::new(json!({
                "data": { "accessToken": TOKEN, "id": ME_ID, "name": ME_NAME, "email": ME_EMAIL }
            })),
            posts: Mutex::new(Vec::new()),
            followers: Mutex::new(Vec::new()),
            last_api_key: Mutex::new(None),
            last_auth: Mutex::new(None),
        }
    }
}

impl MockState {
    fn hit(&self, req: &HttpRequest) -> Option<String> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        *self.last_api_key.lock().unwrap() = header("X-Noroff-API-Key");
        let auth = header("Authorization");
        *self.last_auth.lock().unwrap() = auth.clone();
        auth.and_then(|a| a.strip_prefix("Bearer ").map(str::to_string))
    }
}

fn error(status: u16, message: &str) -> HttpResponse {
    HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap())
        .json(json!({ "errors": [{ "message": message }], "status": "Error", "statusCode": status }))
}

fn unauthorized() -> HttpResponse {
    error(401, "No authorization header was found")
}

async fn login(state: web::Data<MockState>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    state.hit(&req);
    if body["password"] == "wrong" {
        return error(401, "Invalid email or password");
    }
    HttpResponse::Ok().json(state.login_response.lock().unwrap().clone())
}

async fn register(state: web::Data<MockState>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    state.hit(&req);
    if body["email"] == "taken@b.com" {
        return error(400, "Profile already exists");
    }
    HttpResponse::Created().json(json!({ "data": { "name": body["name"], "email": body["email"] }, "meta": {} }))
}

async fn list_posts(state: web::Data<MockState>, req: HttpRequest) -> HttpResponse {
    if state.hit(&req).is_none() {
        return unauthorized();
    }
    let posts = state.posts.lock().unwrap().clone();
    HttpResponse::Ok().json(json!({ "data": posts, "meta": { "isFirstPage": true } }))
}

async fn create_post(state: web::Data<MockState>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if state.hit(&req).is_none() {
        return unauthorized();
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let mut post = json!({
        "id": id,
        "title": body["title"],
        "body": body["body"],
        "owner": { "id": ME_ID, "name": ME_NAME },
        "created": "2024-03-01T10:15:00.000Z",
    });
    if !body["media"].is_null() {
        post["media"] = body["media"].clone();
    }
    state.posts.lock().unwrap().insert(0, post.clone());
    HttpResponse::Created().json(json!({ "data": post, "meta": {} }))
}

fn find_post(state: &MockState, id: &str) -> Option<Value> {
    state
        .posts
        .lock()
        .unwrap()
        .iter()
        .find(|p| p["id"].to_string().trim_matches('"') == id)
        .cloned()
}

async fn get_post(state: web::Data<MockState>, req: HttpRequest, id: web::Path<String>) -> HttpResponse {
    state.hit(&req);
    match find_post(&state, &id) {
        // Single posts come back bare, without the data envelope.
        Some(post) => HttpResponse::Ok().json(post),
        None => error(404, "No post with this id"),
    }
}

async fn update_post(
    state: web::Data<MockState>,
    req: HttpRequest,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    if state.hit(&req).is_none() {
        return unauthorized();
    }
    let mut posts = state.posts.lock().unwrap();
    let Some(post) = posts.iter_mut().find(|p| p["id"].to_string().trim_matches('"') == id.as_str()) else {
        return error(404, "No post with this id");
    };
    post["title"] = body["title"].clone();
    post["body"] = body["body"].clone();
    post["media"] = body["media"].clone();
    post["updated"] = json!("2024-03-02T08:00:00.000Z");
    HttpResponse::Ok().json(json!({ "data": post.clone(), "meta": {} }))
}

async fn delete_post(state: web::Data<MockState>, req: HttpRequest, id: web::Path<String>) -> HttpResponse {
    if state.hit(&req).is_none() {
        return unauthorized();
    }
    let mut posts = state.posts.lock().unwrap();
    let before = posts.len();
    posts.retain(|p| p["id"].to_string().trim_matches('"') != id.as_str());
    if posts.len() == before {
        return error(404, "No post with this id");
    }
    HttpResponse::NoContent().finish()
}

fn profile_json(state: &MockState, name: &str) -> Value {
    let followers: Vec<Value> = state
        .followers
        .lock()
        .unwrap()
        .iter()
        .map(|f| json!({ "name": f, "email": format!("{}@b.com", f.to_lowercase()) }))
        .collect();
    json!({
        "name": name,
        "email": format!("{}@b.com", name.to_lowercase()),
        "bio": if name == ME_NAME { Value::Null } else { json!(format!("Hi, I'm {}", name)) },
        "avatar": { "url": format!("https://img.example/{}.png", name), "alt": "" },
        "followers": followers,
        "following": [],
        "_count": { "posts": 0, "followers": followers.len(), "following": 0 }
    })
}

async fn get_profile(state: web::Data<MockState>, req: HttpRequest, name: web::Path<String>) -> HttpResponse {
    if state.hit(&req).is_none() {
        return unauthorized();
    }
    if name.as_str() == "ghost" {
        return HttpResponse::NotFound().body("not here");
    }
    HttpResponse::Ok().json(json!({ "data": profile_json(&state, &name), "meta": {} }))
}

async fn profile_posts(state: web::Data<MockState>, req: HttpRequest, name: web::Path<String>) -> HttpResponse {
    if state.hit(&req).is_none() {
        return unauthorized();
    }
    // Profile listings name the owner instead of embedding it.
    let posts: Vec<Value> = state
        .posts
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p["owner"]["name"] == name.as_str())
        .map(|p| {
            let mut p = p.clone();
            p["owner"] = json!(name.as_str());
            p
        })
        .collect();
    HttpResponse::Ok().json(json!({ "data": posts, "meta": {} }))
}

async fn follow(state: web::Data<MockState>, req: HttpRequest, path: web::Path<(String, String)>) -> HttpResponse {
    if state.hit(&req).is_none() {
        return unauthorized();
    }
    let (name, action) = path.into_inner();
    let mut followers = state.followers.lock().unwrap();
    match action.as_str() {
        "follow" if followers.iter().any(|f| f == ME_NAME) => return error(400, "You are already following this profile"),
        "follow" => followers.push(ME_NAME.to_string()),
        "unfollow" => followers.retain(|f| f != ME_NAME),
        _ => return error(404, "Unknown action"),
    }
    let list: Vec<Value> = followers.iter().map(|f| json!({ "name": f })).collect();
    HttpResponse::Ok().json(json!({ "data": { "name": name, "followers": list, "following": [] } }))
}

pub struct MockApi {
    pub base_url: String,
    pub state: web::Data<MockState>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = web::Data::new(MockState::default());
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock api");
        let port = listener.local_addr().unwrap().port();

        let data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/auth/login", web::post().to(login))
                .route("/auth/register", web::post().to(register))
                .route("/social/posts", web::get().to(list_posts))
                .route("/social/posts", web::post().to(create_post))
                .route("/social/posts/{id}", web::get().to(get_post))
                .route("/social/posts/{id}", web::put().to(update_post))
                .route("/social/posts/{id}", web::delete().to(delete_post))
                .route("/social/profiles/{name}", web::get().to(get_profile))
                .route("/social/profiles/{name}/posts", web::get().to(profile_posts))
                .route("/social/profiles/{name}/{action}", web::put().to(follow))
        })
        .workers(1)
        .listen(listener)
        .expect("Failed to listen")
        .run();
        tokio::spawn(server);

        MockApi { base_url: format!("http://127.0.0.1:{}", port), state }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_base_url(&self.base_url, API_KEY)
    }

    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn set_login_response(&self, body: Value) {
        *self.state.login_response.lock().unwrap() = body;
    }

    pub fn seed_post(&self, id: u64, owner_id: &str, owner_name: &str, title: &str) {
        self.state.posts.lock().unwrap().push(json!({
            "id": id,
            "title": title,
            "body": format!("{} body", title),
            "owner": { "id": owner_id, "name": owner_name },
            "created": "2024-02-10T09:30:00.000Z",
        }));
    }

    pub fn post_count(&self) -> usize {
        self.state.posts.lock().unwrap().len()
    }
}

/// Records alerts and answers every confirmation the same way.
pub struct ScriptedDialog {
    pub answer: bool,
    pub alerts: RefCell<Vec<String>>,
    pub confirms: Cell<usize>,
}

impl ScriptedDialog {
    pub fn answering(answer: bool) -> Self {
        Self { answer, alerts: RefCell::new(Vec::new()), confirms: Cell::new(0) }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Dialog for ScriptedDialog {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, _message: &str) -> bool {
        self.confirms.set(self.confirms.get() + 1);
        self.answer
    }
}

pub type TestContext = PageContext<MemoryStore, ScriptedDialog>;

pub fn context(api: &MockApi, answer: bool) -> TestContext {
    PageContext::new(api.config(), MemoryStore::new(), ScriptedDialog::answering(answer))
        .expect("Failed to build page context")
}

pub fn fields(pairs: &[(&str, &str)]) -> feedr::pages::FormFields {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
