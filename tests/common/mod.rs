//! In-process fake of the reqres service.
//!
//! Serves the same fixture data and status codes as the public deployment on
//! an ephemeral port, so the client and every scenario can be exercised
//! without network access.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use reqres_contract::client::VerificationClient;
use reqres_contract::config::SuiteConfig;
use reqres_contract::fixtures::Fixtures;
use reqres_contract::scenarios::ScenarioContext;
use reqres_contract::schema::SchemaSet;

const PER_PAGE: usize = 6;
const TOKEN: &str = "QpwL5tke4Pnpja7X4";

const RESOURCES: [(u64, &str, i32, &str, &str); 12] = [
    (1, "cerulean", 2000, "#98B2D1", "15-4020"),
    (2, "fuchsia rose", 2001, "#C74375", "17-2031"),
    (3, "true red", 2002, "#BF1932", "19-1664"),
    (4, "aqua sky", 2003, "#7BC4C4", "14-4811"),
    (5, "tigerlily", 2004, "#E2583E", "17-1456"),
    (6, "blue turquoise", 2005, "#53B0AE", "15-5217"),
    (7, "sand dollar", 2006, "#DECDBE", "13-1106"),
    (8, "chili pepper", 2007, "#9B1B30", "19-1557"),
    (9, "blue iris", 2008, "#5A5B9F", "18-3943"),
    (10, "mimosa", 2009, "#F0C05A", "14-0848"),
    (11, "turquoise", 2010, "#45B5AA", "15-5519"),
    (12, "honeysuckle", 2011, "#D94F70", "18-2120"),
];

const USERS: [(u64, &str, &str, &str); 12] = [
    (1, "george.bluth", "George", "Bluth"),
    (2, "janet.weaver", "Janet", "Weaver"),
    (3, "emma.wong", "Emma", "Wong"),
    (4, "eve.holt", "Eve", "Holt"),
    (5, "charles.morris", "Charles", "Morris"),
    (6, "tracey.ramos", "Tracey", "Ramos"),
    (7, "michael.lawson", "Michael", "Lawson"),
    (8, "lindsay.ferguson", "Lindsay", "Ferguson"),
    (9, "tobias.funke", "Tobias", "Funke"),
    (10, "byron.fields", "Byron", "Fields"),
    (11, "george.edwards", "George", "Edwards"),
    (12, "rachel.howell", "Rachel", "Howell"),
];

/// Users created through `POST /users`. Only these can be updated.
#[derive(Debug, Default)]
struct CreatedUsers {
    next_id: AtomicU64,
    ids: Mutex<HashSet<String>>,
}

impl CreatedUsers {
    fn issue(&self) -> String {
        let id = (100 + self.next_id.fetch_add(1, Ordering::Relaxed)).to_string();
        self.ids.lock().unwrap().insert(id.clone());
        id
    }

    fn contains(&self, id: &str) -> bool {
        self.ids.lock().unwrap().contains(id)
    }
}

/// Running fake service. The server task stops when this is dropped.
pub struct FakeReqres {
    pub base_url: String,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for FakeReqres {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub async fn spawn() -> FakeReqres {
    spawn_with_latency(Duration::ZERO).await
}

/// Fake service that waits `latency` before answering every request.
pub async fn spawn_with_latency(latency: Duration) -> FakeReqres {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(latency);

    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeReqres {
        base_url: format!("http://{addr}/api"),
        server,
    }
}

pub fn test_client(base_url: &str) -> VerificationClient {
    VerificationClient::new(base_url, Duration::from_secs(5)).unwrap()
}

pub fn test_context(base_url: &str) -> ScenarioContext {
    test_context_with(base_url, Fixtures::reqres())
}

pub fn test_context_with(base_url: &str, fixtures: Fixtures) -> ScenarioContext {
    ScenarioContext::new(test_client(base_url), fixtures, SchemaSet::builtin().unwrap())
}

pub fn test_config(base_url: &str) -> SuiteConfig {
    SuiteConfig {
        base_url: base_url.to_string(),
        request_timeout: Duration::from_secs(5),
        scenario_timeout: Duration::from_secs(10),
        concurrency: 4,
        scenario_filter: None,
        schema_dir: None,
        log_level: "debug".into(),
    }
}

fn router(latency: Duration) -> Router {
    let created = Arc::new(CreatedUsers::default());

    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/unknown", get(list_resources))
        .route("/api/unknown/{id}", get(get_resource))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/plain", get(plain_text))
        .route("/api/failing", get(internal_error).post(internal_error))
        .layer(middleware::from_fn_with_state(latency, delay))
        .with_state(created)
}

async fn delay(State(latency): State<Duration>, request: Request, next: Next) -> Response {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    next.run(request).await
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

fn support() -> Value {
    json!({
        "url": "https://contentcaddy.io?utm_source=reqres&utm_medium=json&utm_campaign=referral",
        "text": "Tired of writing endless social media content? Let Content Caddy generate it for you."
    })
}

fn resource_json(id: u64) -> Option<Value> {
    RESOURCES
        .iter()
        .find(|r| r.0 == id)
        .map(|(id, name, year, color, pantone)| {
            json!({ "id": id, "name": name, "year": year, "color": color, "pantone_value": pantone })
        })
}

fn user_json(id: u64) -> Option<Value> {
    USERS.iter().find(|u| u.0 == id).map(|(id, handle, first, last)| {
        json!({
            "id": id,
            "email": format!("{handle}@reqres.in"),
            "first_name": first,
            "last_name": last,
            "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg"),
        })
    })
}

fn user_id_by_email(email: &str) -> Option<u64> {
    USERS
        .iter()
        .find(|(_, handle, _, _)| format!("{handle}@reqres.in") == email)
        .map(|u| u.0)
}

fn page_of(ids: impl Iterator<Item = u64>, total: usize, page: usize, render: fn(u64) -> Option<Value>) -> Value {
    let data: Vec<Value> = ids
        .skip((page.saturating_sub(1)) * PER_PAGE)
        .take(PER_PAGE)
        .filter_map(render)
        .collect();

    json!({
        "page": page,
        "per_page": PER_PAGE,
        "total": total,
        "total_pages": total.div_ceil(PER_PAGE),
        "data": data,
        "support": support(),
    })
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<usize>,
}

/// Validate email/password the way the service does, returning the
/// registered user's id.
fn check_credentials(body: &Value, unknown_message: &str) -> Result<u64, Response> {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if email.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Missing email or username"));
    }
    if password.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Missing password"));
    }
    user_id_by_email(email).ok_or_else(|| error(StatusCode::BAD_REQUEST, unknown_message))
}

async fn login(Json(body): Json<Value>) -> Response {
    match check_credentials(&body, "user not found") {
        Ok(_) => (StatusCode::OK, Json(json!({ "token": TOKEN }))).into_response(),
        Err(rejection) => rejection,
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    match check_credentials(&body, "Note: Only defined users succeed registration") {
        Ok(id) => (StatusCode::OK, Json(json!({ "id": id, "token": TOKEN }))).into_response(),
        Err(rejection) => rejection,
    }
}

async fn list_resources(Query(query): Query<PageQuery>) -> Response {
    let page = query.page.unwrap_or(1);
    let body = page_of(RESOURCES.iter().map(|r| r.0), RESOURCES.len(), page, resource_json);
    Json(body).into_response()
}

async fn get_resource(Path(id): Path<String>) -> Response {
    match id.parse::<u64>().ok().and_then(resource_json) {
        Some(data) => Json(json!({ "data": data, "support": support() })).into_response(),
        None => not_found(),
    }
}

async fn list_users(Query(query): Query<PageQuery>) -> Response {
    let page = query.page.unwrap_or(1);
    let body = page_of(USERS.iter().map(|u| u.0), USERS.len(), page, user_json);
    Json(body).into_response()
}

async fn get_user(Path(id): Path<String>) -> Response {
    match id.parse::<u64>().ok().and_then(user_json) {
        Some(data) => Json(json!({ "data": data, "support": support() })).into_response(),
        None => not_found(),
    }
}

async fn create_user(State(created): State<Arc<CreatedUsers>>, Json(mut body): Json<Value>) -> Response {
    let id = created.issue();
    if let Some(fields) = body.as_object_mut() {
        fields.insert("id".into(), json!(id));
        fields.insert("createdAt".into(), json!(now()));
    }
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_user(
    State(created): State<Arc<CreatedUsers>>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if !created.contains(&id) {
        return not_found();
    }
    if let Some(fields) = body.as_object_mut() {
        fields.insert("updatedAt".into(), json!(now()));
    }
    Json(body).into_response()
}

async fn delete_user(Path(id): Path<String>) -> Response {
    match id.parse::<u64>().ok().and_then(user_json) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

async fn plain_text() -> &'static str {
    "ok"
}

async fn internal_error() -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, "boom")
}
