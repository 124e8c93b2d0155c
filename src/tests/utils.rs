use crate::auth::sessions;
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::users::upsert_user;
use crate::router::AppState;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Unique SQLite file path under the system temp dir, one per call.
pub fn temp_db_path(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let n = DB_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!(
            "agency_{prefix}_{}_{nanos}_{n}.sqlite3",
            std::process::id()
        ))
        .to_string_lossy()
        .into_owned()
}

/// Fresh database with the production schema.
pub fn init_test_db() -> Database {
    init_test_tracing();
    let db = Database::new(temp_db_path("router"));
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn test_state() -> AppState {
    AppState::new(init_test_db(), AppConfig::default())
}

pub fn test_state_with(config: AppConfig) -> AppState {
    AppState::new(init_test_db(), config)
}

/// Insert a user and open a session for them. Returns the raw session token.
pub fn create_session_for(db: &Database, username: &str, is_admin: bool) -> String {
    let now = now_unix();
    db.with_conn(|conn| {
        let user_id = upsert_user(conn, username, "not-a-real-hash", is_admin, now)?;
        sessions::create_session(conn, user_id, now, 3600)
    })
    .expect("Failed to create session")
}

pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_session(mut req: Request, token: &str) -> Request {
    req.headers_mut().insert(
        "Cookie",
        format!("session={token}").parse().unwrap(),
    );
    req
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("response body is not JSON")
}
