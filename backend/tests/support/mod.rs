#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use std::env;

use talent_bridge_backend::{
    config::Config,
    models::user::{User, UserRole},
    router::build_router,
    state::AppState,
    utils::{cookies::TOKEN_COOKIE_NAME, jwt::issue_token},
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        session_secret: TEST_SECRET.to_string(),
        session_ttl_days: 7,
        google_client_id: None,
        redis_url: None,
        redis_pool_size: 2,
        redis_connect_timeout: 1,
        rate_limit_auth_max_requests: 10,
        rate_limit_auth_window_seconds: 60,
        rate_limit_global_max_requests: 300,
        rate_limit_global_window_seconds: 60,
        cookie_secure: false,
        time_zone: chrono_tz::Asia::Kolkata,
    }
}

/// State whose database pool is never used: the pool is lazy and points at a
/// closed port, so any accidental query fails instead of hanging.
pub fn stateless_state() -> AppState {
    let config = test_config("postgres://127.0.0.1:1/unreachable");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database_url)
        .expect("build lazy pool");
    AppState::new(pool, config, None, reqwest::Client::new())
}

pub fn stateless_app() -> Router {
    build_router(stateless_state())
}

/// Connects to the database named by `TEST_DATABASE_URL`, runs migrations,
/// and wipes the tables. Returns `None` (test skipped) when the variable is
/// unset, so the suite passes without local infrastructure.
pub async fn db_state() -> Option<AppState> {
    let Ok(url) = env::var("TEST_DATABASE_URL") else {
        eprintln!("--- TEST_DATABASE_URL not set, skipping database-backed test ---");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    sqlx::query("TRUNCATE applications, internships, users CASCADE")
        .execute(&pool)
        .await
        .expect("truncate tables");

    let config = test_config(&url);
    Some(AppState::new(pool, config, None, reqwest::Client::new()))
}

pub async fn seed_user(state: &AppState, name: &str, email: &str, role: UserRole) -> User {
    let mut user = User::new(name.to_string(), email.to_string(), None);
    user.role = role;
    sqlx::query(
        "INSERT INTO users (id, name, email, role, google_id, image, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.role.as_str())
    .bind(&user.google_id)
    .bind(&user.image)
    .bind(user.created_at)
    .execute(&state.pool)
    .await
    .expect("seed user");
    user
}

/// `Cookie` header value carrying a freshly signed session token.
pub fn session_cookie(user: &User) -> String {
    let token = issue_token(
        user.id.clone(),
        user.role.as_str().to_string(),
        user.email.clone(),
        TEST_SECRET,
        7,
    )
    .expect("issue test token");
    format!("{}={}", TOKEN_COOKIE_NAME, token)
}

pub fn raw_cookie(token: &str) -> String {
    format!("{}={}", TOKEN_COOKIE_NAME, token)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, cookie, None)
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    request(Method::POST, uri, cookie, Some(body))
}

pub fn patch_json(uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    request(Method::PATCH, uri, cookie, Some(body))
}

pub fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request(Method::DELETE, uri, cookie, None)
}

fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(json).expect("serialize request body"))
        }
        None => Body::empty(),
    };
    builder.body(body).expect("build request")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse response json")
}
