//! End-to-end tests for registration, login, guards, and logout
//!
//! Requests are driven through the router in-process; no listener is
//! bound and no real database file is touched.

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use tower::ServiceExt;

use projectscribe::{
    AppState, config::AppConfig, database, llm::LlmClient, repositories::UserRepository, routes,
    session::SessionStore,
};

async fn test_app() -> Router {
    let pool = database::init_pool("sqlite::memory:", 1).await.unwrap();
    database::init_schema(&pool).await.unwrap();

    let config = AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        groq_api_key: "test-key".to_string(),
        // Unroutable: these tests must never reach the upstream
        groq_api_url: "http://127.0.0.1:9".to_string(),
        groq_model: "test-model".to_string(),
    };

    let state = AppState {
        users: UserRepository::new(pool.clone()),
        db_pool: pool,
        sessions: SessionStore::new(),
        llm: LlmClient::new(&config),
    };

    routes::create_router(state)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn location(response: &Response<axum::body::Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

/// Extract a `name=value` cookie pair from the Set-Cookie headers
fn cookie_pair(response: &Response<axum::body::Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or("").to_string())
        .find(|pair| pair.starts_with(&format!("{name}=")))
}

async fn body_string(response: Response<axum::body::Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Register alice and log in, returning the session cookie pair
async fn login_as_alice(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form_post("/register", "username=alice&password=secret123", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(form_post("/", "username=alice&password=secret123", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/home");

    cookie_pair(&response, "session_token").expect("login set no session cookie")
}

#[tokio::test]
async fn test_anonymous_home_redirects_to_login() {
    let app = test_app().await;

    let response = app.oneshot(get("/home", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let notice = cookie_pair(&response, "notice").unwrap();
    assert!(notice.contains("warning"));
}

#[tokio::test]
async fn test_register_rejects_empty_fields() {
    let app = test_app().await;

    let response = app
        .oneshot(form_post("/register", "username=&password=", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/register");

    let notice = cookie_pair(&response, "notice").unwrap();
    assert!(notice.contains("danger"));
}

#[tokio::test]
async fn test_duplicate_registration_fails() {
    let app = test_app().await;

    let first = app
        .clone()
        .oneshot(form_post("/register", "username=alice&password=secret123", None))
        .await
        .unwrap();
    assert_eq!(location(&first), "/");

    let second = app
        .clone()
        .oneshot(form_post("/register", "username=alice&password=other456", None))
        .await
        .unwrap();
    assert_eq!(location(&second), "/register");

    let notice = cookie_pair(&second, "notice").unwrap();
    assert!(notice.contains("Username%20already%20exists"));
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/register", "username=alice&password=secret123", None))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_post("/", "username=alice&password=wrong", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(cookie_pair(&response, "session_token").is_none());

    let notice = cookie_pair(&response, "notice").unwrap();
    assert!(notice.contains("danger"));
}

#[tokio::test]
async fn test_login_with_unknown_user_fails() {
    let app = test_app().await;

    let response = app
        .oneshot(form_post("/", "username=nobody&password=whatever", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_authenticated_login_page_redirects_home() {
    let app = test_app().await;
    let session = login_as_alice(&app).await;

    let response = app.oneshot(get("/", Some(&session))).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/home");

    let notice = cookie_pair(&response, "notice").unwrap();
    assert!(notice.contains("info"));
}

#[tokio::test]
async fn test_home_greets_authenticated_user() {
    let app = test_app().await;
    let session = login_as_alice(&app).await;

    let response = app.oneshot(get("/home", Some(&session))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Welcome, alice"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = test_app().await;
    let session = login_as_alice(&app).await;

    let response = app
        .clone()
        .oneshot(get("/logout", Some(&session)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // The old token no longer authenticates
    let response = app.oneshot(get("/home", Some(&session))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_health_check_is_public() {
    let app = test_app().await;

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
