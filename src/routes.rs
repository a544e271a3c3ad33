//! HTTP surface: router assembly, handlers, and minimal page rendering
//!
//! Rendering quality is out of scope; pages are small inline HTML
//! shells. Every failure is recovered here as a redirect plus a
//! notice, never a raw error page.

use axum::{
    Extension, Json, Router,
    extract::{Form, State},
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    flash::{self, Notice},
    generator::{StatementForm, StatementInput},
    middleware::{require_anonymous, require_authenticated},
    password,
    session::{SESSION_COOKIE, SessionIdentity},
};

/// Login and registration form fields
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Create the application router
///
/// Guards are applied per route group at registration time; handler
/// bodies never re-check authentication.
pub fn create_router(state: AppState) -> Router {
    let anonymous = Router::new()
        .route("/", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route_layer(from_fn_with_state(state.clone(), require_anonymous));

    let authenticated = Router::new()
        .route("/home", get(home))
        .route("/logout", get(logout))
        .route("/generate", post(generate))
        .route_layer(from_fn_with_state(state.clone(), require_authenticated));

    Router::new()
        .merge(anonymous)
        .merge(authenticated)
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = crate::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(serde_json::json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "service": "projectscribe"
    }))
}

/// Login form
pub async fn login_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = flash::take(jar);

    let body = r#"<h1>Log in</h1>
<form method="post" action="/">
  <label>Username <input type="text" name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/register">Register</a></p>"#;

    (jar, Html(page("Log in", notice.as_ref(), body)))
}

/// Login attempt
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    info!("Login attempt for user: {}", form.username);

    let user = state.users.find_by_username(&form.username).await?;
    let user = match user {
        Some(user) if password::verify(&form.password, &user.password_hash) => user,
        _ => return Err(AppError::AuthenticationFailure),
    };

    let token = state.sessions.start_session(&user);
    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .build(),
    );
    let jar = flash::push(jar, &Notice::success("Login successful!"));

    info!("User logged in: {}", user.username);
    Ok((jar, Redirect::to("/home")).into_response())
}

/// Registration form
pub async fn register_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = flash::take(jar);

    let body = r#"<h1>Register</h1>
<form method="post" action="/register">
  <label>Username <input type="text" name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Register</button>
</form>
<p>Already registered? <a href="/">Log in</a></p>"#;

    (jar, Html(page("Register", notice.as_ref(), body)))
}

/// Registration attempt
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    if form.username.trim().is_empty() || form.password.is_empty() {
        return Err(AppError::InvalidInput);
    }

    let password_hash = password::hash(&form.password)?;
    let user = state.users.register(form.username.trim(), &password_hash).await?;

    info!("User registered: {}", user.username);
    Ok(flash::redirect_with_notice(
        "/",
        &Notice::success("Registration successful! Please log in."),
    ))
}

/// Main generation form
pub async fn home(Extension(identity): Extension<SessionIdentity>, jar: CookieJar) -> Response {
    let (jar, notice) = flash::take(jar);

    let body = format!(
        r#"<h1>Welcome, {username}</h1>
<p><a href="/logout">Log out</a></p>
<form method="post" action="/generate">
  <label>Project Type* <input type="text" name="project_type"></label>
  <label>Domain* <input type="text" name="domain"></label>
  <label>Goals* <textarea name="goals"></textarea></label>
  <label>Target Audience <input type="text" name="audience"></label>
  <label>Timeline <input type="text" name="timeline"></label>
  <label>Budget <input type="text" name="budget"></label>
  <label>Constraints <textarea name="constraints"></textarea></label>
  <button type="submit">Generate project statement</button>
</form>"#,
        username = escape(&identity.username),
    );

    (jar, Html(page("Home", notice.as_ref(), &body))).into_response()
}

/// End the session and clear the cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.end_session(cookie.value());
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    let jar = flash::push(jar, &Notice::info("Logged out successfully"));

    (jar, Redirect::to("/")).into_response()
}

/// Run the statement generator
pub async fn generate(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Form(form): Form<StatementForm>,
) -> AppResult<Response> {
    let input = StatementInput::from_form(form)?;

    info!(
        "Generating project statement for user: {}",
        identity.username
    );

    let statement = state
        .llm
        .generate(&input.prompt())
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    // The fragment comes from the upstream model and is rendered
    // as-is; nothing about it is persisted.
    let body = format!(
        r#"<h1>Generated project statement</h1>
<p>Project Type: {project_type} | Domain: {domain}</p>
<div class="statement">
{statement}
</div>
<p><a href="/home">Back</a></p>"#,
        project_type = escape(&input.project_type),
        domain = escape(&input.domain),
    );

    Ok(Html(page("Project Statement", None, &body)).into_response())
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, notice: Option<&Notice>, body: &str) -> String {
    let notice_html = match notice {
        Some(notice) => format!(
            r#"<p class="notice {}">{}</p>"#,
            notice.level.as_str(),
            escape(&notice.message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
{notice_html}
{body}
</body>
</html>"#,
        title = escape(title),
    )
}
