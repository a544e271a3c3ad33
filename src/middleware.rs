//! Access guards applied per route group
//!
//! Both guards short-circuit with a redirect plus a notice and never
//! touch the handler body.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    flash::{self, Notice},
    session::{SESSION_COOKIE, SessionIdentity},
};

fn session_from_request(state: &AppState, req: &Request) -> Option<SessionIdentity> {
    let jar = CookieJar::from_headers(req.headers());
    let token = jar.get(SESSION_COOKIE)?;
    state.sessions.get(token.value())
}

/// Require an active session; otherwise redirect to the login page
pub async fn require_authenticated(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match session_from_request(&state, &req) {
        Some(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        None => flash::redirect_with_notice("/", &Notice::warning("Please log in to continue.")),
    }
}

/// Require no active session; otherwise redirect to the landing page
pub async fn require_anonymous(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match session_from_request(&state, &req) {
        Some(_) => {
            flash::redirect_with_notice("/home", &Notice::info("You are already logged in."))
        }
        None => next.run(req).await,
    }
}
