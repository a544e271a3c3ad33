//! One-shot notice cookies shown on the next rendered page

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Cookie carrying the pending notice
pub const NOTICE_COOKIE: &str = "notice";

/// Severity of a notice, mapped to a CSS class when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Danger => "danger",
        }
    }

    fn parse(s: &str) -> Level {
        match s {
            "success" => Level::Success,
            "warning" => Level::Warning,
            "danger" => Level::Danger,
            _ => Level::Info,
        }
    }
}

/// A transient user-visible notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Danger,
            message: message.into(),
        }
    }
}

/// Queue a notice for the next rendered page
pub fn push(jar: CookieJar, notice: &Notice) -> CookieJar {
    let value = format!(
        "{}:{}",
        notice.level.as_str(),
        urlencoding::encode(&notice.message)
    );
    jar.add(Cookie::build((NOTICE_COOKIE, value)).path("/").build())
}

/// Read and clear the pending notice, if any
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let notice = jar.get(NOTICE_COOKIE).and_then(|cookie| {
        let (level, encoded) = cookie.value().split_once(':')?;
        let message = urlencoding::decode(encoded).ok()?.into_owned();
        Some(Notice {
            level: Level::parse(level),
            message,
        })
    });

    let jar = match notice {
        Some(_) => jar.remove(Cookie::build(NOTICE_COOKIE).path("/").build()),
        None => jar,
    };

    (jar, notice)
}

/// Build a 303 redirect carrying a notice cookie
///
/// Used by the access guards and the error type, which have no
/// request-scoped jar of their own.
pub fn redirect_with_notice(location: &str, notice: &Notice) -> Response {
    let jar = CookieJar::from_headers(&axum::http::HeaderMap::new());
    (push(jar, notice), Redirect::to(location)).into_response()
}
