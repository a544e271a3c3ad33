//! Session-authenticated web app that drafts project statements
//! through an upstream chat-completions API.

use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod flash;
pub mod generator;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod session;

use crate::{llm::LlmClient, repositories::UserRepository, session::SessionStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub users: UserRepository,
    pub sessions: SessionStore,
    pub llm: LlmClient,
}
