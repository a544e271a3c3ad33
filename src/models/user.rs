//! User model

use sqlx::FromRow;

/// User account
///
/// `password_hash` is the PHC string produced by the password module,
/// never the raw password.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}
