//! Application configuration loaded from the environment

use anyhow::Result;

/// Default Groq-compatible chat-completions endpoint base
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";

/// Default model used for statement generation
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// SQLite connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub database_max_connections: u32,
    /// API key for the text-generation service
    pub groq_api_key: String,
    /// Base URL of the chat-completions API
    pub groq_api_url: String,
    /// Model identifier sent with every generation request
    pub groq_model: String,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `GROQ_API_KEY`: API key for the text-generation service (required)
    /// - `DATABASE_URL`: SQLite connection URL (default: sqlite://app.db)
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum pool size (default: 5)
    /// - `BIND_ADDR`: Server bind address (default: 0.0.0.0:4000)
    /// - `GROQ_API_URL`: Chat-completions base URL (default: Groq's endpoint)
    /// - `GROQ_MODEL`: Model identifier (default: llama3-70b-8192)
    pub fn from_env() -> Result<Self> {
        let groq_api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| anyhow::anyhow!("GROQ_API_KEY environment variable not set"))?;

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://app.db".to_string());

        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:4000".to_string());

        let groq_api_url =
            std::env::var("GROQ_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let groq_model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(AppConfig {
            bind_addr,
            database_url,
            database_max_connections,
            groq_api_key,
            groq_api_url,
            groq_model,
        })
    }
}
