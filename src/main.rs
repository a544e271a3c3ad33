use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use projectscribe::{
    AppState, config::AppConfig, database, llm::LlmClient, repositories::UserRepository, routes,
    session::SessionStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting project statement service");

    // Load configuration once, up front
    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let pool = database::init_pool(&config.database_url, config.database_max_connections).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Ensure the users table exists
    database::init_schema(&pool).await?;

    let app_state = AppState {
        users: UserRepository::new(pool.clone()),
        db_pool: pool,
        sessions: SessionStore::new(),
        llm: LlmClient::new(&config),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Project statement service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
