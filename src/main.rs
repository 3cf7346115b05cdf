use fantasy_league_api::api::{self, AppState};
use fantasy_league_api::config::{AppConfig, StorageBackend};
use fantasy_league_api::domain::repositories::Repositories;
use fantasy_league_api::infrastructure::repositories::{postgres_repositories, InMemoryStore};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let repos = match config.storage {
        StorageBackend::Postgres => connect_postgres(&config).await,
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data will not survive a restart");
            InMemoryStore::new().repositories()
        }
    };

    let app = api::router(AppState::new(repos));

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}

async fn connect_postgres(config: &AppConfig) -> Repositories {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database connected successfully");
    postgres_repositories(pool)
}
