//! WCC CMS - Content management backend for the community platform

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wcc_cms::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxEventRepository, SqlxPageRepository},
    },
    services::{ContentService, EventService, ResourceStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wcc_cms=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WCC CMS...");

    // Load configuration
    let config_path = std::env::var("WCC_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.yml"));
    let config = Config::load_with_env(&config_path)?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    pool.ping().await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize repositories and services
    let page_repo = SqlxPageRepository::boxed(pool.clone());
    let event_repo = SqlxEventRepository::boxed(pool.clone());
    let resources = Arc::new(ResourceStore::new(config.content.resources_path.clone()));

    let content_service = Arc::new(ContentService::new(page_repo, resources.clone()));
    let event_service = Arc::new(EventService::new(event_repo));

    // Seed default content
    if config.content.seed_defaults {
        content_service.seed_defaults().await?;
        event_service.seed_defaults(&resources).await?;
        tracing::info!("Default content initialized");
    }

    let state = AppState {
        content_service,
        event_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin)?;

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    pool.close().await;
    Ok(())
}
