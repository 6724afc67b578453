//! Biblion Server - Library Catalog and Circulation

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblion_server::{
    api,
    config::AppConfig,
    factory::IdGenerator,
    repository::Repository,
    services::{
        notifier::{EventNotifier, TracingObserver},
        Services,
    },
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("biblion_server={},tower_http=debug", config.logging.level).into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblion Server v{}", env!("CARGO_PKG_VERSION"));

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services; library events go to the log
    let repository = Repository::new(config.circulation.max_borrows);
    let notifier = EventNotifier::new();
    notifier.subscribe(Arc::new(TracingObserver));

    let services = Services::new(
        repository,
        config.circulation.clone(),
        notifier,
        Arc::new(IdGenerator::from_entropy()),
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Items (catalog)
        .route("/items", get(api::items::list_items).post(api::items::create_item))
        .route("/items/search", get(api::items::search_by_author))
        .route("/items/:id", get(api::items::get_item))
        // Members
        .route("/members", post(api::members::create_member))
        .route("/members/:id", get(api::members::get_member))
        .route("/members/:id/loans", get(api::loans::get_member_loans))
        // Loans (circulation)
        .route("/loans", post(api::loans::borrow_item))
        .route("/loans/return", post(api::loans::return_item))
        .route("/loans/renew", post(api::loans::renew_loan))
        .route("/loans/overdue", get(api::loans::list_overdue))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .route("/stats/search-performance", get(api::stats::search_performance))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
