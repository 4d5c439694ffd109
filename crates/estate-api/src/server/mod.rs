//! Server setup and initialization
//!
//! Provides the application builder, backend selection, and server runner.

use std::sync::Arc;

use axum::Router;
use estate_common::{AppConfig, AppError, JwtService};
use estate_core::OFFER_IMAGE_COUNT;
use estate_db::{
    apply_schema, create_pool, MemoryCommentRepository, MemoryOfferRepository, MemoryStore,
    MemoryUserRepository, PgCommentRepository, PgOfferRepository, PgUserRepository, PoolConfig,
};
use estate_service::ServiceContext;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, MiddlewareSettings};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Room for multipart framing on top of the file payloads
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let body_limit = config.storage.max_file_size_bytes() * OFFER_IMAGE_COUNT + MULTIPART_OVERHEAD;

    let router = apply_middleware(
        create_router(),
        &MiddlewareSettings {
            rate_limit: &config.rate_limit,
            cors: &config.cors,
            is_production: config.app.env.is_production(),
            body_limit,
        },
    )?;

    let uploads = ServeDir::new(state.uploads().directory());

    Ok(router
        .merge(health_routes())
        .nest_service("/upload", uploads)
        .with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// `DATABASE_URL=memory://` selects the in-memory backend.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.expiry));
    let builder = ServiceContext::builder().jwt_service(jwt_service);

    let builder = if config.database.is_memory() {
        info!("Using in-memory storage");
        let store = MemoryStore::new_shared();
        builder
            .offer_repo(Arc::new(MemoryOfferRepository::new(store.clone())))
            .comment_repo(Arc::new(MemoryCommentRepository::new(store.clone())))
            .user_repo(Arc::new(MemoryUserRepository::new(store)))
    } else {
        info!("Connecting to PostgreSQL...");
        let pool = create_pool(&PoolConfig::from(&config.database))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        apply_schema(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("PostgreSQL connection established");

        builder
            .offer_repo(Arc::new(PgOfferRepository::new(pool.clone())))
            .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
            .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
            .pool(pool)
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let state = AppState::new(service_context, config);
    state.uploads().ensure_directory().await?;

    Ok(state)
}

/// Serve `app` on an already bound listener until Ctrl+C
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}
