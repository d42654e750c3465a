//! PDFocus API Server
//!
//! Study-notes backend: users organise disciplines, upload study materials
//! and keep summaries, written by hand or generated from a material.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    FrequencySummarizer, LocalMaterialStorage, LoggingAccountNotifier, LoggingFeedbackNotifier,
    PostgresConfirmationTokenRepository, PostgresDisciplineRepository, PostgresFeedbackRepository,
    PostgresMaterialRepository, PostgresSummaryRepository, PostgresUserRepository,
    StoredMaterialTextExtractor,
};
use app::{
    DashboardService, DisciplineService, FeedbackService, MaterialService, SummaryService,
    UserService,
};
use config::Config;

type Disciplines = PostgresDisciplineRepository;
type Summaries = PostgresSummaryRepository;
type Materials = PostgresMaterialRepository;
type Users = PostgresUserRepository;
type Storage = LocalMaterialStorage;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service:
        Arc<UserService<Users, PostgresConfirmationTokenRepository, LoggingAccountNotifier>>,
    pub discipline_service: Arc<DisciplineService<Disciplines, Summaries, Materials, Storage>>,
    pub material_service: Arc<MaterialService<Disciplines, Materials, Storage>>,
    pub summary_service: Arc<
        SummaryService<
            Summaries,
            Disciplines,
            Materials,
            Users,
            StoredMaterialTextExtractor<Storage>,
            FrequencySummarizer,
        >,
    >,
    pub feedback_service:
        Arc<FeedbackService<PostgresFeedbackRepository, Users, LoggingFeedbackNotifier>>,
    pub dashboard_service: Arc<DashboardService<Disciplines, Summaries, Materials>>,
    pub config: Config,
}

impl AppState {
    /// Wire adapters and services on top of a database connection
    pub fn new(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
        let token_repo = Arc::new(PostgresConfirmationTokenRepository::new(db.clone()));
        let discipline_repo = Arc::new(PostgresDisciplineRepository::new(db.clone()));
        let summary_repo = Arc::new(PostgresSummaryRepository::new(db.clone()));
        let material_repo = Arc::new(PostgresMaterialRepository::new(db.clone()));
        let feedback_repo = Arc::new(PostgresFeedbackRepository::new(db));

        let storage = Arc::new(LocalMaterialStorage::new(config.storage_root.clone()));
        let extractor = Arc::new(StoredMaterialTextExtractor::new(storage.clone()));
        let summarizer = Arc::new(FrequencySummarizer::new());
        let notifier = Arc::new(LoggingFeedbackNotifier::new(config.feedback_inbox.clone()));
        let account_notifier = Arc::new(LoggingAccountNotifier::new(config.frontend_url.clone()));

        Self {
            user_service: Arc::new(UserService::new(
                user_repo.clone(),
                token_repo,
                account_notifier,
            )),
            discipline_service: Arc::new(DisciplineService::new(
                discipline_repo.clone(),
                summary_repo.clone(),
                material_repo.clone(),
                storage.clone(),
            )),
            material_service: Arc::new(MaterialService::new(
                discipline_repo.clone(),
                material_repo.clone(),
                storage,
            )),
            summary_service: Arc::new(SummaryService::new(
                summary_repo.clone(),
                discipline_repo.clone(),
                material_repo.clone(),
                user_repo.clone(),
                extractor,
                summarizer,
                config.daily_summary_limit,
            )),
            feedback_service: Arc::new(FeedbackService::new(
                feedback_repo,
                user_repo,
                notifier,
                config.daily_feedback_limit,
            )),
            dashboard_service: Arc::new(DashboardService::new(
                discipline_repo,
                summary_repo,
                material_repo,
            )),
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
fn router(state: AppState) -> anyhow::Result<Router> {
    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    let rate_limited_routes = Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/confirm-email", post(handlers::confirm_email))
        .route("/users/register", post(handlers::register))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let protected_routes = Router::new()
        .route("/users/me", get(handlers::me))
        .route(
            "/disciplines",
            get(handlers::list_disciplines).post(handlers::create_discipline),
        )
        .route(
            "/disciplines/:id",
            get(handlers::get_discipline)
                .put(handlers::update_discipline)
                .delete(handlers::delete_discipline),
        )
        .route(
            "/materials",
            get(handlers::list_materials).post(handlers::upload_material),
        )
        .route("/materials/:id", delete(handlers::delete_material))
        .route("/materials/:id/download", get(handlers::download_material))
        .route("/materials/:id/view", get(handlers::view_material))
        .route(
            "/summaries",
            get(handlers::list_summaries).post(handlers::create_summary),
        )
        .route("/summaries/generate", post(handlers::generate_summary))
        .route(
            "/summaries/:id",
            get(handlers::get_summary)
                .put(handlers::update_summary)
                .delete(handlers::delete_summary),
        )
        .route("/feedback", post(handlers::submit_feedback))
        .route("/dashboard/statistics", get(handlers::get_statistics))
        .route(
            "/dashboard/materials/recent",
            get(handlers::get_recent_materials),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let max_upload_bytes = state.config.max_upload_bytes;

    Ok(Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(rate_limited_routes)
        .merge(protected_routes)
        // Middleware
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pdfocus_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PDFocus API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tokio::fs::create_dir_all(&config.storage_root)
        .await
        .with_context(|| format!("Failed to create {}", config.storage_root.display()))?;
    tracing::info!(root = %config.storage_root.display(), "Material storage ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(db, config))?;

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
