//! Resume Builder Backend
//!
//! REST backend for building, storing and ATS-scoring resumes, with SQLite
//! persistence and cookie sessions.

mod api;
mod ats;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod skills;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ats::{AtsGateway, HttpAtsGateway};
use config::Config;
use db::Repository;
use skills::SkillCatalog;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
    pub skills: Arc<SkillCatalog>,
    pub ats: Arc<dyn AtsGateway>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    for message in &config.rejected {
        tracing::warn!("{}", message);
    }

    tracing::info!("Starting Resume Builder Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("ATS analyzer: {}", config.ats_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    if !config.cookie_secure {
        tracing::warn!("Session cookie is not marked Secure (RESUME_COOKIE_SECURE)");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    let skills = Arc::new(SkillCatalog::load(config.skills_path.as_deref())?);
    tracing::info!("Skill catalog loaded");

    let ats: Arc<dyn AtsGateway> =
        Arc::new(HttpAtsGateway::new(config.ats_url.clone(), config.ats_timeout)?);

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
        skills,
        ats,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Resume routes (session required)
    let resume_routes = Router::new()
        .route("/create", post(api::create_resume))
        .route("/list", get(api::list_resumes))
        .route("/api/list", get(api::list_resumes))
        .route("/skills/suggestions", get(api::skill_suggestions))
        .route("/skills/search", post(api::search_skills))
        .route(
            "/{id}",
            get(api::get_resume)
                .put(api::update_resume)
                .delete(api::delete_resume),
        )
        .route("/{id}/default", put(api::set_default_resume))
        .route("/{id}/text", get(api::resume_text))
        .route("/{id}/analyze", post(api::analyze_resume))
        .route("/{id}/ats-score", get(api::get_ats_score))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    // Account routes
    let auth_routes = Router::new()
        .route("/me", get(api::me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ))
        .route("/register", post(api::register))
        .route("/login", post(api::login))
        .route("/logout", post(api::logout));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/resume", resume_routes)
        .nest("/auth", auth_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
