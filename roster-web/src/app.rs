/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use roster_web::{app::{build_router, AppState}, config::Config};
/// use roster_shared::store::MemoryUserStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryUserStore::new()), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{routing::get, Router};
use roster_shared::store::UserStore;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request via Axum's `State` extractor; both fields are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// User storage backend
    pub store: Arc<dyn UserStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the router with all routes and middleware
///
/// ```text
/// /
/// ├── GET       /              # User list
/// ├── GET/POST  /add           # Add form / create
/// ├── GET       /view/:id      # Details
/// ├── GET/POST  /update/:id    # Edit form / save
/// ├── GET       /delete/:id    # Delete
/// ├── GET       /health        # Health check (JSON)
/// └── *                        # HTML 404
/// ```
///
/// Middleware, outermost first: security headers, request tracing.
pub fn build_router(state: AppState) -> Router {
    let production = state.config.server.production;

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route(
            "/add",
            get(routes::users::add_user_form).post(routes::users::add_user),
        )
        .route("/view/:id", get(routes::users::view_user))
        .route(
            "/update/:id",
            get(routes::users::update_user_form).post(routes::users::update_user),
        )
        .route("/delete/:id", get(routes::users::delete_user));

    Router::new()
        .merge(user_routes)
        .route("/health", get(routes::health::health_check))
        .fallback(routes::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}
