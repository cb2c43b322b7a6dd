//! HTTP API server for foyerweb
//!
//! Routes are organized into modules:
//! - routes::auth: registration, login, logout
//! - routes::account: family info, members, invitations
//! - routes::sheets: monthly sheet CRUD and computed overviews
//! - routes::dashboard: cross-sheet summary
//!
//! Every authenticated handler resolves the session cookie first and
//! scopes all reads and writes by the session's family.

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use foyerweb_config::Config;
use foyerweb_crypto::FieldCipher;
use foyerweb_store::Store;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub cipher: Arc<FieldCipher>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::account::{api_account, api_create_invitation, api_update_account};
    use routes::auth::{api_login, api_logout, api_register};
    use routes::dashboard::api_dashboard;
    use routes::sheets::{
        api_sheet_create, api_sheet_delete, api_sheet_detail, api_sheet_update, api_sheets,
    };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/auth/register", post(api_register))
        .route("/api/auth/login", post(api_login))
        .route("/api/auth/logout", post(api_logout))
        .route("/api/account", get(api_account).patch(api_update_account))
        .route("/api/invitations", post(api_create_invitation))
        .route("/api/sheets", get(api_sheets))
        .route("/api/sheets", post(api_sheet_create))
        .route("/api/sheets/:id", get(api_sheet_detail))
        .route("/api/sheets/:id", put(api_sheet_update))
        .route("/api/sheets/:id", delete(api_sheet_delete))
        .route("/api/dashboard", get(api_dashboard))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and serves
/// until the process is stopped.
pub async fn start_server(
    config: Config,
    store: Arc<Mutex<Store>>,
    cipher: Arc<FieldCipher>,
) -> std::io::Result<()> {
    let addr = config.bind_address();
    let state = AppState {
        store,
        cipher,
        config,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting foyerweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /api/auth/* (registration, login, logout)");
    log::info!("  - /api/account (family and members)");
    log::info!("  - /api/sheets (monthly sheets)");
    log::info!("  - /api/dashboard (summary)");

    axum::serve(listener, router).await
}
