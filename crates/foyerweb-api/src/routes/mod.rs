//! Route modules for the API server
//!
//! - auth: registration, login, logout
//! - account: family info, members, invitations
//! - sheets: monthly sheet CRUD and computed overviews
//! - dashboard: cross-sheet summary

pub mod account;
pub mod auth;
pub mod dashboard;
pub mod sheets;

use axum::http::HeaderMap;

use crate::{ApiError, AppState};
use foyerweb_store::{Session, User};

/// Name of the session cookie
pub(crate) const SESSION_COOKIE: &str = "foyerweb_session";

/// Extract the session token from the Cookie header, if present.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    for pair in cookies.split(';') {
        let pair = pair.trim();
        if let Some(value) = pair.strip_prefix(SESSION_COOKIE) {
            if let Some(value) = value.strip_prefix('=') {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Resolve the authenticated user from the session cookie.
///
/// Every authenticated handler calls this first; the returned user's
/// family_id scopes all subsequent queries.
pub(crate) async fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(Session, User), ApiError> {
    let token = session_token(headers).ok_or(ApiError::Unauthorized)?;
    let token_hash = foyerweb_crypto::hash_session_token(&token);

    let store = state.store.lock().await;
    store
        .find_valid_session(&token_hash)?
        .ok_or(ApiError::Unauthorized)
}
