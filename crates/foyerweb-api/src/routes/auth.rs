//! Registration, login, and logout routes

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use chrono::Duration;
use serde::Deserialize;

use crate::routes::{session_token, SESSION_COOKIE};
use crate::{ApiError, AppState};
use foyerweb_crypto::{
    generate_invite_code, generate_session_token, hash_invite_code, hash_password,
    hash_session_token, verify_password,
};

/// How a new user attaches to a family
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterMode {
    /// Found a new family
    Create,
    /// Join an existing family with an invitation code
    Join,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub mode: RegisterMode,
    pub email: String,
    pub password: String,
    pub display_name: String,
    /// Required for mode=create
    #[serde(default)]
    pub family_name: Option<String>,
    /// Required for mode=join
    #[serde(default)]
    pub invite_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create an account, either founding a family or joining one.
pub async fn api_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_credentials(&request.email, &request.password, &request.display_name)?;

    let password_hash = hash_password(&request.password)?;
    let pepper = state.config.security.effective_pepper();
    let store = state.store.lock().await;

    let user = match request.mode {
        RegisterMode::Create => {
            let family_name = request
                .family_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| ApiError::BadRequest {
                    message: "A family name is required".to_string(),
                })?;

            let invite_code = generate_invite_code();
            let family = store.create_family(family_name, &invite_code)?;
            store.create_invitation(
                family.id,
                &hash_invite_code(&invite_code, pepper),
                None,
                Duration::days(state.config.security.invite_expiration_days),
            )?;
            log::info!("Created family '{}' (id {})", family.name, family.id);

            store.create_user(family.id, &request.email, &password_hash, &request.display_name)?
        }
        RegisterMode::Join => {
            let code = request
                .invite_code
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .ok_or_else(|| ApiError::BadRequest {
                    message: "An invitation code is required".to_string(),
                })?;

            let invitation = store.find_valid_invitation(&hash_invite_code(code, pepper))?;
            let family_id = match &invitation {
                Some(invitation) => invitation.family_id,
                // The account page keeps showing the family's
                // persistent code after the invitation record expires;
                // that code still joins.
                None => store
                    .find_family_by_invite_code(&code.to_uppercase())?
                    .ok_or_else(|| ApiError::NotFound {
                        resource: "invitation".to_string(),
                    })?
                    .id,
            };

            let user = store.create_user(
                family_id,
                &request.email,
                &password_hash,
                &request.display_name,
            )?;
            if let Some(invitation) = invitation {
                store.fulfill_invitation(invitation.id, user.id)?;
            }
            user
        }
    };

    // Each account shows up in the member list right away, before any
    // sheet mentions them.
    store.find_or_create_member(user.family_id, user.display_name.trim())?;

    log::info!("Registered user {} (id {})", user.email, user.id);
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": user.id,
            "email": user.email,
            "display_name": user.display_name,
            "family_id": user.family_id,
        })),
    ))
}

/// Verify credentials and open a session.
pub async fn api_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.lock().await;
    store.prune_expired_sessions()?;

    let user = store
        .find_user_by_email(&request.email)?
        .filter(|user| verify_password(&request.password, &user.password_hash))
        .ok_or(ApiError::Unauthorized)?;

    let token = generate_session_token();
    let ttl = Duration::hours(state.config.security.session_ttl_hours);
    store.create_session(user.id, &hash_session_token(&token), ttl)?;
    log::debug!("Opened session for user {}", user.id);

    let max_age = state.config.security.session_ttl_hours * 3600;
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(serde_json::json!({
            "id": user.id,
            "email": user.email,
            "display_name": user.display_name,
            "family_id": user.family_id,
        })),
    ))
}

/// Close the current session. Always succeeds, even without one.
pub async fn api_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = session_token(&headers) {
        let store = state.store.lock().await;
        store.delete_session(&hash_session_token(&token))?;
    }

    let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE);
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(serde_json::json!({ "success": true })),
    ))
}

fn validate_credentials(email: &str, password: &str, display_name: &str) -> Result<(), ApiError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest {
            message: "A valid email address is required".to_string(),
        });
    }
    if password.len() < 8 {
        return Err(ApiError::BadRequest {
            message: "Password must be at least 8 characters".to_string(),
        });
    }
    if display_name.trim().is_empty() {
        return Err(ApiError::BadRequest {
            message: "A display name is required".to_string(),
        });
    }
    Ok(())
}
