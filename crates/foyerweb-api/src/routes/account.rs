//! Family account routes

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::routes::require_session;
use crate::{ApiError, AppState};
use foyerweb_crypto::{generate_invite_code, hash_invite_code, hash_password, verify_password};

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct AccountView {
    pub family_id: i64,
    pub family_name: String,
    pub family_slug: String,
    pub invite_code: String,
    pub members: Vec<MemberView>,
    pub users: Vec<UserView>,
}

/// Family name, invite code, members, and registered users.
pub async fn api_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AccountView>, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;

    let store = state.store.lock().await;
    let family = store
        .find_family(user.family_id)?
        .ok_or_else(|| ApiError::NotFound {
            resource: "family".to_string(),
        })?;

    let members = store
        .list_members(family.id)?
        .into_iter()
        .map(|m| MemberView {
            id: m.id,
            label: m.label,
        })
        .collect();
    let users = store
        .list_users(family.id)?
        .into_iter()
        .map(|u| UserView {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
        })
        .collect();

    Ok(Json(AccountView {
        family_id: family.id,
        family_name: family.name,
        family_slug: family.slug,
        invite_code: family.invite_code,
        members,
        users,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Validated subset of an account update; blank fields are dropped.
struct AccountChanges {
    display_name: Option<String>,
    email: Option<String>,
    new_password: Option<String>,
    current_password: Option<String>,
}

/// Update the caller's display name, email, or password. Changing the
/// password requires the current one.
pub async fn api_update_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<UserView>, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;
    let changes = validate_account_update(&request)?;

    let password_hash = match changes.new_password.as_deref() {
        Some(new_password) => {
            let current = changes.current_password.as_deref().unwrap_or("");
            if !verify_password(current, &user.password_hash) {
                return Err(ApiError::BadRequest {
                    message: "Current password is incorrect".to_string(),
                });
            }
            Some(hash_password(new_password)?)
        }
        None => None,
    };

    let store = state.store.lock().await;
    let updated = store.update_user(
        user.id,
        changes.display_name.as_deref(),
        changes.email.as_deref(),
        password_hash.as_deref(),
    )?;
    log::info!("User {} updated their profile", updated.id);

    Ok(Json(UserView {
        id: updated.id,
        email: updated.email,
        display_name: updated.display_name,
    }))
}

fn validate_account_update(request: &UpdateAccountRequest) -> Result<AccountChanges, ApiError> {
    let display_name = request
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    if request.display_name.is_some() && display_name.is_none() {
        return Err(ApiError::BadRequest {
            message: "A display name is required".to_string(),
        });
    }

    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string);
    if let Some(email) = &email {
        if !email.contains('@') {
            return Err(ApiError::BadRequest {
                message: "A valid email address is required".to_string(),
            });
        }
    }

    let new_password = request.new_password.clone().filter(|p| !p.is_empty());
    let current_password = request.current_password.clone().filter(|p| !p.is_empty());
    if let Some(new_password) = &new_password {
        if new_password.len() < 8 {
            return Err(ApiError::BadRequest {
                message: "Password must be at least 8 characters".to_string(),
            });
        }
        if current_password.is_none() {
            return Err(ApiError::BadRequest {
                message: "The current password is required".to_string(),
            });
        }
    }

    if display_name.is_none() && email.is_none() && new_password.is_none() {
        return Err(ApiError::BadRequest {
            message: "Nothing to update".to_string(),
        });
    }

    Ok(AccountChanges {
        display_name,
        email,
        new_password,
        current_password,
    })
}

/// Mint a fresh invitation code for the caller's family.
pub async fn api_create_invitation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;

    let code = generate_invite_code();
    let code_hash = hash_invite_code(&code, state.config.security.effective_pepper());
    let validity = Duration::days(state.config.security.invite_expiration_days);

    let store = state.store.lock().await;
    store.revoke_active_invitations(user.family_id)?;
    let invitation = store.create_invitation(user.family_id, &code_hash, Some(user.id), validity)?;
    // Keep the code shown on the account page in sync with the
    // invitation that can actually be redeemed
    store.update_invite_code(user.family_id, &code)?;
    log::info!(
        "User {} minted an invitation for family {}",
        user.id,
        user.family_id
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "code": code,
            "expires_at": invitation.expires_at.to_rfc3339(),
        })),
    ))
}
