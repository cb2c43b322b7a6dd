//! Persisted row types
//!
//! These mirror the database tables; sheet contents themselves are
//! read and written as `foyerweb_core::Sheet`.

use chrono::{DateTime, Utc};

/// A household account
#[derive(Debug, Clone)]
pub struct Family {
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// Clear-text invite code shown on the account page
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
}

/// An authenticated user, always attached to one family
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub family_id: i64,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// A household member referenced by salary and charge lines.
///
/// Members are created implicitly the first time a sheet line names
/// them; `position` preserves first-seen order.
#[derive(Debug, Clone)]
pub struct FamilyMember {
    pub id: i64,
    pub family_id: i64,
    pub label: String,
    pub slug: String,
    pub position: i64,
}

/// A pending or consumed invitation
#[derive(Debug, Clone)]
pub struct Invitation {
    pub id: i64,
    pub family_id: i64,
    pub code_hash: String,
    pub created_by: Option<i64>,
    pub expires_at: DateTime<Utc>,
    pub used_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// An authenticated session, stored by token hash
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
