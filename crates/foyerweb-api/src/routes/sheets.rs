//! Monthly sheet routes

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::routes::require_session;
use crate::{ApiError, AppState};
use foyerweb_core::models::{Budget, Charge, Salary, Sheet};
use foyerweb_core::reports::{compute_sheet_overview, SheetDigest, SheetOverview};
use foyerweb_core::{compute_sheet_metrics, validate_sheet};

/// Incoming sheet body for create and update
#[derive(Debug, Deserialize)]
pub struct SheetPayload {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub salaries: Vec<Salary>,
    #[serde(default)]
    pub charges: Vec<Charge>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl SheetPayload {
    fn into_sheet(self) -> Sheet {
        Sheet {
            id: 0,
            year: self.year,
            month: self.month,
            salaries: self.salaries,
            charges: self.charges,
            budgets: self.budgets,
        }
    }
}

/// A sheet with its full computed overview
#[derive(Debug, Serialize)]
pub struct SheetDetail {
    pub sheet: Sheet,
    pub period_label: String,
    pub overview: SheetOverview,
}

/// The family's sheets with their metrics, newest period first.
pub async fn api_sheets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<SheetDigest>>, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;

    let store = state.store.lock().await;
    let sheets = store.list_sheets(user.family_id, &state.cipher)?;

    let digests = sheets
        .iter()
        .map(|sheet| SheetDigest {
            id: sheet.id,
            year: sheet.year,
            month: sheet.month,
            period_label: sheet.period_label(),
            metrics: compute_sheet_metrics(sheet),
        })
        .collect();

    Ok(Json(digests))
}

/// Create a sheet. One sheet per family per (year, month).
pub async fn api_sheet_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SheetPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;

    let sheet = payload.into_sheet();
    validate_sheet(&sheet)?;

    let mut store = state.store.lock().await;
    let id = store.insert_sheet(user.family_id, &sheet, &state.cipher)?;
    log::info!(
        "Created sheet {} ({}/{}) for family {}",
        id,
        sheet.month,
        sheet.year,
        user.family_id
    );

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// One sheet with the full computed pipeline output.
pub async fn api_sheet_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<SheetDetail>, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;

    let store = state.store.lock().await;
    let sheet = store
        .get_sheet(user.family_id, id, &state.cipher)?
        .ok_or_else(|| sheet_not_found(id))?;

    let member_labels: Vec<String> = store
        .list_members(user.family_id)?
        .into_iter()
        .map(|m| m.label)
        .collect();
    let overview = compute_sheet_overview(&sheet, &member_labels);

    Ok(Json(SheetDetail {
        period_label: sheet.period_label(),
        sheet,
        overview,
    }))
}

/// Replace a sheet's contents. Last writer wins.
pub async fn api_sheet_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<SheetPayload>,
) -> Result<Json<Sheet>, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;

    let sheet = payload.into_sheet();
    validate_sheet(&sheet)?;

    let mut store = state.store.lock().await;
    if !store.replace_sheet(user.family_id, id, &sheet, &state.cipher)? {
        return Err(sheet_not_found(id));
    }

    let updated = store
        .get_sheet(user.family_id, id, &state.cipher)?
        .ok_or_else(|| sheet_not_found(id))?;
    Ok(Json(updated))
}

/// Delete a sheet and everything on it.
pub async fn api_sheet_delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;

    let store = state.store.lock().await;
    if !store.delete_sheet(user.family_id, id)? {
        return Err(sheet_not_found(id));
    }
    log::info!("Deleted sheet {} for family {}", id, user.family_id);

    Ok(Json(serde_json::json!({ "success": true })))
}

fn sheet_not_found(id: i64) -> ApiError {
    ApiError::NotFound {
        resource: format!("sheet {}", id),
    }
}
