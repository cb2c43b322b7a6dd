//! Dashboard summary route

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::routes::require_session;
use crate::{ApiError, AppState};
use foyerweb_core::reports::{compute_dashboard_summary, DashboardSummary};

/// Number of sheets shown in the dashboard history
const RECENT_SHEETS: usize = 6;

/// Current-period metrics, yearly totals, and recent sheet history.
pub async fn api_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardSummary>, ApiError> {
    let (_, user) = require_session(&state, &headers).await?;

    let store = state.store.lock().await;
    let sheets = store.list_sheets(user.family_id, &state.cipher)?;
    let members: Vec<String> = store
        .list_members(user.family_id)?
        .into_iter()
        .map(|m| m.label)
        .collect();

    Ok(Json(compute_dashboard_summary(&sheets, &members, RECENT_SHEETS)))
}
