//! Dashboard handlers

use axum::{extract::State, Extension, Json};

use crate::app::{DashboardStatistics, RecentMaterial};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::AppState;

/// GET /dashboard/statistics
pub async fn get_statistics(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<DashboardStatistics>, AppError> {
    Ok(Json(state.dashboard_service.statistics(&user).await?))
}

/// GET /dashboard/materials/recent
///
/// The latest uploads, formatted for display.
pub async fn get_recent_materials(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<RecentMaterial>>, AppError> {
    Ok(Json(state.material_service.recent(&user).await?))
}
