//! Discipline handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::DisciplineOverview;
use crate::domain::entities::{Discipline, DisciplineId, User};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating or updating a discipline
#[derive(Debug, Deserialize)]
pub struct DisciplineRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query parameters for the materials page of a discipline
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_per_page() -> u64 {
    10
}

/// GET /disciplines
pub async fn list_disciplines(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Discipline>>, AppError> {
    Ok(Json(state.discipline_service.list(&user).await?))
}

/// POST /disciplines
pub async fn create_discipline(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<DisciplineRequest>,
) -> Result<(StatusCode, Json<Discipline>), AppError> {
    let discipline = state
        .discipline_service
        .create(&user, &request.name, request.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(discipline)))
}

/// GET /disciplines/:id
///
/// The discipline with its summaries and one page of materials.
pub async fn get_discipline(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<DisciplineOverview>, AppError> {
    let overview = state
        .discipline_service
        .get_overview(&user, &DisciplineId(id), query.page, query.per_page)
        .await?;
    Ok(Json(overview))
}

/// PUT /disciplines/:id
pub async fn update_discipline(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(request): Json<DisciplineRequest>,
) -> Result<Json<Discipline>, AppError> {
    let discipline = state
        .discipline_service
        .update(
            &user,
            &DisciplineId(id),
            &request.name,
            request.description.as_deref(),
        )
        .await?;
    Ok(Json(discipline))
}

/// DELETE /disciplines/:id
///
/// Also removes the discipline's summaries and materials.
pub async fn delete_discipline(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .discipline_service
        .delete(&user, &DisciplineId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
