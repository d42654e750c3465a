//! Summary handlers
//!
//! Manual summaries plus generation from an uploaded material.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::GenerateSummary;
use crate::domain::entities::{DisciplineId, Summary, SummaryId, User};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating a summary
#[derive(Debug, Deserialize)]
pub struct CreateSummaryRequest {
    pub discipline_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Request body for updating a summary
#[derive(Debug, Deserialize)]
pub struct UpdateSummaryRequest {
    pub title: String,
    pub content: String,
}

/// Query parameters for listing summaries
#[derive(Debug, Deserialize)]
pub struct ListSummariesQuery {
    #[serde(default)]
    pub discipline_id: Option<Uuid>,
}

/// GET /summaries[?discipline_id=]
pub async fn list_summaries(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<ListSummariesQuery>,
) -> Result<Json<Vec<Summary>>, AppError> {
    let summaries = match query.discipline_id {
        Some(id) => {
            state
                .summary_service
                .list_by_discipline(&user, &DisciplineId(id))
                .await?
        }
        None => state.summary_service.list(&user).await?,
    };
    Ok(Json(summaries))
}

/// POST /summaries
pub async fn create_summary(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateSummaryRequest>,
) -> Result<(StatusCode, Json<Summary>), AppError> {
    let summary = state
        .summary_service
        .create(
            &user,
            &DisciplineId(request.discipline_id),
            &request.title,
            &request.content,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /summaries/:id
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Summary>, AppError> {
    Ok(Json(state.summary_service.get(&user, &SummaryId(id)).await?))
}

/// PUT /summaries/:id
pub async fn update_summary(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSummaryRequest>,
) -> Result<Json<Summary>, AppError> {
    let summary = state
        .summary_service
        .update(&user, &SummaryId(id), &request.title, &request.content)
        .await?;
    Ok(Json(summary))
}

/// DELETE /summaries/:id
pub async fn delete_summary(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.summary_service.delete(&user, &SummaryId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /summaries/generate
///
/// Summarize a material. Counts against the daily generation quota.
pub async fn generate_summary(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<GenerateSummary>,
) -> Result<(StatusCode, Json<Summary>), AppError> {
    let summary = state
        .summary_service
        .generate_from_material(&user, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(summary)))
}
