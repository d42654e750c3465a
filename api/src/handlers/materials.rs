//! Material handlers
//!
//! Upload (multipart), listing, download/inline view and deletion of
//! materials. File bytes go through material storage, metadata through the
//! database.

use std::io;

use axum::{
    extract::{multipart::Field, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use futures::TryStreamExt;
use serde::Deserialize;
use tokio_util::io::StreamReader;
use uuid::Uuid;

use crate::app::{MaterialService, MaterialUpload};
use crate::domain::entities::{DisciplineId, Material, MaterialId, User};
use crate::domain::ports::{DisciplineRepository, MaterialRepository, MaterialStorage};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing materials
#[derive(Debug, Deserialize)]
pub struct ListMaterialsQuery {
    pub discipline_id: Uuid,
}

/// GET /materials?discipline_id=
pub async fn list_materials(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<ListMaterialsQuery>,
) -> Result<Json<Vec<Material>>, AppError> {
    let materials = state
        .material_service
        .list(&user, &DisciplineId(query.discipline_id))
        .await?;
    Ok(Json(materials))
}

/// POST /materials
///
/// Multipart form with a `discipline_id` part followed by a `file` part.
pub async fn upload_material(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Material>), AppError> {
    let material = store_upload(&state.material_service, &user, &mut multipart).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// Read the upload form and stream the file part into storage
async fn store_upload<DR, MR, MS>(
    service: &MaterialService<DR, MR, MS>,
    user: &User,
    multipart: &mut Multipart,
) -> Result<Material, AppError>
where
    DR: DisciplineRepository,
    MR: MaterialRepository,
    MS: MaterialStorage,
{
    let upload = read_upload(multipart).await?;
    service.upload(user, upload).await
}

fn bad_multipart(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(e.to_string())
}

/// Next form part, which must be named `name`
async fn expect_part<'a>(
    multipart: &'a mut Multipart,
    name: &str,
) -> Result<Field<'a>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(bad_multipart)?
        .ok_or_else(|| AppError::BadRequest(format!("Missing '{}' part", name)))?;

    if field.name() != Some(name) {
        return Err(AppError::BadRequest(format!(
            "Expected the '{}' part, got '{}'. Send 'discipline_id' before 'file'",
            name,
            field.name().unwrap_or_default()
        )));
    }
    Ok(field)
}

/// The file part is not buffered: its body becomes the upload's content
/// stream, so it has to be the last part read.
async fn read_upload(multipart: &mut Multipart) -> Result<MaterialUpload<'_>, AppError> {
    let raw = expect_part(multipart, "discipline_id")
        .await?
        .text()
        .await
        .map_err(bad_multipart)?;
    let discipline_id: Uuid = raw
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid discipline_id '{}'", raw.trim())))?;

    let file = expect_part(multipart, "file").await?;
    let original_name = file.file_name().unwrap_or_default().to_string();
    let content_type = file.content_type().map(str::to_string);
    let body = file.map_err(|e| io::Error::new(io::ErrorKind::Other, e));

    Ok(MaterialUpload {
        original_name,
        content_type,
        discipline_id: DisciplineId(discipline_id),
        content: Box::new(StreamReader::new(Box::pin(body))),
    })
}

/// GET /materials/:id/download
pub async fn download_material(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    serve_material(&state, &user, id, "attachment").await
}

/// GET /materials/:id/view
///
/// Same bytes as download, but shown inline by the browser.
pub async fn view_material(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    serve_material(&state, &user, id, "inline").await
}

async fn serve_material(
    state: &AppState,
    user: &User,
    id: Uuid,
    disposition: &str,
) -> Result<Response, AppError> {
    let (material, bytes) = state
        .material_service
        .download(user, &MaterialId(id))
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, material.content_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(disposition, &material.original_name),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Header value such as `attachment; filename="notes.pdf"`
///
/// Characters that cannot appear in a quoted ASCII header value are replaced.
fn content_disposition(disposition: &str, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!("{}; filename=\"{}\"", disposition, safe)
}

/// DELETE /materials/:id
pub async fn delete_material(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .material_service
        .delete(&user, &MaterialId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
