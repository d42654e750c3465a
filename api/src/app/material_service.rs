//! Material service
//!
//! Uploads, downloads and deletes materials. The bytes go to material
//! storage and the metadata to the material repository; the two are kept in
//! step by ordering the writes and undoing the storage write when the record
//! cannot be saved.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{
    generate_storage_name, DisciplineId, Material, MaterialId, NewMaterial, User,
    DEFAULT_CONTENT_TYPE,
};
use crate::domain::ports::{ByteStream, DisciplineRepository, MaterialRepository, MaterialStorage};
use crate::domain::validation::{require_not_blank, trim_optional};
use crate::error::{AppError, DomainError};

/// How many materials the dashboard shows
pub const RECENT_MATERIALS_LIMIT: u64 = 5;

const NO_DISCIPLINE: &str = "No discipline";

/// An upload request: metadata plus the content stream
pub struct MaterialUpload<'a> {
    pub original_name: String,
    pub content_type: Option<String>,
    pub discipline_id: DisciplineId,
    pub content: ByteStream<'a>,
}

/// A recently uploaded material, formatted for display
#[derive(Debug, Clone, Serialize)]
pub struct RecentMaterial {
    pub id: MaterialId,
    pub name: String,
    pub discipline_name: String,
    pub uploaded_on: String,
    pub size: String,
}

/// Human readable size: `"512 B"`, `"1.5 KB"`, `"3.2 MB"`, ...
pub fn format_size(bytes: i64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    const UNITS: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}B", value, UNITS[unit])
}

/// Service for managing materials
pub struct MaterialService<DR, MR, MS>
where
    DR: DisciplineRepository,
    MR: MaterialRepository,
    MS: MaterialStorage,
{
    disciplines: Arc<DR>,
    materials: Arc<MR>,
    storage: Arc<MS>,
}

impl<DR, MR, MS> MaterialService<DR, MR, MS>
where
    DR: DisciplineRepository,
    MR: MaterialRepository,
    MS: MaterialStorage,
{
    pub fn new(disciplines: Arc<DR>, materials: Arc<MR>, storage: Arc<MS>) -> Self {
        Self {
            disciplines,
            materials,
            storage,
        }
    }

    async fn ensure_discipline(&self, user: &User, id: &DisciplineId) -> Result<(), AppError> {
        if !self.disciplines.exists_for_user(id, &user.id).await? {
            return Err(AppError::Domain(DomainError::not_found("Discipline", id)));
        }
        Ok(())
    }

    async fn owned(&self, user: &User, id: &MaterialId) -> Result<Material, AppError> {
        self.materials
            .find_by_id_and_user(id, &user.id)
            .await?
            .ok_or_else(|| AppError::Domain(DomainError::not_found("Material", id)))
    }

    /// Best-effort removal of a stored file whose record was never saved
    async fn discard_stored(&self, storage_name: &str) {
        if let Err(e) = self.storage.delete(storage_name).await {
            tracing::warn!(
                error = %e,
                storage_name = %storage_name,
                "Failed to remove orphaned upload"
            );
        }
    }

    /// Store the content, then record the material
    pub async fn upload(
        &self,
        user: &User,
        upload: MaterialUpload<'_>,
    ) -> Result<Material, AppError> {
        let original_name = require_not_blank(&upload.original_name, "File name")?
            .trim()
            .to_string();
        let content_type = trim_optional(upload.content_type.as_deref())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        self.ensure_discipline(user, &upload.discipline_id).await?;

        let storage_name = generate_storage_name(&original_name);
        let stored = self.storage.save(&storage_name, upload.content).await?;

        if stored.bytes_written == 0 {
            self.discard_stored(&storage_name).await;
            return Err(AppError::Domain(DomainError::Validation(
                "File is empty".to_string(),
            )));
        }

        let record = NewMaterial::new(
            user.id,
            upload.discipline_id,
            &original_name,
            &storage_name,
            &content_type,
            stored.bytes_written as i64,
        );
        let saved = match record {
            Ok(record) => self.materials.create(&record).await,
            Err(e) => Err(e),
        };

        match saved {
            Ok(material) => {
                tracing::info!(
                    material_id = %material.id,
                    storage_name = %material.storage_name,
                    bytes = material.size,
                    "Material uploaded"
                );
                Ok(material)
            }
            Err(e) => {
                self.discard_stored(&storage_name).await;
                Err(e.into())
            }
        }
    }

    /// Materials of one of the user's disciplines, newest first
    pub async fn list(
        &self,
        user: &User,
        discipline_id: &DisciplineId,
    ) -> Result<Vec<Material>, AppError> {
        self.ensure_discipline(user, discipline_id).await?;
        Ok(self
            .materials
            .list_by_discipline_and_user(discipline_id, &user.id)
            .await?)
    }

    /// Material metadata plus its stored bytes
    pub async fn download(
        &self,
        user: &User,
        id: &MaterialId,
    ) -> Result<(Material, Vec<u8>), AppError> {
        let material = self.owned(user, id).await?;
        let bytes = self.storage.load(&material.storage_name).await?;
        Ok((material, bytes))
    }

    /// Remove the stored file, then the record
    pub async fn delete(&self, user: &User, id: &MaterialId) -> Result<(), AppError> {
        let material = self.owned(user, id).await?;

        self.storage.delete(&material.storage_name).await?;
        self.materials.delete(id).await?;

        tracing::info!(material_id = %id, "Material deleted");
        Ok(())
    }

    /// The user's latest uploads with display-ready fields
    pub async fn recent(&self, user: &User) -> Result<Vec<RecentMaterial>, AppError> {
        let materials = self
            .materials
            .find_recent_by_user(&user.id, RECENT_MATERIALS_LIMIT)
            .await?;

        let mut names: HashMap<DisciplineId, String> = HashMap::new();
        let mut recent = Vec::with_capacity(materials.len());
        for material in materials {
            if !names.contains_key(&material.discipline_id) {
                let name = self
                    .disciplines
                    .find_by_id_and_user(&material.discipline_id, &user.id)
                    .await?
                    .map(|d| d.name)
                    .unwrap_or_else(|| NO_DISCIPLINE.to_string());
                names.insert(material.discipline_id, name);
            }

            recent.push(RecentMaterial {
                id: material.id,
                discipline_name: names
                    .get(&material.discipline_id)
                    .cloned()
                    .unwrap_or_else(|| NO_DISCIPLINE.to_string()),
                uploaded_on: material.uploaded_at.format("%d/%m/%Y").to_string(),
                size: format_size(material.size),
                name: material.original_name,
            });
        }

        Ok(recent)
    }
}
