//! Dashboard service
//!
//! Per-user counters shown on the home screen.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::User;
use crate::domain::ports::{DisciplineRepository, MaterialRepository, SummaryRepository};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStatistics {
    pub total_disciplines: u64,
    pub summaries_created: u64,
    pub total_materials: u64,
}

pub struct DashboardService<DR, SR, MR>
where
    DR: DisciplineRepository,
    SR: SummaryRepository,
    MR: MaterialRepository,
{
    disciplines: Arc<DR>,
    summaries: Arc<SR>,
    materials: Arc<MR>,
}

impl<DR, SR, MR> DashboardService<DR, SR, MR>
where
    DR: DisciplineRepository,
    SR: SummaryRepository,
    MR: MaterialRepository,
{
    pub fn new(disciplines: Arc<DR>, summaries: Arc<SR>, materials: Arc<MR>) -> Self {
        Self {
            disciplines,
            summaries,
            materials,
        }
    }

    pub async fn statistics(&self, user: &User) -> Result<DashboardStatistics, AppError> {
        let (total_disciplines, summaries_created, total_materials) = tokio::try_join!(
            self.disciplines.count_by_user(&user.id),
            self.summaries.count_by_user(&user.id),
            self.materials.count_by_user(&user.id),
        )?;

        Ok(DashboardStatistics {
            total_disciplines,
            summaries_created,
            total_materials,
        })
    }
}
