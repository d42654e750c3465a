//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod dashboard_service;
pub mod discipline_service;
pub mod feedback_service;
pub mod material_service;
pub mod summary_service;
pub mod user_service;

pub use dashboard_service::{DashboardService, DashboardStatistics};
pub use discipline_service::{DisciplineOverview, DisciplineService};
pub use feedback_service::{FeedbackReceipt, FeedbackService};
pub use material_service::{MaterialService, MaterialUpload, RecentMaterial};
pub use summary_service::{GenerateSummary, SummaryService};
pub use user_service::UserService;
