//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod auth;
pub mod dashboard;
pub mod disciplines;
pub mod feedback;
pub mod materials;
pub mod summaries;
pub mod users;

pub use auth::{confirm_email, login, register};
pub use dashboard::{get_recent_materials, get_statistics};
pub use disciplines::{
    create_discipline, delete_discipline, get_discipline, list_disciplines, update_discipline,
};
pub use feedback::submit_feedback;
pub use materials::{
    delete_material, download_material, list_materials, upload_material, view_material,
};
pub use summaries::{
    create_summary, delete_summary, generate_summary, get_summary, list_summaries,
    update_summary,
};
pub use users::me;
