//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod confirmation_token_repo;
pub mod discipline_repo;
pub mod feedback_repo;
pub mod material_repo;
pub mod summary_repo;
pub mod user_repo;

#[cfg(test)]
mod integration_tests;

pub use confirmation_token_repo::PostgresConfirmationTokenRepository;
pub use discipline_repo::PostgresDisciplineRepository;
pub use feedback_repo::PostgresFeedbackRepository;
pub use material_repo::PostgresMaterialRepository;
pub use summary_repo::PostgresSummaryRepository;
pub use user_repo::PostgresUserRepository;
