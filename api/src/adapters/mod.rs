//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod filesystem;
pub mod notifier;
pub mod postgres;
pub mod text;

pub use filesystem::LocalMaterialStorage;
pub use notifier::{LoggingAccountNotifier, LoggingFeedbackNotifier};
pub use postgres::{
    PostgresConfirmationTokenRepository, PostgresDisciplineRepository, PostgresFeedbackRepository, PostgresMaterialRepository,
    PostgresSummaryRepository, PostgresUserRepository,
};
pub use text::{FrequencySummarizer, StoredMaterialTextExtractor};
