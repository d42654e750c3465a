//! Notifier adapters

pub mod account_notifier;
pub mod log_notifier;

pub use account_notifier::LoggingAccountNotifier;
pub use log_notifier::LoggingFeedbackNotifier;
