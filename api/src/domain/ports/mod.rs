//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod notifier;
pub mod repositories;
pub mod storage;
pub mod text;

pub use notifier::{AccountNotifier, FeedbackNotifier};
pub use repositories::{
    ConfirmationTokenRepository, DisciplineRepository, FeedbackRepository, MaterialRepository, Page, SummaryRepository,
    UserRepository,
};
pub use storage::{byte_stream, ByteStream, MaterialStorage, StoredLocation};
pub use text::{Summarizer, TextExtractor};
