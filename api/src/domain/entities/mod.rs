//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod confirmation_token;
pub mod discipline;
pub mod feedback;
pub mod material;
pub mod summary;
pub mod user;

pub use confirmation_token::{
    ConfirmationToken, ConfirmationTokenId, NewConfirmationToken, CONFIRMATION_TOKEN_TTL_MINUTES,
};
pub use discipline::{Discipline, DisciplineDetails, DisciplineId, NewDiscipline};
pub use feedback::{Feedback, FeedbackId, FeedbackKind, FeedbackSubmission, NewFeedback};
pub use material::{
    file_extension, generate_storage_name, Material, MaterialId, NewMaterial,
    DEFAULT_CONTENT_TYPE,
};
pub use summary::{NewSummary, Summary, SummaryId, SummaryText};
pub use user::{
    normalize_email, validate_password, DailyQuota, NewUser, QuotaKind, User, UserId,
};
