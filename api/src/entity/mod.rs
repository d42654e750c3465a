//! SeaORM entity definitions
//!
//! Table models mirroring the SQL files under `migrations/`.

pub mod confirmation_tokens;
pub mod disciplines;
pub mod feedback;
pub mod materials;
pub mod summaries;
pub mod users;
