//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{NaiveDate, Utc};

use crate::domain::entities::{
    generate_storage_name, DailyQuota, Discipline, DisciplineId, Feedback, FeedbackId,
    FeedbackKind, Material, MaterialId, Summary, SummaryId, User, UserId,
};

/// Create a test user with fresh quotas
pub fn test_user() -> User {
    test_user_named("Test User")
}

/// Create a test user with a specific name
pub fn test_user_named(name: &str) -> User {
    let slug = name.to_lowercase().replace(' ', ".");
    User {
        id: UserId::new(),
        name: name.to_string(),
        email: format!("{}@example.com", slug),
        email_confirmed: false,
        password_hash: String::new(),
        api_key_hash: format!("hash-{}", slug),
        created_at: Utc::now(),
        feedback_quota: DailyQuota::default(),
        summary_quota: DailyQuota::default(),
    }
}

/// Create a test user whose summary quota was used up on an earlier day
pub fn test_user_with_stale_summary_quota(used: i32) -> User {
    User {
        summary_quota: DailyQuota {
            used,
            day: NaiveDate::from_ymd_opt(2020, 1, 1),
        },
        ..test_user()
    }
}

/// Create a test discipline owned by `user_id`
pub fn test_discipline(user_id: UserId, name: &str) -> Discipline {
    Discipline {
        id: DisciplineId::new(),
        user_id,
        name: name.to_string(),
        description: Some(format!("All about {}", name)),
        created_at: Utc::now(),
    }
}

/// Create a test PDF material with an unrelated owner and discipline
pub fn test_material(original_name: &str) -> Material {
    Material {
        id: MaterialId::new(),
        user_id: UserId::new(),
        discipline_id: DisciplineId::new(),
        original_name: original_name.to_string(),
        storage_name: generate_storage_name(original_name),
        content_type: "application/pdf".to_string(),
        size: 2048,
        uploaded_at: Utc::now(),
    }
}

/// Create a test material inside `discipline`
pub fn test_material_in(discipline: &Discipline, original_name: &str) -> Material {
    Material {
        user_id: discipline.user_id,
        discipline_id: discipline.id,
        ..test_material(original_name)
    }
}

/// Create a test summary inside `discipline`
pub fn test_summary_in(discipline: &Discipline, title: &str) -> Summary {
    Summary {
        id: SummaryId::new(),
        user_id: discipline.user_id,
        discipline_id: discipline.id,
        title: title.to_string(),
        content: format!("Notes about {}.", title),
        material_id: None,
        created_at: Utc::now(),
    }
}

/// Create a stored feedback entry
pub fn test_feedback() -> Feedback {
    Feedback {
        id: FeedbackId(1),
        user_id: UserId::new(),
        kind: FeedbackKind::Bug,
        rating: Some(4),
        message: "The upload button does nothing".to_string(),
        email: Some("reporter@example.com".to_string()),
        page: "/materials".to_string(),
        user_agent: "Mozilla/5.0".to_string(),
        created_at: Utc::now(),
    }
}
