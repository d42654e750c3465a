use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub email_confirmed: bool,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub api_key_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub feedbacks_today: i32,
    pub last_feedback_on: Option<Date>,
    pub summaries_today: i32,
    pub last_summary_on: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::disciplines::Entity")]
    Disciplines,
    #[sea_orm(has_many = "super::confirmation_tokens::Entity")]
    ConfirmationTokens,
}

impl Related<super::disciplines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Disciplines.def()
    }
}

impl Related<super::confirmation_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConfirmationTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
