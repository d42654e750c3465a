use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub discipline_id: Uuid,
    pub original_name: String,
    #[sea_orm(unique)]
    pub storage_name: String,
    pub content_type: String,
    pub size: i64,
    pub uploaded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::disciplines::Entity",
        from = "Column::DisciplineId",
        to = "super::disciplines::Column::Id"
    )]
    Discipline,
}

impl Related<super::disciplines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discipline.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
