use sea_orm::entity::prelude::*;

/// One meal row per (day, meal type); the ordered food list is stored as a
/// JSON column. Days are keyed by ISO date strings ("YYYY-MM-DD").
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "meals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: String,
    pub meal_type: String,
    pub foods: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
