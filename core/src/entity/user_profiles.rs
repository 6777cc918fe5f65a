use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub birthday: Option<Date>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub body_feeling: Option<String>,
    pub target_calories: Option<i32>,
    pub target_protein_g: Option<i32>,
    pub target_fat_g: Option<i32>,
    pub target_carbs_g: Option<i32>,
    pub setup_complete: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
