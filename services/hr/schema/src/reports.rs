use sea_orm::entity::prelude::*;

/// Diagnostic report saved by an account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub patient_name: String,
    pub age: i32,
    pub gender: String,
    pub scan_type: String,
    pub clinical_notes: String,
    pub diagnosis: String,
    pub confidence: f64,
    pub status: String,
    pub risk_level: String,
    pub details: String,
    /// JSON array of strings.
    pub recommendations: Json,
    pub image_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
