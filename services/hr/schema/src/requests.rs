use sea_orm::entity::prelude::*;

/// Leave / WFH request. `employee_id` is a plain reference with no foreign
/// key, so requests outlive a deleted employee.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_code: Option<String>,
    pub request_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub number_of_days: i32,
    pub reason: String,
    pub notes: String,
    pub status: String,
    pub source: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::request_dates::Entity")]
    RequestDates,
}

impl Related<super::request_dates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestDates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
