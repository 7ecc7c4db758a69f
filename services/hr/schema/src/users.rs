use sea_orm::entity::prelude::*;

/// Account record. Rows with an `employee_code` are employees; the rest are
/// plain accounts (e.g. admins without an HR file).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// JSON array of role names, e.g. `["user", "admin"]`.
    pub roles: Json,
    pub active: bool,
    pub full_name: Option<String>,
    pub full_name_localized: Option<String>,
    #[sea_orm(unique)]
    pub employee_code: Option<String>,
    #[sea_orm(unique)]
    pub fingerprint_code: Option<String>,
    pub job_position: Option<String>,
    pub branch: String,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub phone_number: String,
    pub city: String,
    pub country: String,
    pub location: String,
    pub platform_usage_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
