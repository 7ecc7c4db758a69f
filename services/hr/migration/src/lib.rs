use sea_orm_migration::prelude::*;

mod m20250901_000001_create_users;
mod m20250901_000002_create_requests;
mod m20250901_000003_create_request_dates;
mod m20250901_000004_create_reports;
mod m20250901_000005_create_outbox_events;
mod m20250901_000006_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users::Migration),
            Box::new(m20250901_000002_create_requests::Migration),
            Box::new(m20250901_000003_create_request_dates::Migration),
            Box::new(m20250901_000004_create_reports::Migration),
            Box::new(m20250901_000005_create_outbox_events::Migration),
            Box::new(m20250901_000006_add_lookup_indexes::Migration),
        ]
    }
}
