use sea_orm_migration::prelude::*;

use hrdesk_hr_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
