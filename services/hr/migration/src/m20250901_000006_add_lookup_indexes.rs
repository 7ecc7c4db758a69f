use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Requests::Table)
                    .col(Requests::EmployeeId)
                    .col(Requests::CreatedAt)
                    .name("idx_requests_employee_id_created_at")
                    .to_owned(),
            )
            .await?;
        // Weekly grid and HR export both filter Approved rows by date range.
        manager
            .create_index(
                Index::create()
                    .table(Requests::Table)
                    .col(Requests::Status)
                    .col(Requests::StartDate)
                    .col(Requests::EndDate)
                    .name("idx_requests_status_dates")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(RequestDates::Table)
                    .col(RequestDates::RequestId)
                    .name("idx_request_dates_request_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reports::Table)
                    .col(Reports::OwnerId)
                    .col(Reports::CreatedAt)
                    .name("idx_reports_owner_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_reports_owner_id_created_at",
            "idx_request_dates_request_id",
            "idx_requests_status_dates",
            "idx_requests_employee_id_created_at",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Requests {
    Table,
    EmployeeId,
    Status,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(Iden)]
enum RequestDates {
    Table,
    RequestId,
}

#[derive(Iden)]
enum Reports {
    Table,
    OwnerId,
    CreatedAt,
}
