use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key on employee_id: deleting an employee leaves their requests.
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Requests::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Requests::EmployeeName).string().not_null())
                    .col(ColumnDef::new(Requests::EmployeeCode).string())
                    .col(ColumnDef::new(Requests::RequestType).string().not_null())
                    .col(ColumnDef::new(Requests::StartDate).date().not_null())
                    .col(ColumnDef::new(Requests::EndDate).date().not_null())
                    .col(ColumnDef::new(Requests::NumberOfDays).integer().not_null())
                    .col(
                        ColumnDef::new(Requests::Reason)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Requests::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Requests::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Requests::Source)
                            .string()
                            .not_null()
                            .default("EMPLOYEE_REQUEST"),
                    )
                    .col(
                        ColumnDef::new(Requests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Requests {
    Table,
    Id,
    EmployeeId,
    EmployeeName,
    EmployeeCode,
    RequestType,
    StartDate,
    EndDate,
    NumberOfDays,
    Reason,
    Notes,
    Status,
    Source,
    CreatedAt,
    UpdatedAt,
}
