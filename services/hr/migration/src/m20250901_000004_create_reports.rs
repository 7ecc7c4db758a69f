use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Reports::PatientName).string().not_null())
                    .col(ColumnDef::new(Reports::Age).integer().not_null())
                    .col(ColumnDef::new(Reports::Gender).string().not_null())
                    .col(ColumnDef::new(Reports::ScanType).string().not_null())
                    .col(
                        ColumnDef::new(Reports::ClinicalNotes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Reports::Diagnosis).text().not_null())
                    .col(ColumnDef::new(Reports::Confidence).double().not_null())
                    .col(ColumnDef::new(Reports::Status).string().not_null())
                    .col(ColumnDef::new(Reports::RiskLevel).string().not_null())
                    .col(
                        ColumnDef::new(Reports::Details)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Reports::Recommendations)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reports::ImageUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Reports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reports::Table, Reports::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reports {
    Table,
    Id,
    OwnerId,
    PatientName,
    Age,
    Gender,
    ScanType,
    ClinicalNotes,
    Diagnosis,
    Confidence,
    Status,
    RiskLevel,
    Details,
    Recommendations,
    ImageUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
