use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RequestDates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequestDates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RequestDates::RequestId).uuid().not_null())
                    .col(ColumnDef::new(RequestDates::Date).date().not_null())
                    .col(ColumnDef::new(RequestDates::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(RequestDates::Table, RequestDates::RequestId)
                            .to(Requests::Table, Requests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequestDates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RequestDates {
    Table,
    Id,
    RequestId,
    Date,
    Position,
}

#[derive(Iden)]
enum Requests {
    Table,
    Id,
}
