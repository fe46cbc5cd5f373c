use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Airport::Table)
                    .if_not_exists()
                    .col(integer(Airport::Id).primary_key())
                    .col(string(Airport::Name).unique_key())
                    // Validated against `cities` at the service layer, so no
                    // foreign key constraint here.
                    .col(integer_null(Airport::CityId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Airport::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Airport {
    #[sea_orm(iden = "airports")]
    Table,
    Id,
    Name,
    CityId,
}
