use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(City::Table)
                    .if_not_exists()
                    // Ids are assigned by the application (max + 1), not by the database.
                    .col(integer(City::Id).primary_key())
                    // Unique so that concurrent find-or-create calls cannot
                    // produce two rows for the same name.
                    .col(string(City::Name).unique_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(City::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum City {
    #[sea_orm(iden = "cities")]
    Table,
    Id,
    Name,
}
