use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flight::Table)
                    .if_not_exists()
                    .col(integer(Flight::Id).primary_key())
                    .col(string(Flight::Name))
                    .col(integer_null(Flight::DepartureCity))
                    .col(integer_null(Flight::ArrivalCity))
                    .col(double_null(Flight::Price))
                    // Times are stored as canonical "HH:MM" text; lexicographic
                    // order matches chronological order.
                    .col(string_len_null(Flight::DepartureTime, 5))
                    .col(string_len_null(Flight::ArrivalTime, 5))
                    .col(integer_null(Flight::TravelTime))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flight::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Flight {
    #[sea_orm(iden = "flights")]
    Table,
    Id,
    Name,
    DepartureCity,
    ArrivalCity,
    Price,
    DepartureTime,
    ArrivalTime,
    TravelTime,
}
