pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_cities;
mod m20240301_000002_create_airports;
mod m20240301_000003_create_flights;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_cities::Migration),
            Box::new(m20240301_000002_create_airports::Migration),
            Box::new(m20240301_000003_create_flights::Migration),
        ]
    }
}
