pub use sea_orm_migration::prelude::*;

mod iden;
mod m20250212_000001_create_table;
mod m20250226_114530_payment_tables;
mod m20250311_081210_session_and_details;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250212_000001_create_table::Migration),
            Box::new(m20250226_114530_payment_tables::Migration),
            Box::new(m20250311_081210_session_and_details::Migration),
        ]
    }
}
