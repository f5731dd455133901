use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create VenuePayment Table
        let table = table_auto(VenuePayment::Table)
            .col(pk_uuid(VenuePayment::Id))
            .col(uuid(VenuePayment::UserId))
            .col(uuid_null(VenuePayment::RenterId))
            .col(uuid(VenuePayment::VenueId))
            .col(string(VenuePayment::VenueName))
            .col(string(VenuePayment::VenueAddress))
            .col(timestamp(VenuePayment::CheckInDate))
            .col(timestamp(VenuePayment::CheckOutDate))
            .col(double(VenuePayment::Amount))
            .col(double(VenuePayment::PlatformFee))
            .col(double(VenuePayment::FinalAmount))
            .col(string(VenuePayment::Status).default("Pending"))
            .col(string(VenuePayment::GatewaySessionId))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_venue_payment_user")
                    .from(VenuePayment::Table, VenuePayment::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_venue_payment_venue")
                    .from(VenuePayment::Table, VenuePayment::VenueId)
                    .to(Venue::Table, Venue::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create EventPayment Table
        let table = table_auto(EventPayment::Table)
            .col(pk_uuid(EventPayment::Id))
            .col(uuid(EventPayment::UserId))
            .col(uuid_null(EventPayment::HostId))
            .col(uuid(EventPayment::EventId))
            .col(string(EventPayment::EventName))
            .col(timestamp(EventPayment::EventDate))
            .col(string(EventPayment::TicketType))
            .col(integer(EventPayment::TicketQuantity))
            .col(double(EventPayment::Amount))
            .col(double(EventPayment::PlatformFee))
            .col(double(EventPayment::FinalAmount))
            .col(string(EventPayment::Status).default("Pending"))
            .col(string(EventPayment::GatewaySessionId))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_event_payment_user")
                    .from(EventPayment::Table, EventPayment::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_event_payment_event")
                    .from(EventPayment::Table, EventPayment::EventId)
                    .to(Event::Table, Event::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // The reconciliation handler looks payments up by gateway session id
        manager
            .create_index(
                Index::create()
                    .name("idx_venue_payment_session")
                    .table(VenuePayment::Table)
                    .col(VenuePayment::GatewaySessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_payment_session")
                    .table(EventPayment::Table)
                    .col(EventPayment::GatewaySessionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventPayment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(VenuePayment::Table).to_owned())
            .await?;

        Ok(())
    }
}
