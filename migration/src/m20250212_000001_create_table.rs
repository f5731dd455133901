use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create User Table
        let table = table_auto(User::Table)
            .col(pk_uuid(User::Id))
            .col(string(User::Email))
            .col(string(User::Password))
            .col(string(User::Role).default("user"))
            .col(string_null(User::Otp))
            .col(timestamp_null(User::OtpExpiry))
            .to_owned();
        manager.create_table(table).await?;

        // Email uniqueness is scoped per role, not global
        manager
            .create_index(
                Index::create()
                    .name("idx_user_email_role")
                    .table(User::Table)
                    .col(User::Email)
                    .col(User::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create Venue Table
        let table = table_auto(Venue::Table)
            .col(pk_uuid(Venue::Id))
            .col(string(Venue::VenueName))
            .col(text(Venue::Description))
            .col(string(Venue::Address))
            .col(integer(Venue::Capacity))
            .col(double(Venue::DailyRate))
            .col(double(Venue::HourlyRate))
            .col(integer(Venue::MinHourlyDuration).default(1))
            .col(integer(Venue::MaxHourlyDuration).default(8))
            .col(json(Venue::Amenities))
            .col(uuid(Venue::OwnerId))
            .col(string(Venue::OwnerEmail))
            .col(string(Venue::OwnerPhone))
            .col(string(Venue::VerificationStatus).default("pending"))
            .col(json(Venue::Documents))
            .col(string(Venue::AdminRemarks).default(""))
            .col(json(Venue::Images))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_venue_owner")
                    .from(Venue::Table, Venue::OwnerId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create Event Table
        let table = table_auto(Event::Table)
            .col(pk_uuid(Event::Id))
            .col(string(Event::EventName))
            .col(text(Event::Description))
            .col(timestamp(Event::Date))
            .col(string(Event::StartTime))
            .col(string(Event::EndTime))
            .col(string(Event::Mode))
            .col(string(Event::EventType))
            .col(uuid_null(Event::VenueId))
            .col(string_null(Event::CustomAddress))
            .col(string_null(Event::StreamingLink))
            .col(uuid(Event::OrganizerId))
            .col(json(Event::Images))
            .col(string(Event::Status).default("Upcoming"))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_event_venue")
                    .from(Event::Table, Event::VenueId)
                    .to(Venue::Table, Venue::Id)
                    .on_delete(ForeignKeyAction::SetNull),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_event_organizer")
                    .from(Event::Table, Event::OrganizerId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create TicketType Table
        let table = table_auto(TicketType::Table)
            .col(pk_uuid(TicketType::Id))
            .col(uuid(TicketType::EventId))
            .col(string(TicketType::Name))
            .col(double(TicketType::Price))
            .col(integer(TicketType::AvailableQuantity))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_ticket_type_event")
                    .from(TicketType::Table, TicketType::EventId)
                    .to(Event::Table, Event::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create EventTypeRegistry Table (single row, lazily created)
        let table = table_auto(EventTypeRegistry::Table)
            .col(pk_uuid(EventTypeRegistry::Id))
            .col(json(EventTypeRegistry::OnlineTypes))
            .col(json(EventTypeRegistry::OfflineTypes))
            .to_owned();
        manager.create_table(table).await?;

        // Create indices for common lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_venue_owner")
                    .table(Venue::Table)
                    .col(Venue::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_organizer")
                    .table(Event::Table)
                    .col(Event::OrganizerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_type_event")
                    .table(TicketType::Table)
                    .col(TicketType::EventId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop all tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(EventTypeRegistry::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TicketType::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Venue::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}
