use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = table_auto(AuthSession::Table)
            .col(pk_uuid(AuthSession::Id))
            .col(uuid(AuthSession::UserId))
            .col(string_uniq(AuthSession::Token))
            .col(timestamp(AuthSession::ExpiresAt))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_auth_session_user")
                    .from(AuthSession::Table, AuthSession::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(OrganizerDetail::Table)
            .col(pk_uuid(OrganizerDetail::Id))
            .col(uuid(OrganizerDetail::UserId))
            .col(string(OrganizerDetail::OrganizationName))
            .col(string(OrganizerDetail::PanCardNumber))
            .col(string(OrganizerDetail::OrganizationAddress))
            .col(string(OrganizerDetail::ContactName))
            .col(string(OrganizerDetail::ContactEmail))
            .col(string(OrganizerDetail::ContactPhone))
            .col(string(OrganizerDetail::BeneficiaryName))
            .col(string(OrganizerDetail::AccountType))
            .col(string(OrganizerDetail::AccountNumber))
            .col(string(OrganizerDetail::BankName))
            .col(string(OrganizerDetail::IfscCode))
            .col(string(OrganizerDetail::PanCardUrl))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_organizer_detail_user")
                    .from(OrganizerDetail::Table, OrganizerDetail::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_auth_session_user")
                    .table(AuthSession::Table)
                    .col(AuthSession::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrganizerDetail::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AuthSession::Table).to_owned())
            .await?;

        Ok(())
    }
}
