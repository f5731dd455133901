use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EventMode, EventStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub date: DateTime,
    pub start_time: String,
    pub end_time: String,
    pub mode: EventMode,
    pub event_type: String,
    pub venue_id: Option<Uuid>,
    pub custom_address: Option<String>,
    pub streaming_link: Option<String>,
    pub organizer_id: Uuid,
    pub images: Json,
    pub status: EventStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_payment::Entity")]
    EventPayment,
    #[sea_orm(has_many = "super::ticket_type::Entity")]
    TicketType,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::venue::Entity",
        from = "Column::VenueId",
        to = "super::venue::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Venue,
}

impl Related<super::event_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventPayment.def()
    }
}

impl Related<super::ticket_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketType.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::venue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
