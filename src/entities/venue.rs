use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VerificationStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "venue")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub venue_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub address: String,
    pub capacity: i32,
    #[sea_orm(column_type = "Double")]
    pub daily_rate: f64,
    #[sea_orm(column_type = "Double")]
    pub hourly_rate: f64,
    pub min_hourly_duration: i32,
    pub max_hourly_duration: i32,
    pub amenities: Json,
    pub owner_id: Uuid,
    pub owner_email: String,
    pub owner_phone: String,
    pub verification_status: VerificationStatus,
    pub documents: Json,
    pub admin_remarks: String,
    pub images: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event::Entity")]
    Event,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::venue_payment::Entity")]
    VenuePayment,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::venue_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VenuePayment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
