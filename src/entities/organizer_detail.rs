use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payout and compliance details a host/renter files before receiving funds.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "organizer_detail")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization_name: String,
    pub pan_card_number: String,
    pub organization_address: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub beneficiary_name: String,
    pub account_type: String,
    pub account_number: String,
    pub bank_name: String,
    pub ifsc_code: String,
    pub pan_card_url: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
