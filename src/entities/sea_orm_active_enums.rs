use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role. Gates every protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "host")]
    Host,
    #[sea_orm(string_value = "renter")]
    Renter,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Admin approval state of a venue. pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EventMode {
    #[sea_orm(string_value = "Online")]
    Online,
    #[sea_orm(string_value = "Offline")]
    Offline,
}

/// Lifecycle label on an event. Written at creation, nothing transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EventStatus {
    #[sea_orm(string_value = "Upcoming")]
    Upcoming,
    #[sea_orm(string_value = "Ongoing")]
    Ongoing,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// Outcome of a checkout attempt. Starts Pending, overwritten by the
/// reconciliation handler with whatever the client reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Success")]
    Success,
    #[sea_orm(string_value = "Failed")]
    Failed,
}
