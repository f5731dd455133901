pub mod prelude;

pub mod auth_session;
pub mod event;
pub mod event_payment;
pub mod event_type_registry;
pub mod organizer_detail;
pub mod sea_orm_active_enums;
pub mod ticket_type;
pub mod user;
pub mod venue;
pub mod venue_payment;
