pub use super::auth_session::Entity as AuthSession;
pub use super::event::Entity as Event;
pub use super::event_payment::Entity as EventPayment;
pub use super::event_type_registry::Entity as EventTypeRegistry;
pub use super::organizer_detail::Entity as OrganizerDetail;
pub use super::ticket_type::Entity as TicketType;
pub use super::user::Entity as User;
pub use super::venue::Entity as Venue;
pub use super::venue_payment::Entity as VenuePayment;
