use sea_orm_migration::prelude::*;

// Define table names
#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    Password,
    Role,
    Otp,
    OtpExpiry,
}

#[derive(DeriveIden)]
pub enum AuthSession {
    Table,
    Id,
    UserId,
    Token,
    ExpiresAt,
}

#[derive(DeriveIden)]
pub enum Venue {
    Table,
    Id,
    VenueName,
    Description,
    Address,
    Capacity,
    DailyRate,
    HourlyRate,
    MinHourlyDuration,
    MaxHourlyDuration,
    Amenities,
    OwnerId,
    OwnerEmail,
    OwnerPhone,
    VerificationStatus,
    Documents,
    AdminRemarks,
    Images,
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    EventName,
    Description,
    Date,
    StartTime,
    EndTime,
    Mode,
    EventType,
    VenueId,
    CustomAddress,
    StreamingLink,
    OrganizerId,
    Images,
    Status,
}

#[derive(DeriveIden)]
pub enum TicketType {
    Table,
    Id,
    EventId,
    Name,
    Price,
    AvailableQuantity,
}

#[derive(DeriveIden)]
pub enum EventTypeRegistry {
    Table,
    Id,
    OnlineTypes,
    OfflineTypes,
}

#[derive(DeriveIden)]
pub enum VenuePayment {
    Table,
    Id,
    UserId,
    RenterId,
    VenueId,
    VenueName,
    VenueAddress,
    CheckInDate,
    CheckOutDate,
    Amount,
    PlatformFee,
    FinalAmount,
    Status,
    GatewaySessionId,
}

#[derive(DeriveIden)]
pub enum EventPayment {
    Table,
    Id,
    UserId,
    HostId,
    EventId,
    EventName,
    EventDate,
    TicketType,
    TicketQuantity,
    Amount,
    PlatformFee,
    FinalAmount,
    Status,
    GatewaySessionId,
}

#[derive(DeriveIden)]
pub enum OrganizerDetail {
    Table,
    Id,
    UserId,
    OrganizationName,
    PanCardNumber,
    OrganizationAddress,
    ContactName,
    ContactEmail,
    ContactPhone,
    BeneficiaryName,
    AccountType,
    AccountNumber,
    BankName,
    IfscCode,
    PanCardUrl,
}
