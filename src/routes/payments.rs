use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::entities::{
    event_payment, prelude::*, sea_orm_active_enums::PaymentStatus, ticket_type, venue_payment,
};
use crate::error::{AppError, AppResult};
use crate::gateway::CheckoutRequest;
use crate::router::AppState;

/// Share of the gross amount retained by the platform.
const PLATFORM_FEE_RATE: f64 = 0.10;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Day count for a venue stay: millisecond difference rounded up to whole
/// days. Zero or negative spans are rejected by the caller.
fn booking_days(check_in: NaiveDateTime, check_out: NaiveDateTime) -> i64 {
    let millis = (check_out - check_in).num_milliseconds();
    (millis as f64 / MILLIS_PER_DAY).ceil() as i64
}

/// Raw float split of a gross amount into (platform fee, payout). No
/// rounding anywhere, matching the stored figures.
fn split_amount(total: f64) -> (f64, f64) {
    let platform_fee = total * PLATFORM_FEE_RATE;
    (platform_fee, total - platform_fee)
}

/// A payment row lives in one of two tables, depending on what was booked.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PaymentRecord {
    Venue(venue_payment::Model),
    Event(event_payment::Model),
}

/// Probe both payment tables for a gateway session id, venue table first.
async fn find_by_session_id(
    state: &AppState,
    session_id: &str,
) -> AppResult<Option<PaymentRecord>> {
    let venue_payment = VenuePayment::find()
        .filter(venue_payment::Column::GatewaySessionId.eq(session_id))
        .one(&state.db)
        .await?;
    if let Some(payment) = venue_payment {
        return Ok(Some(PaymentRecord::Venue(payment)));
    }

    let event_payment = EventPayment::find()
        .filter(event_payment::Column::GatewaySessionId.eq(session_id))
        .one(&state.db)
        .await?;
    Ok(event_payment.map(PaymentRecord::Event))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    pub venue_id: Option<Uuid>,
    pub check_in_date: Option<DateTime<Utc>>,
    pub check_out_date: Option<DateTime<Utc>>,
    pub event_id: Option<Uuid>,
    pub ticket_type: Option<String>,
    pub ticket_quantity: Option<i32>,
}

/// Checkout orchestrator. Resolves the booking target, computes the
/// amounts, opens a hosted checkout session and records a Pending payment.
/// Inventory is NOT decremented here; that happens at reconciliation, so
/// two concurrent checkouts can both reserve the last ticket.
pub async fn create_checkout_session(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(payload): Json<CreateCheckoutSessionRequest>,
) -> AppResult<impl IntoResponse> {
    if let Some(venue_id) = payload.venue_id {
        let venue = Venue::find_by_id(venue_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Venue not found".into()))?;

        let (Some(check_in), Some(check_out)) = (payload.check_in_date, payload.check_out_date)
        else {
            return Err(AppError::Validation(
                "Invalid check-in/check-out dates".into(),
            ));
        };
        let (check_in, check_out) = (check_in.naive_utc(), check_out.naive_utc());
        let num_days = booking_days(check_in, check_out);
        if num_days <= 0 {
            return Err(AppError::Validation(
                "Invalid check-in/check-out dates".into(),
            ));
        }

        let total_amount = venue.daily_rate * num_days as f64;
        let (platform_fee, final_amount) = split_amount(total_amount);

        let payer = User::find_by_id(caller.user_id)
            .one(&state.db)
            .await?
            .ok_or(AppError::Unauthenticated)?;
        let customer = state
            .gateway
            .create_customer(&payer.email)
            .await
            .map_err(AppError::Gateway)?;
        let session = state
            .gateway
            .create_checkout_session(
                &customer,
                &CheckoutRequest {
                    product_name: venue.venue_name.clone(),
                    product_description: venue.address.clone(),
                    unit_price: venue.daily_rate,
                    quantity: num_days,
                    platform_fee,
                    final_amount,
                },
            )
            .await
            .map_err(AppError::Gateway)?;

        let payment = venue_payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(caller.user_id),
            renter_id: Set(Some(venue.owner_id)),
            venue_id: Set(venue.id),
            venue_name: Set(venue.venue_name),
            venue_address: Set(venue.address),
            check_in_date: Set(check_in),
            check_out_date: Set(check_out),
            amount: Set(total_amount),
            platform_fee: Set(platform_fee),
            final_amount: Set(final_amount),
            status: Set(PaymentStatus::Pending),
            gateway_session_id: Set(session.id.clone()),
            ..Default::default()
        };
        payment.insert(&state.db).await?;

        return Ok(Json(json!({ "sessionId": session.id, "url": session.url })));
    }

    if let Some(event_id) = payload.event_id {
        let event = Event::find_by_id(event_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

        let ticket_types = TicketType::find()
            .filter(ticket_type::Column::EventId.eq(event.id))
            .all(&state.db)
            .await?;
        let requested = payload.ticket_type.unwrap_or_default();
        let selected = ticket_types
            .into_iter()
            .find(|ticket| ticket.name == requested)
            .ok_or_else(|| AppError::Validation("Invalid ticket type".into()))?;

        let quantity = payload
            .ticket_quantity
            .ok_or_else(|| AppError::Validation("Ticket quantity must be present".into()))?;
        if quantity > selected.available_quantity {
            return Err(AppError::Validation("Not enough tickets available".into()));
        }

        let total_amount = selected.price * quantity as f64;
        let (platform_fee, final_amount) = split_amount(total_amount);

        let payer = User::find_by_id(caller.user_id)
            .one(&state.db)
            .await?
            .ok_or(AppError::Unauthenticated)?;
        let customer = state
            .gateway
            .create_customer(&payer.email)
            .await
            .map_err(AppError::Gateway)?;
        let session = state
            .gateway
            .create_checkout_session(
                &customer,
                &CheckoutRequest {
                    product_name: event.event_name.clone(),
                    product_description: format!("Event on {}", event.date.format("%Y-%m-%d")),
                    unit_price: selected.price,
                    quantity: quantity as i64,
                    platform_fee,
                    final_amount,
                },
            )
            .await
            .map_err(AppError::Gateway)?;

        let payment = event_payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(caller.user_id),
            host_id: Set(Some(event.organizer_id)),
            event_id: Set(event.id),
            event_name: Set(event.event_name),
            event_date: Set(event.date),
            ticket_type: Set(selected.name),
            ticket_quantity: Set(quantity),
            amount: Set(total_amount),
            platform_fee: Set(platform_fee),
            final_amount: Set(final_amount),
            status: Set(PaymentStatus::Pending),
            gateway_session_id: Set(session.id.clone()),
            ..Default::default()
        };
        payment.insert(&state.db).await?;

        return Ok(Json(json!({ "sessionId": session.id, "url": session.url })));
    }

    Err(AppError::Validation(
        "Invalid request. Provide venueId or eventId.".into(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: PaymentStatus,
}

/// Reconciliation handler. The status is taken from the client request
/// body as-is; there is no server-to-server verification against the
/// gateway, so a caller can mark its own session Success without paying.
/// On Success for an event payment, ticket inventory is decremented with
/// no floor check and no idempotency guard: reconciling the same session
/// twice decrements twice.
pub async fn update_payment_status(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(session_id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let payment = find_by_session_id(&state, &session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment record not found".into()))?;

    let updated = match payment {
        PaymentRecord::Venue(payment) => {
            let mut payment = payment.into_active_model();
            payment.status = Set(payload.status);
            PaymentRecord::Venue(payment.update(&state.db).await?)
        }
        PaymentRecord::Event(payment) => {
            let mut active = payment.into_active_model();
            active.status = Set(payload.status);
            let payment = active.update(&state.db).await?;

            if payload.status == PaymentStatus::Success {
                let ticket = TicketType::find()
                    .filter(ticket_type::Column::EventId.eq(payment.event_id))
                    .filter(ticket_type::Column::Name.eq(payment.ticket_type.clone()))
                    .one(&state.db)
                    .await?;
                if let Some(ticket) = ticket {
                    let remaining = ticket.available_quantity - payment.ticket_quantity;
                    let mut ticket = ticket.into_active_model();
                    ticket.available_quantity = Set(remaining);
                    ticket.update(&state.db).await?;
                }
            }

            PaymentRecord::Event(payment)
        }
    };

    Ok(Json(updated))
}

pub async fn get_venue_payments(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let payments = VenuePayment::find()
        .filter(venue_payment::Column::RenterId.eq(caller.user_id))
        .filter(venue_payment::Column::Status.eq(PaymentStatus::Success))
        .order_by_desc(venue_payment::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(payments))
}

pub async fn get_event_payments(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let payments = EventPayment::find()
        .filter(event_payment::Column::HostId.eq(caller.user_id))
        .filter(event_payment::Column::Status.eq(PaymentStatus::Success))
        .order_by_desc(event_payment::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(payments))
}

pub async fn get_payments_by_venue(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(venue_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let payments = VenuePayment::find()
        .filter(venue_payment::Column::VenueId.eq(venue_id))
        .filter(venue_payment::Column::Status.eq(PaymentStatus::Success))
        .order_by_desc(venue_payment::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(payments))
}

/// A payment is visible to its payer and to the receiving renter/host only.
pub async fn get_payment_by_id(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(payment_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let venue_payment = VenuePayment::find_by_id(payment_id)
        .filter(
            Condition::any()
                .add(venue_payment::Column::UserId.eq(caller.user_id))
                .add(venue_payment::Column::RenterId.eq(caller.user_id)),
        )
        .one(&state.db)
        .await?;
    if let Some(payment) = venue_payment {
        return Ok(Json(PaymentRecord::Venue(payment)));
    }

    let event_payment = EventPayment::find_by_id(payment_id)
        .filter(
            Condition::any()
                .add(event_payment::Column::UserId.eq(caller.user_id))
                .add(event_payment::Column::HostId.eq(caller.user_id)),
        )
        .one(&state.db)
        .await?;
    match event_payment {
        Some(payment) => Ok(Json(PaymentRecord::Event(payment))),
        None => Err(AppError::NotFound(
            "Payment not found or unauthorized".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(date: (i32, u32, u32), hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn whole_day_spans_count_exactly() {
        let days = booking_days(at((2025, 6, 1), 0), at((2025, 6, 4), 0));
        assert_eq!(days, 3);
    }

    #[test]
    fn partial_days_round_up() {
        // 2 days and 6 hours -> 3 billable days
        let days = booking_days(at((2025, 6, 1), 12), at((2025, 6, 3), 18));
        assert_eq!(days, 3);
    }

    #[test]
    fn zero_and_negative_spans_are_not_billable() {
        assert_eq!(booking_days(at((2025, 6, 1), 0), at((2025, 6, 1), 0)), 0);
        assert!(booking_days(at((2025, 6, 4), 0), at((2025, 6, 1), 0)) <= 0);
    }

    #[test]
    fn fee_split_is_ten_percent_of_gross() {
        let (fee, payout) = split_amount(100.0);
        assert_eq!(fee, 10.0);
        assert_eq!(payout, 90.0);
    }

    #[test]
    fn fee_split_uses_raw_float_arithmetic() {
        // No rounding: the stored figures carry full float precision.
        let (fee, payout) = split_amount(333.0);
        assert_eq!(fee, 33.300000000000004);
        assert_eq!(payout, 299.7);
        assert_eq!(fee + payout, 333.0);
    }

    #[test]
    fn fee_and_payout_always_recompose_the_gross() {
        for total in [0.0, 1.0, 99.99, 1234.56, 100000.0] {
            let (fee, payout) = split_amount(total);
            assert!((fee + payout - total).abs() < 1e-9);
        }
    }
}
