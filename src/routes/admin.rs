use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::entities::{
    event_payment, organizer_detail,
    prelude::*,
    sea_orm_active_enums::{PaymentStatus, Role, VerificationStatus},
    user, venue, venue_payment,
};
use crate::error::{AppError, AppResult};
use crate::router::AppState;

const RECENT_LIMIT: u64 = 4;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveVenueRequest {
    pub is_approved: Option<bool>,
    pub admin_remarks: Option<String>,
}

/// Admin-only approval transition: pending -> approved | rejected. There is
/// no reverse transition; re-submitting simply overwrites.
pub async fn approve_venue(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveVenueRequest>,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Admin])?;

    let Some(is_approved) = payload.is_approved else {
        return Err(AppError::Validation("isApproved must be a boolean".into()));
    };

    let venue = Venue::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".into()))?;

    let next_status = if is_approved {
        VerificationStatus::Approved
    } else {
        VerificationStatus::Rejected
    };
    let default_remarks = if is_approved { "Approved" } else { "Rejected" };

    let mut venue = venue.into_active_model();
    venue.verification_status = Set(next_status);
    venue.admin_remarks = Set(payload
        .admin_remarks
        .unwrap_or_else(|| default_remarks.to_string()));
    let venue = venue.update(&state.db).await?;

    let message = if is_approved {
        "Venue approved successfully"
    } else {
        "Venue rejected successfully"
    };

    Ok(Json(json!({ "message": message, "venue": venue })))
}

/// Sum platform fees over rows whose payment succeeded. The dashboard
/// recomputes this from scratch on every call.
fn successful_fee_total<'a>(rows: impl IntoIterator<Item = (&'a PaymentStatus, f64)>) -> f64 {
    rows.into_iter()
        .filter(|(status, _)| **status == PaymentStatus::Success)
        .map(|(_, fee)| fee)
        .sum()
}

pub async fn dashboard_stats(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Admin])?;

    let total_users = User::find()
        .filter(user::Column::Role.ne(Role::Admin))
        .count(&state.db)
        .await?;
    let total_events = Event::find().count(&state.db).await?;
    let total_venues = Venue::find().count(&state.db).await?;

    let recent_users = User::find()
        .filter(user::Column::Role.ne(Role::Admin))
        .order_by_desc(user::Column::CreatedAt)
        .limit(RECENT_LIMIT)
        .all(&state.db)
        .await?;
    let recent_events = Event::find()
        .order_by_desc(crate::entities::event::Column::CreatedAt)
        .limit(RECENT_LIMIT)
        .all(&state.db)
        .await?;
    let recent_venues = Venue::find()
        .order_by_desc(venue::Column::CreatedAt)
        .limit(RECENT_LIMIT)
        .all(&state.db)
        .await?;

    let venue_payments = VenuePayment::find().all(&state.db).await?;
    let event_payments = EventPayment::find().all(&state.db).await?;
    let total_revenue = successful_fee_total(
        venue_payments
            .iter()
            .map(|p| (&p.status, p.platform_fee))
            .chain(event_payments.iter().map(|p| (&p.status, p.platform_fee))),
    );

    Ok(Json(json!({
        "totalUsers": total_users,
        "totalEvents": total_events,
        "totalVenues": total_venues,
        "recentUsers": recent_users,
        "recentEvents": recent_events,
        "recentVenues": recent_venues,
        "totalRevenue": total_revenue,
    })))
}

/// Admin view over every successful payment of both kinds, with payer and
/// receiver emails resolved and the payout total attached.
pub async fn successful_payments(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Admin])?;

    let venue_payments = VenuePayment::find()
        .filter(venue_payment::Column::Status.eq(PaymentStatus::Success))
        .order_by_desc(venue_payment::Column::CreatedAt)
        .all(&state.db)
        .await?;
    let event_payments = EventPayment::find()
        .filter(event_payment::Column::Status.eq(PaymentStatus::Success))
        .order_by_desc(event_payment::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let mut user_ids: Vec<Uuid> = Vec::new();
    for payment in &venue_payments {
        user_ids.push(payment.user_id);
        user_ids.extend(payment.renter_id);
    }
    for payment in &event_payments {
        user_ids.push(payment.user_id);
        user_ids.extend(payment.host_id);
    }
    let users = User::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(&state.db)
        .await?;
    let email_of = |id: Option<Uuid>, fallback: &str| -> String {
        id.and_then(|id| users.iter().find(|u| u.id == id))
            .map(|u| u.email.clone())
            .unwrap_or_else(|| fallback.to_string())
    };

    let mut all_payments = Vec::with_capacity(venue_payments.len() + event_payments.len());
    let mut total_revenue = 0.0;
    for payment in &venue_payments {
        total_revenue += payment.final_amount;
        all_payments.push(json!({
            "payment": payment,
            "type": "Venue",
            "payerEmail": email_of(Some(payment.user_id), "Unknown User"),
            "receiverEmail": email_of(payment.renter_id, "Unknown Renter"),
            "itemName": payment.venue_name,
            "itemDetails": {
                "checkInDate": payment.check_in_date,
                "checkOutDate": payment.check_out_date,
                "venueAddress": payment.venue_address,
            },
        }));
    }
    for payment in &event_payments {
        total_revenue += payment.final_amount;
        all_payments.push(json!({
            "payment": payment,
            "type": "Event",
            "payerEmail": email_of(Some(payment.user_id), "Unknown User"),
            "receiverEmail": email_of(payment.host_id, "Unknown Host"),
            "itemName": payment.event_name,
            "itemDetails": {
                "eventDate": payment.event_date,
                "ticketType": payment.ticket_type,
                "ticketQuantity": payment.ticket_quantity,
            },
        }));
    }

    Ok(Json(json!({
        "payments": all_payments,
        "totalRevenue": total_revenue,
        "totalTransactions": all_payments.len(),
    })))
}

pub async fn additional_details(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Admin])?;

    let details = OrganizerDetail::find()
        .filter(organizer_detail::Column::UserId.eq(user_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Additional details not found".into()))?;

    Ok(Json(details))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_only_counts_successful_payments() {
        let rows = [
            (PaymentStatus::Success, 10.0),
            (PaymentStatus::Pending, 99.0),
            (PaymentStatus::Failed, 45.0),
            (PaymentStatus::Success, 2.5),
        ];
        let total = successful_fee_total(rows.iter().map(|(s, f)| (s, *f)));
        assert_eq!(total, 12.5);
    }

    #[test]
    fn revenue_of_no_payments_is_zero() {
        let no_rows: Vec<(&PaymentStatus, f64)> = Vec::new();
        assert_eq!(successful_fee_total(no_rows), 0.0);
    }
}
