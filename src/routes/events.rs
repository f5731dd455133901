use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::entities::{
    event, event_type_registry,
    prelude::*,
    sea_orm_active_enums::{EventMode, EventStatus, Role},
    ticket_type,
};
use crate::error::{AppError, AppResult};
use crate::router::AppState;

use super::collect_multipart;

const DEFAULT_ONLINE_TYPES: [&str; 4] = [
    "Webinar",
    "Virtual Workshop",
    "Online Conference",
    "Live Streaming",
];
const DEFAULT_OFFLINE_TYPES: [&str; 5] =
    ["Conference", "Workshop", "Seminar", "Meetup", "Concert"];

fn parse_mode(raw: &str) -> AppResult<EventMode> {
    match raw {
        "Online" => Ok(EventMode::Online),
        "Offline" => Ok(EventMode::Offline),
        _ => Err(AppError::Validation("Invalid mode specified".into())),
    }
}

fn parse_event_date(raw: &str) -> AppResult<NaiveDateTime> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date_time.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| AppError::Validation("Invalid event date".into()))
}

fn json_strings(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Append a custom type to a mode's allow-list. Exact, case-sensitive
/// duplicates are rejected.
fn add_custom_type(types: &mut Vec<String>, custom: &str) -> bool {
    if types.iter().any(|existing| existing == custom) {
        return false;
    }
    types.push(custom.to_string());
    true
}

async fn find_registry(state: &AppState) -> AppResult<Option<event_type_registry::Model>> {
    Ok(EventTypeRegistry::find().one(&state.db).await?)
}

/// The registry row is created lazily with the seeded defaults the first
/// time anything reads it.
async fn find_or_create_registry(state: &AppState) -> AppResult<event_type_registry::Model> {
    if let Some(registry) = find_registry(state).await? {
        return Ok(registry);
    }

    let registry = event_type_registry::ActiveModel {
        id: Set(Uuid::new_v4()),
        online_types: Set(json!(DEFAULT_ONLINE_TYPES)),
        offline_types: Set(json!(DEFAULT_OFFLINE_TYPES)),
        ..Default::default()
    };
    Ok(registry.insert(&state.db).await?)
}

#[derive(Debug, Deserialize)]
pub struct EventTypesQuery {
    pub mode: Option<String>,
}

pub async fn get_event_types(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Query(query): Query<EventTypesQuery>,
) -> AppResult<impl IntoResponse> {
    let registry = find_or_create_registry(&state).await?;

    match query.mode.as_deref() {
        Some("Online") => Ok(Json(json_strings(&registry.online_types))),
        Some("Offline") => Ok(Json(json_strings(&registry.offline_types))),
        _ => Err(AppError::Validation("Invalid mode specified".into())),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomTypeRequest {
    pub mode: Option<String>,
    pub custom_type: Option<String>,
}

pub async fn add_custom_event_type(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Json(payload): Json<AddCustomTypeRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(mode), Some(custom_type)) = (payload.mode, payload.custom_type) else {
        return Err(AppError::Validation(
            "Mode and custom event type are required".into(),
        ));
    };
    let mode = parse_mode(&mode)?;

    // Read-modify-write with no version check: concurrent appends can lose
    // one of the updates.
    let registry = find_or_create_registry(&state).await?;
    let mut online_types = json_strings(&registry.online_types);
    let mut offline_types = json_strings(&registry.offline_types);

    let added = match mode {
        EventMode::Online => add_custom_type(&mut online_types, &custom_type),
        EventMode::Offline => add_custom_type(&mut offline_types, &custom_type),
    };
    if !added {
        let which = match mode {
            EventMode::Online => "Online",
            EventMode::Offline => "Offline",
        };
        return Err(AppError::Conflict(format!(
            "This event type already exists for {which} events"
        )));
    }

    let mut registry = registry.into_active_model();
    registry.online_types = Set(json!(online_types));
    registry.offline_types = Set(json!(offline_types));
    registry.update(&state.db).await?;

    Ok(Json(json!({
        "message": "Event type added successfully",
        "onlineTypes": online_types,
        "offlineTypes": offline_types,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TicketTypeInput {
    name: Option<String>,
    price: Option<f64>,
    available_quantity: Option<i32>,
}

struct ValidTicketType {
    name: String,
    price: f64,
    available_quantity: i32,
}

fn parse_ticket_types(raw: &str) -> AppResult<Vec<ValidTicketType>> {
    let inputs: Vec<TicketTypeInput> = serde_json::from_str(raw)
        .map_err(|_| AppError::Validation("At least one ticket type must be provided.".into()))?;
    if inputs.is_empty() {
        return Err(AppError::Validation(
            "At least one ticket type must be provided.".into(),
        ));
    }

    let mut ticket_types = Vec::with_capacity(inputs.len());
    for input in inputs {
        let valid = match (input.name, input.price, input.available_quantity) {
            (Some(name), Some(price), Some(quantity))
                if !name.is_empty() && price > 0.0 && quantity > 0 =>
            {
                ValidTicketType {
                    name,
                    price,
                    available_quantity: quantity,
                }
            }
            _ => {
                return Err(AppError::Validation(
                    "Each ticket type must have a name, price, and quantity.".into(),
                ));
            }
        };
        ticket_types.push(valid);
    }
    Ok(ticket_types)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: event::Model,
    pub ticket_types: Vec<ticket_type::Model>,
}

pub async fn create_event(
    State(state): State<AppState>,
    caller: CurrentUser,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Host, Role::Admin])?;

    let form = collect_multipart(multipart).await?;

    let mode = parse_mode(form.required("mode")?)?;
    let event_type = form.required("type")?.to_string();

    // The registry gates creation; it is not lazily created here.
    let registry = find_registry(&state).await?.ok_or_else(|| {
        AppError::Validation("No event types found. Please add event types first.".into())
    })?;
    let valid_types = match mode {
        EventMode::Online => json_strings(&registry.online_types),
        EventMode::Offline => json_strings(&registry.offline_types),
    };
    if !valid_types.contains(&event_type) {
        return Err(AppError::Validation(
            "Invalid event type for the selected mode.".into(),
        ));
    }

    let venue_id = form
        .text("venue")
        .filter(|value| !value.is_empty())
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|_| AppError::Validation("Invalid venue id".into()))?;
    let custom_address = form
        .text("customAddress")
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    if mode == EventMode::Offline && venue_id.is_none() && custom_address.is_none() {
        return Err(AppError::Validation(
            "For offline events, a venue or custom address is required.".into(),
        ));
    }

    let ticket_types = parse_ticket_types(form.required("ticketTypes")?)?;

    let mut image_urls = Vec::new();
    for file in form.files("images") {
        let url = state
            .media
            .upload("events/images", &file.file_name, file.bytes.clone())
            .await
            .map_err(AppError::MediaUpload)?;
        image_urls.push(url);
    }

    let streaming_link = form
        .text("streamingLink")
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    let is_offline = mode == EventMode::Offline;

    let new_event = event::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_name: Set(form.required("eventName")?.to_string()),
        description: Set(form.required("description")?.to_string()),
        date: Set(parse_event_date(form.required("date")?)?),
        start_time: Set(form.required("startTime")?.to_string()),
        end_time: Set(form.required("endTime")?.to_string()),
        mode: Set(mode),
        event_type: Set(event_type),
        venue_id: Set(if is_offline { venue_id } else { None }),
        custom_address: Set(if is_offline { custom_address } else { None }),
        streaming_link: Set(if is_offline { None } else { streaming_link }),
        organizer_id: Set(caller.user_id),
        images: Set(json!(image_urls)),
        status: Set(EventStatus::Upcoming),
        ..Default::default()
    };
    let saved = new_event.insert(&state.db).await?;

    let mut saved_tickets = Vec::with_capacity(ticket_types.len());
    for ticket in ticket_types {
        let row = ticket_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            event_id: Set(saved.id),
            name: Set(ticket.name),
            price: Set(ticket.price),
            available_quantity: Set(ticket.available_quantity),
            ..Default::default()
        };
        saved_tickets.push(row.insert(&state.db).await?);
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Event created successfully",
            "event": EventResponse {
                event: saved,
                ticket_types: saved_tickets,
            },
        })),
    ))
}

pub async fn get_all_events(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Host, Role::Admin, Role::User])?;

    let events = Event::find()
        .find_with_related(TicketType)
        .all(&state.db)
        .await?;
    let events: Vec<EventResponse> = events
        .into_iter()
        .map(|(event, ticket_types)| EventResponse {
            event,
            ticket_types,
        })
        .collect();
    Ok(Json(events))
}

pub async fn get_event_by_id(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Host, Role::Admin, Role::User])?;

    let event = Event::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;
    let ticket_types = TicketType::find()
        .filter(ticket_type::Column::EventId.eq(event.id))
        .all(&state.db)
        .await?;

    Ok(Json(EventResponse {
        event,
        ticket_types,
    }))
}

pub async fn get_events_by_host(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Host])?;

    let events = Event::find()
        .filter(event::Column::OrganizerId.eq(id))
        .find_with_related(TicketType)
        .all(&state.db)
        .await?;
    let events: Vec<EventResponse> = events
        .into_iter()
        .map(|(event, ticket_types)| EventResponse {
            event,
            ticket_types,
        })
        .collect();
    Ok(Json(events))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_type_append_is_a_set_union() {
        let mut types = vec!["Webinar".to_string()];
        assert!(add_custom_type(&mut types, "Hackathon"));
        assert_eq!(types, vec!["Webinar", "Hackathon"]);

        // exact duplicates are rejected...
        assert!(!add_custom_type(&mut types, "Hackathon"));
        assert_eq!(types.len(), 2);

        // ...but the match is case-sensitive
        assert!(add_custom_type(&mut types, "hackathon"));
        assert_eq!(types.len(), 3);
    }

    #[test]
    fn mode_parsing_accepts_only_the_two_modes() {
        assert_eq!(parse_mode("Online").unwrap(), EventMode::Online);
        assert_eq!(parse_mode("Offline").unwrap(), EventMode::Offline);
        assert!(parse_mode("online").is_err());
        assert!(parse_mode("Hybrid").is_err());
    }

    #[test]
    fn ticket_types_require_name_price_and_quantity() {
        let parsed =
            parse_ticket_types(r#"[{"name":"VIP","price":250.0,"availableQuantity":10}]"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "VIP");

        assert!(parse_ticket_types("[]").is_err());
        assert!(parse_ticket_types(r#"[{"name":"VIP","price":250.0}]"#).is_err());
        assert!(
            parse_ticket_types(r#"[{"name":"","price":250.0,"availableQuantity":10}]"#).is_err()
        );
        assert!(parse_ticket_types("not json").is_err());
    }

    #[test]
    fn event_dates_parse_rfc3339_and_plain_dates() {
        assert!(parse_event_date("2025-06-01T18:30:00Z").is_ok());
        assert!(parse_event_date("2025-06-01").is_ok());
        assert!(parse_event_date("June 1st").is_err());
    }
}
