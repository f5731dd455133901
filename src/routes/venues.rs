use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use garde::Validate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::entities::{
    prelude::*,
    sea_orm_active_enums::{Role, VerificationStatus},
    venue,
};
use crate::error::{AppError, AppResult};
use crate::router::AppState;

use super::collect_multipart;

#[derive(Debug, Validate)]
pub struct CreateVenueRequest {
    #[garde(length(min = 1))]
    pub venue_name: String,
    #[garde(length(min = 1))]
    pub description: String,
    #[garde(length(min = 1))]
    pub address: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    pub daily_rate: f64,
    #[garde(skip)]
    pub hourly_rate: f64,
    #[garde(range(min = 1))]
    pub min_hourly_duration: i32,
    #[garde(range(min = 1))]
    pub max_hourly_duration: i32,
    #[garde(skip)]
    pub amenities: Vec<String>,
    #[garde(email)]
    pub owner_email: String,
    #[garde(length(min = 1))]
    pub owner_phone: String,
}

fn parse_create_form(form: &super::FormData) -> AppResult<CreateVenueRequest> {
    let capacity: i32 = form
        .required("capacity")?
        .parse()
        .map_err(|_| AppError::Validation("Capacity must be a positive integer".into()))?;
    let daily_rate: f64 = form
        .required("dailyRate")?
        .parse()
        .ok()
        .filter(|rate| *rate >= 0.0)
        .ok_or_else(|| {
            AppError::Validation("Daily rate must be a valid positive number".into())
        })?;
    let hourly_rate: f64 = form
        .required("hourlyRate")?
        .parse()
        .ok()
        .filter(|rate| *rate >= 0.0)
        .ok_or_else(|| {
            AppError::Validation("Hourly rate must be a valid positive number".into())
        })?;
    let min_hourly_duration: i32 = match form.text("minHourlyDuration") {
        Some(raw) => raw.parse().map_err(|_| {
            AppError::Validation("Minimum hourly duration must be a positive integer".into())
        })?,
        None => 1,
    };
    let max_hourly_duration: i32 = match form.text("maxHourlyDuration") {
        Some(raw) => raw.parse().map_err(|_| {
            AppError::Validation("Maximum hourly duration must be a positive integer".into())
        })?,
        None => 8,
    };

    Ok(CreateVenueRequest {
        venue_name: form.required("venueName")?.to_string(),
        description: form.required("description")?.to_string(),
        address: form.required("address")?.to_string(),
        capacity,
        daily_rate,
        hourly_rate,
        min_hourly_duration,
        max_hourly_duration,
        amenities: form.texts("amenities").to_vec(),
        owner_email: form.required("ownerEmail")?.to_string(),
        owner_phone: form.required("ownerPhone")?.to_string(),
    })
}

pub async fn create_venue(
    State(state): State<AppState>,
    caller: CurrentUser,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Renter, Role::Admin])?;

    let form = collect_multipart(multipart).await?;
    let request = parse_create_form(&form)?;
    request.validate()?;

    let existing = Venue::find()
        .filter(venue::Column::VenueName.eq(request.venue_name.clone()))
        .filter(venue::Column::Address.eq(request.address.clone()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "A venue with the same name and address already exists.".into(),
        ));
    }

    let mut image_urls = Vec::new();
    for file in form.files("images") {
        let url = state
            .media
            .upload("venues/images", &file.file_name, file.bytes.clone())
            .await
            .map_err(AppError::MediaUpload)?;
        image_urls.push(url);
    }

    let mut document_urls = Vec::new();
    for file in form.files("documents") {
        let url = state
            .media
            .upload("venues/documents", &file.file_name, file.bytes.clone())
            .await
            .map_err(AppError::MediaUpload)?;
        document_urls.push(url);
    }

    let new_venue = venue::ActiveModel {
        id: Set(Uuid::new_v4()),
        venue_name: Set(request.venue_name),
        description: Set(request.description),
        address: Set(request.address),
        capacity: Set(request.capacity),
        daily_rate: Set(request.daily_rate),
        hourly_rate: Set(request.hourly_rate),
        min_hourly_duration: Set(request.min_hourly_duration),
        max_hourly_duration: Set(request.max_hourly_duration),
        amenities: Set(json!(request.amenities)),
        owner_id: Set(caller.user_id),
        owner_email: Set(request.owner_email),
        owner_phone: Set(request.owner_phone),
        verification_status: Set(VerificationStatus::Pending),
        documents: Set(json!(document_urls)),
        admin_remarks: Set(String::new()),
        images: Set(json!(image_urls)),
        ..Default::default()
    };
    let saved = new_venue.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Venue created successfully", "venue": saved })),
    ))
}

pub async fn get_all_venues(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let venues = Venue::find().all(&state.db).await?;
    Ok(Json(venues))
}

pub async fn get_venue_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let venue = Venue::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".into()))?;
    Ok(Json(venue))
}

pub async fn get_venues_by_owner(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(owner_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Renter, Role::Admin])?;

    let venues = Venue::find()
        .filter(venue::Column::OwnerId.eq(owner_id))
        .all(&state.db)
        .await?;
    if venues.is_empty() {
        return Err(AppError::NotFound("No venues found for the owner".into()));
    }
    Ok(Json(venues))
}

pub async fn get_verified_venues(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Host, Role::Admin])?;

    let venues = Venue::find()
        .filter(venue::Column::VerificationStatus.eq(VerificationStatus::Approved))
        .all(&state.db)
        .await?;
    Ok(Json(venues))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVenueRequest {
    pub venue_name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub daily_rate: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub min_hourly_duration: Option<i32>,
    pub max_hourly_duration: Option<i32>,
    pub amenities: Option<Vec<String>>,
}

pub async fn update_venue(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVenueRequest>,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Renter, Role::Admin])?;

    let venue = Venue::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".into()))?;

    let mut venue = venue.into_active_model();
    if let Some(venue_name) = payload.venue_name {
        venue.venue_name = Set(venue_name);
    }
    if let Some(description) = payload.description {
        venue.description = Set(description);
    }
    if let Some(address) = payload.address {
        venue.address = Set(address);
    }
    if let Some(capacity) = payload.capacity {
        venue.capacity = Set(capacity);
    }
    if let Some(daily_rate) = payload.daily_rate {
        venue.daily_rate = Set(daily_rate);
    }
    if let Some(hourly_rate) = payload.hourly_rate {
        venue.hourly_rate = Set(hourly_rate);
    }
    if let Some(min_hourly_duration) = payload.min_hourly_duration {
        venue.min_hourly_duration = Set(min_hourly_duration);
    }
    if let Some(max_hourly_duration) = payload.max_hourly_duration {
        venue.max_hourly_duration = Set(max_hourly_duration);
    }
    if let Some(amenities) = payload.amenities {
        venue.amenities = Set(json!(amenities));
    }
    let updated = venue.update(&state.db).await?;

    Ok(Json(
        json!({ "message": "Venue updated successfully", "venue": updated }),
    ))
}

pub async fn delete_venue(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Renter, Role::Admin])?;

    let venue = Venue::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".into()))?;

    let deleted = venue.clone();
    venue.delete(&state.db).await?;

    Ok(Json(
        json!({ "message": "venue deleted successfully", "venue": deleted }),
    ))
}
