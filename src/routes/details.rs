use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use garde::Validate;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::entities::{organizer_detail, prelude::*, sea_orm_active_enums::Role};
use crate::error::{AppError, AppResult};
use crate::router::AppState;

use super::{UploadedFile, collect_multipart};

const MAX_PAN_CARD_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Validate)]
pub struct CreateDetailsRequest {
    #[garde(length(min = 1))]
    pub organization_name: String,
    #[garde(length(min = 1))]
    pub pan_card_number: String,
    #[garde(length(min = 1))]
    pub organization_address: String,
    #[garde(length(min = 1))]
    pub contact_name: String,
    #[garde(email)]
    pub contact_email: String,
    #[garde(length(min = 1))]
    pub contact_phone: String,
    #[garde(length(min = 1))]
    pub beneficiary_name: String,
    #[garde(length(min = 1))]
    pub account_type: String,
    #[garde(length(min = 1))]
    pub account_number: String,
    #[garde(length(min = 1))]
    pub bank_name: String,
    #[garde(length(min = 1))]
    pub ifsc_code: String,
}

fn parse_details_form(form: &super::FormData) -> AppResult<CreateDetailsRequest> {
    Ok(CreateDetailsRequest {
        organization_name: form.required("organizationName")?.to_string(),
        pan_card_number: form.required("panCardNumber")?.to_string(),
        organization_address: form.required("organizationAddress")?.to_string(),
        contact_name: form.required("contactName")?.to_string(),
        contact_email: form.required("contactEmail")?.to_string(),
        contact_phone: form.required("contactPhone")?.to_string(),
        beneficiary_name: form.required("beneficiaryName")?.to_string(),
        account_type: form.required("accountType")?.to_string(),
        account_number: form.required("accountNumber")?.to_string(),
        bank_name: form.required("bankName")?.to_string(),
        ifsc_code: form.required("ifscCode")?.to_string(),
    })
}

/// Only jpeg scans up to 2 MB are accepted.
fn check_pan_card(file: &UploadedFile) -> AppResult<()> {
    if file.content_type.as_deref() != Some("image/jpeg") {
        return Err(AppError::Validation("Only jpeg files are allowed".into()));
    }
    if file.bytes.len() > MAX_PAN_CARD_BYTES {
        return Err(AppError::Validation("File too large".into()));
    }
    Ok(())
}

pub async fn create_details(
    State(state): State<AppState>,
    caller: CurrentUser,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    caller.require_role(&[Role::Host, Role::Renter])?;

    let form = collect_multipart(multipart).await?;
    let request = parse_details_form(&form)?;
    request.validate()?;

    let Some(pan_card) = form.files("panCard").first() else {
        return Err(AppError::Validation("No file uploaded".into()));
    };
    check_pan_card(pan_card)?;

    let existing = OrganizerDetail::find()
        .filter(organizer_detail::Column::PanCardNumber.eq(request.pan_card_number.clone()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("This pan already exists".into()));
    }

    let pan_card_url = state
        .media
        .upload("pan-cards", &pan_card.file_name, pan_card.bytes.clone())
        .await
        .map_err(AppError::MediaUpload)?;

    let details = organizer_detail::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(caller.user_id),
        organization_name: Set(request.organization_name),
        pan_card_number: Set(request.pan_card_number),
        organization_address: Set(request.organization_address),
        contact_name: Set(request.contact_name),
        contact_email: Set(request.contact_email),
        contact_phone: Set(request.contact_phone),
        beneficiary_name: Set(request.beneficiary_name),
        account_type: Set(request.account_type),
        account_number: Set(request.account_number),
        bank_name: Set(request.bank_name),
        ifsc_code: Set(request.ifsc_code),
        pan_card_url: Set(pan_card_url),
        ..Default::default()
    };
    let details = details.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Details added successfully", "details": details })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(bytes: usize) -> UploadedFile {
        UploadedFile {
            file_name: "pan.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![0; bytes],
        }
    }

    #[test]
    fn jpeg_under_the_limit_is_accepted() {
        assert!(check_pan_card(&jpeg(1024)).is_ok());
    }

    #[test]
    fn oversized_and_non_jpeg_files_are_rejected() {
        assert!(check_pan_card(&jpeg(MAX_PAN_CARD_BYTES + 1)).is_err());

        let png = UploadedFile {
            file_name: "pan.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![0; 10],
        };
        assert!(check_pan_card(&png).is_err());
    }
}
