use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument};

use crate::{
    clock,
    error::AppError,
    extract::JsonBody,
    leads::{
        dto::{
            AckResponse, DemoRequest, DemoResponse, DemoView, EnquiryRequest, EnquiryResponse,
            GeneralLeadRequest,
        },
        services::{demo_from, enquiry_from, general_lead_from},
    },
    state::AppState,
};

pub fn lead_routes() -> Router<AppState> {
    Router::new()
        .route("/leads/general", post(create_general_lead))
        .route("/demo", post(create_demo_request))
        .route("/enquiry", post(create_enquiry))
}

#[instrument(skip(state, payload))]
pub async fn create_general_lead(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<GeneralLeadRequest>,
) -> Result<(StatusCode, Json<AckResponse>), AppError> {
    let new = general_lead_from(&payload)?;

    let lead = state.leads.create_general_lead(&new).await.map_err(|e| {
        error!(error = %e, "saving general lead failed");
        AppError::Server("Server error")
    })?;

    info!(lead_id = %lead.id, "general lead captured");
    Ok((
        StatusCode::CREATED,
        Json(AckResponse {
            success: true,
            message: "Lead submitted successfully",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn create_demo_request(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DemoRequest>,
) -> Result<(StatusCode, Json<DemoResponse>), AppError> {
    let new = demo_from(&payload)?;

    let demo = state.leads.create_demo(&new).await.map_err(|e| {
        error!(error = %e, kind = %new.kind, "saving demo request failed");
        AppError::Server("Server error")
    })?;

    info!(demo_id = %demo.id, kind = %demo.kind, "demo request booked");
    let created_at_ist = clock::format_ist(demo.created_at);
    Ok((
        StatusCode::CREATED,
        Json(DemoResponse {
            success: true,
            message: "Booking request submitted successfully",
            data: DemoView {
                demo,
                created_at_ist,
            },
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn create_enquiry(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EnquiryRequest>,
) -> Result<(StatusCode, Json<EnquiryResponse>), AppError> {
    let new = enquiry_from(&payload)?;

    let enquiry = state.leads.create_enquiry(&new).await.map_err(|e| {
        error!(error = %e, "saving enquiry failed");
        AppError::Server("Server error while saving enquiry")
    })?;

    info!(enquiry_id = %enquiry.id, "enquiry captured");
    Ok((
        StatusCode::CREATED,
        Json(EnquiryResponse {
            success: true,
            message: "Enquiry submitted successfully",
            enquiry,
        }),
    ))
}
