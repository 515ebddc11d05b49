use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::api::dtos::responses::BookingResponse;
use crate::domain::models::booking::BookingStatus;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = state.booking_service.list().await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.inspect_err(|e| warn!("Rejected booking payload: {}", e))?;
    payload.validate()?;

    info!(
        room_id = %payload.room_id,
        check_in = %payload.check_in_date,
        check_out = %payload.check_out_date,
        "Booking requested"
    );

    let today = state.config.today();
    let details = state.booking_service
        .create_booking(payload.into(), today)
        .await
        .map_err(|e| match e {
            // The room is part of the submitted payload, so a missing room
            // is a validation failure for this endpoint.
            AppError::NotFound(msg) => AppError::Validation(msg),
            other => other,
        })
        .inspect_err(|e| warn!("Booking rejected: {}", e))?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(details))))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let details = state.booking_service.get(&booking_id).await?;
    Ok(Json(details.into()))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    payload: Result<Json<UpdateBookingStatusRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, AppError> {
    // Anything other than a readable "cancelled" falls through to the
    // service, which reports it after the booking lookup.
    let requested = payload
        .ok()
        .and_then(|Json(body)| body.status)
        .and_then(|s| s.parse::<BookingStatus>().ok());

    let details = state.booking_service
        .update_status(&booking_id, requested)
        .await
        .inspect_err(|e| warn!(booking_id = %booking_id, "Status update rejected: {}", e))?;

    Ok(Json(details.into()))
}
