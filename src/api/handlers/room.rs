use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::dtos::requests::RoomSearchQuery;
use crate::domain::models::room::Room;
use crate::domain::services::room_directory::list_available;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Room>>, AppError> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            warn!("Ignoring unreadable room query: {}", e);
            Vec::new()
        }
    };

    let filters = RoomSearchQuery::from_pairs(pairs).into_filters();
    debug!(?filters, "Listing rooms");

    let rooms = list_available(state.room_repo.as_ref(), state.booking_repo.as_ref(), &filters).await?;
    Ok(Json(rooms))
}
