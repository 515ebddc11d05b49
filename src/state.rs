use std::sync::Arc;
use crate::domain::ports::{BookingRepository, GuestRepository, RoomRepository};
use crate::domain::services::booking_service::BookingService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub room_repo: Arc<dyn RoomRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub booking_service: Arc<BookingService>,
}

impl AppState {
    pub fn new(
        config: Config,
        room_repo: Arc<dyn RoomRepository>,
        guest_repo: Arc<dyn GuestRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        let booking_service = Arc::new(BookingService::new(
            room_repo.clone(),
            guest_repo.clone(),
            booking_repo.clone(),
            config.enforce_max_occupancy,
        ));

        Self { config, room_repo, guest_repo, booking_repo, booking_service }
    }
}
