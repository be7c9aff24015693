use std::sync::Arc;

use pitch_core::BookingService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(service: BookingService, max_body_bytes: usize) -> Self {
        Self {
            service: Arc::new(service),
            max_body_bytes,
        }
    }
}
