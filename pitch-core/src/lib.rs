pub mod models;
pub mod validation;
pub mod conflict;
pub mod status;
pub mod repository;
pub mod service;

pub use models::{Booking, BookingFilter, BookingStatus, NewBooking, NewPitch, Pitch};
pub use repository::{BookingRepository, PitchRepository};
pub use service::{BookingService, ServiceError};
pub use validation::{Validation, ValidationError};
