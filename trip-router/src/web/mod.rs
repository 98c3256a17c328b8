//! Web layer for the trip router.
//!
//! Provides HTTP endpoints for listing lines and planning trips.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
