mod dto;
pub mod handlers;
pub mod repo;

pub use repo::Schedule;

use crate::state::AppState;
use axum::Router;

/// Canonical day names a schedule entry may carry, as the clients and the
/// matcher spell them.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
