//! Seat listing handler.

use axum::Json;
use axum::extract::State;

use seathold_lock::SeatView;

use crate::dto::request::ListSeatsQuery;
use crate::extractors::ApiQuery;
use crate::state::AppState;

/// GET /api/seats?includeLocks=true
pub async fn list_seats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListSeatsQuery>,
) -> Json<Vec<SeatView>> {
    Json(state.manager.list_state(query.include_locks))
}
