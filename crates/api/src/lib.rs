pub mod dto;
pub mod routes;
pub mod state;
pub mod ws;

use axum::Router;
use projection::SimulationParameters;
use time::OffsetDateTime;

pub fn module_ready() -> bool {
    true
}

/// Default application: stock parameters anchored at today's UTC date.
pub fn app() -> Router {
    let start_date = OffsetDateTime::now_utc().date();
    routes::router(state::AppState::new(SimulationParameters::defaults_from(
        start_date,
    )))
}
