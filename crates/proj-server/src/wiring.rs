use api::state::AppState;
use axum::{routing::get, Router};

pub fn build_app(state: AppState) -> Router {
    debug_assert!(api::module_ready());

    api::routes::router(state).route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}
