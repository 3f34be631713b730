mod config;
mod wiring;

use std::error::Error;

use api::state::AppState;
use projection::SimulationParameters;
use time::OffsetDateTime;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = config::Config::from_env()?;
    let state = AppState::new(startup_parameters(&config));

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, wiring::build_app(state)).await?;
    Ok(())
}

/// Stock parameters anchored at today's UTC date, with the deployment's
/// session count and bankroll applied on top.
fn startup_parameters(config: &config::Config) -> SimulationParameters {
    let mut parameters = SimulationParameters::defaults_from(OffsetDateTime::now_utc().date());
    parameters.session_count = config.session_count;
    parameters.initial_capital = config.initial_capital;
    parameters
}
