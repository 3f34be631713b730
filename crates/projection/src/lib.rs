mod params;
mod schedule;
mod simulate;
mod sizing;

pub use params::{AfternoonPolicy, Scenario, SimulationParameters};
pub use schedule::{
    active_half_sessions, generate_schedule, total_half_sessions, TradingSession,
};
pub use simulate::{simulate, DailyOutcome, ScenarioOutcome, SimulationResults};
pub use sizing::{afternoon_contracts, contracts_for, profit_for};

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{generate_schedule, Scenario, SimulationParameters, SimulationResults};

    #[test]
    fn schedule_and_projection_lengths_agree() {
        let params = SimulationParameters::defaults_from(date!(2026 - 02 - 02));
        let sessions = generate_schedule(params.start_date, params.session_count);

        let results = SimulationResults::compute(&params, &sessions);

        for scenario in Scenario::ALL {
            assert_eq!(
                results.for_scenario(scenario).daily_outcomes.len(),
                params.session_count
            );
        }
    }

    #[test]
    fn scenario_runs_do_not_influence_each_other() {
        let params = SimulationParameters::defaults_from(date!(2026 - 02 - 02));
        let sessions = generate_schedule(params.start_date, 10);

        let standalone = super::simulate(Scenario::Moderate, &params, &sessions);
        let bundled = SimulationResults::compute(&params, &sessions);

        assert_eq!(bundled.s2, standalone);
    }
}
