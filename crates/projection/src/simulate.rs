use time::Date;

use crate::params::{Scenario, SimulationParameters};
use crate::schedule::TradingSession;
use crate::sizing;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyOutcome {
    pub date: Date,
    pub start_capital: f64,
    pub morning_contracts: f64,
    pub morning_profit: f64,
    pub afternoon_contracts: f64,
    pub afternoon_profit: f64,
    pub end_capital: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub final_capital: f64,
    pub total_gain: f64,
    pub roi_percent: f64,
    pub sessions_with_activity: usize,
    pub daily_outcomes: Vec<DailyOutcome>,
}

/// Projections for all three sizing scenarios over the same inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResults {
    pub s1: ScenarioOutcome,
    pub s2: ScenarioOutcome,
    pub s3: ScenarioOutcome,
}

impl SimulationResults {
    pub fn compute(parameters: &SimulationParameters, sessions: &[TradingSession]) -> Self {
        Self {
            s1: simulate(Scenario::Base, parameters, sessions),
            s2: simulate(Scenario::Moderate, parameters, sessions),
            s3: simulate(Scenario::Aggressive, parameters, sessions),
        }
    }

    pub fn for_scenario(&self, scenario: Scenario) -> &ScenarioOutcome {
        match scenario {
            Scenario::Base => &self.s1,
            Scenario::Moderate => &self.s2,
            Scenario::Aggressive => &self.s3,
        }
    }
}

/// Runs one scenario over the session sequence. Pure: reads only its
/// arguments, allocates only its output, and never looks at another
/// scenario's trace. Capital carries forward strictly session by session.
pub fn simulate(
    scenario: Scenario,
    parameters: &SimulationParameters,
    sessions: &[TradingSession],
) -> ScenarioOutcome {
    let mut daily_outcomes = Vec::with_capacity(sessions.len());
    let mut current_capital = parameters.initial_capital;

    for session in sessions {
        let start_capital = current_capital;

        let mut morning_contracts = 0.0;
        let mut morning_profit = 0.0;
        if session.morning_enabled {
            morning_contracts =
                sizing::contracts_for(current_capital, parameters.risk_per_contract);
            morning_profit = sizing::profit_for(
                morning_contracts,
                parameters.target_points,
                parameters.point_value,
            );
            current_capital += morning_profit;
        }

        let mut afternoon_contracts = 0.0;
        let mut afternoon_profit = 0.0;
        if session.afternoon_enabled {
            afternoon_contracts = sizing::afternoon_contracts(
                scenario,
                parameters.afternoon_policy,
                session.morning_enabled.then_some(morning_contracts),
                start_capital,
                current_capital,
                parameters.risk_per_contract,
            );
            afternoon_profit = sizing::profit_for(
                afternoon_contracts,
                parameters.target_points,
                parameters.point_value,
            );
            current_capital += afternoon_profit;
        }

        daily_outcomes.push(DailyOutcome {
            date: session.date,
            start_capital,
            morning_contracts,
            morning_profit,
            afternoon_contracts,
            afternoon_profit,
            end_capital: current_capital,
        });
    }

    let final_capital = current_capital;
    let total_gain = final_capital - parameters.initial_capital;
    let roi_percent = total_gain / parameters.initial_capital * 100.0;
    let sessions_with_activity = sessions
        .iter()
        .filter(|session| session.morning_enabled || session.afternoon_enabled)
        .count();

    ScenarioOutcome {
        scenario,
        final_capital,
        total_gain,
        roi_percent,
        sessions_with_activity,
        daily_outcomes,
    }
}
