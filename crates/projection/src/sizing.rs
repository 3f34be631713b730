use crate::params::{AfternoonPolicy, Scenario};

/// Position size for the available capital, floored to whole contracts. Kept
/// as `f64` so degenerate inputs (zero risk, negative capital) propagate as
/// non-finite or negative counts instead of panicking in an integer cast.
pub fn contracts_for(capital: f64, risk_per_contract: f64) -> f64 {
    (capital / risk_per_contract).floor()
}

pub fn profit_for(contracts: f64, target_points: f64, point_value: f64) -> f64 {
    contracts * target_points * point_value
}

/// Afternoon sizing rule table. `morning_contracts` is `Some` when the morning
/// leg traded that day.
///
/// When the morning leg was skipped, the moderate and aggressive scenarios
/// share the same `AfternoonPolicy` mapping. That symmetry is intentional and
/// must not be collapsed into scenario-specific behavior.
pub fn afternoon_contracts(
    scenario: Scenario,
    policy: AfternoonPolicy,
    morning_contracts: Option<f64>,
    start_capital: f64,
    current_capital: f64,
    risk_per_contract: f64,
) -> f64 {
    if scenario == Scenario::Base {
        return match morning_contracts {
            Some(contracts) => contracts,
            None => contracts_for(start_capital, risk_per_contract),
        };
    }

    let capital_for_sizing = if morning_contracts.is_some() {
        current_capital
    } else {
        start_capital
    };
    let projected = contracts_for(capital_for_sizing, risk_per_contract);

    match (morning_contracts, scenario) {
        (Some(_), Scenario::Moderate) => (projected * 0.5).floor(),
        (Some(_), _) => projected,
        (None, _) => match policy {
            AfternoonPolicy::CurrentDayCapital => contracts_for(start_capital, risk_per_contract),
            AfternoonPolicy::HalfOfNextSizing => (projected * 0.5).floor(),
            AfternoonPolicy::FullNextSizing => projected,
        },
    }
}
