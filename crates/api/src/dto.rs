use std::{error::Error, fmt};

use projection::{
    DailyOutcome, ScenarioOutcome, SimulationParameters, SimulationResults, TradingSession,
};
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

const WIRE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtoError {
    InvalidStartDate,
    InvalidAfternoonPolicy,
}

impl fmt::Display for DtoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStartDate => {
                write!(f, "start_date must be a yyyy-mm-dd calendar date")
            }
            Self::InvalidAfternoonPolicy => {
                write!(
                    f,
                    "afternoon_policy must be one of: current, half-next, full-next"
                )
            }
        }
    }
}

impl Error for DtoError {}

pub fn format_wire_date(date: Date) -> String {
    date.format(&WIRE_DATE_FORMAT)
        .expect("static date format renders any calendar date")
}

pub fn parse_wire_date(value: &str) -> Result<Date, DtoError> {
    Date::parse(value, &WIRE_DATE_FORMAT).map_err(|_| DtoError::InvalidStartDate)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersDto {
    pub initial_capital: f64,
    pub target_points: f64,
    pub point_value: f64,
    pub risk_per_contract: f64,
    pub session_count: usize,
    pub start_date: String,
    pub afternoon_policy: String,
}

impl ParametersDto {
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            initial_capital: params.initial_capital,
            target_points: params.target_points,
            point_value: params.point_value,
            risk_per_contract: params.risk_per_contract,
            session_count: params.session_count,
            start_date: format_wire_date(params.start_date),
            afternoon_policy: params.afternoon_policy.as_str().to_string(),
        }
    }

    pub fn to_params(&self) -> Result<SimulationParameters, DtoError> {
        Ok(SimulationParameters {
            initial_capital: self.initial_capital,
            target_points: self.target_points,
            point_value: self.point_value,
            risk_per_contract: self.risk_per_contract,
            session_count: self.session_count,
            start_date: parse_wire_date(&self.start_date)?,
            afternoon_policy: projection::AfternoonPolicy::parse(&self.afternoon_policy)
                .ok_or(DtoError::InvalidAfternoonPolicy)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDto {
    pub sequence_index: usize,
    pub date: String,
    pub morning_enabled: bool,
    pub afternoon_enabled: bool,
}

impl SessionDto {
    pub fn from_session(session: &TradingSession) -> Self {
        Self {
            sequence_index: session.sequence_index,
            date: format_wire_date(session.date),
            morning_enabled: session.morning_enabled,
            afternoon_enabled: session.afternoon_enabled,
        }
    }
}

/// Partial update for one session's leg flags; omitted fields keep their
/// current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SessionPatchDto {
    #[serde(default)]
    pub morning: Option<bool>,
    #[serde(default)]
    pub afternoon: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOutcomeDto {
    pub date: String,
    pub start_capital: f64,
    pub morning_contracts: f64,
    pub morning_profit: f64,
    pub afternoon_contracts: f64,
    pub afternoon_profit: f64,
    pub end_capital: f64,
}

impl DailyOutcomeDto {
    pub fn from_outcome(outcome: &DailyOutcome) -> Self {
        Self {
            date: format_wire_date(outcome.date),
            start_capital: outcome.start_capital,
            morning_contracts: outcome.morning_contracts,
            morning_profit: outcome.morning_profit,
            afternoon_contracts: outcome.afternoon_contracts,
            afternoon_profit: outcome.afternoon_profit,
            end_capital: outcome.end_capital,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcomeDto {
    pub scenario: String,
    pub final_capital: f64,
    pub total_gain: f64,
    pub roi_percent: f64,
    pub sessions_with_activity: usize,
    pub daily_outcomes: Vec<DailyOutcomeDto>,
}

impl ScenarioOutcomeDto {
    pub fn from_outcome(outcome: &ScenarioOutcome) -> Self {
        Self {
            scenario: outcome.scenario.as_str().to_string(),
            final_capital: outcome.final_capital,
            total_gain: outcome.total_gain,
            roi_percent: outcome.roi_percent,
            sessions_with_activity: outcome.sessions_with_activity,
            daily_outcomes: outcome
                .daily_outcomes
                .iter()
                .map(DailyOutcomeDto::from_outcome)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsDto {
    pub s1: ScenarioOutcomeDto,
    pub s2: ScenarioOutcomeDto,
    pub s3: ScenarioOutcomeDto,
}

impl ResultsDto {
    pub fn from_results(results: &SimulationResults) -> Self {
        Self {
            s1: ScenarioOutcomeDto::from_outcome(&results.s1),
            s2: ScenarioOutcomeDto::from_outcome(&results.s2),
            s3: ScenarioOutcomeDto::from_outcome(&results.s3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    pub revision: u64,
    pub active_half_sessions: usize,
    pub total_half_sessions: usize,
    pub logged_events: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponseDto {
    pub applied_rows: usize,
}

#[cfg(test)]
mod tests {
    use projection::{AfternoonPolicy, SimulationParameters};
    use time::macros::date;

    use super::{format_wire_date, parse_wire_date, DtoError, ParametersDto};

    #[test]
    fn wire_dates_round_trip() {
        let date = date!(2026 - 01 - 05);

        assert_eq!(format_wire_date(date), "2026-01-05");
        assert_eq!(parse_wire_date("2026-01-05").unwrap(), date);
    }

    #[test]
    fn malformed_wire_date_is_rejected() {
        assert_eq!(parse_wire_date("05/01/2026"), Err(DtoError::InvalidStartDate));
        assert_eq!(parse_wire_date("2026-13-40"), Err(DtoError::InvalidStartDate));
    }

    #[test]
    fn parameters_dto_round_trips() {
        let params = SimulationParameters::defaults_from(date!(2026 - 01 - 05));

        let dto = ParametersDto::from_params(&params);
        let restored = dto.to_params().unwrap();

        assert_eq!(restored, params);
        assert_eq!(dto.afternoon_policy, "current");
    }

    #[test]
    fn unknown_afternoon_policy_string_is_rejected() {
        let mut dto =
            ParametersDto::from_params(&SimulationParameters::defaults_from(date!(2026 - 01 - 05)));
        dto.afternoon_policy = "double-next".to_string();

        assert_eq!(dto.to_params(), Err(DtoError::InvalidAfternoonPolicy));
    }

    #[test]
    fn policy_strings_map_to_variants() {
        let mut dto =
            ParametersDto::from_params(&SimulationParameters::defaults_from(date!(2026 - 01 - 05)));
        dto.afternoon_policy = "half-next".to_string();

        assert_eq!(
            dto.to_params().unwrap().afternoon_policy,
            AfternoonPolicy::HalfOfNextSizing
        );
    }
}
