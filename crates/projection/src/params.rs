use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Base,
    Moderate,
    Aggressive,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Self::Base, Self::Moderate, Self::Aggressive];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "S1" => Some(Self::Base),
            "S2" => Some(Self::Moderate),
            "S3" => Some(Self::Aggressive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "S1",
            Self::Moderate => "S2",
            Self::Aggressive => "S3",
        }
    }
}

/// Sizing rule for an afternoon leg on a day whose morning leg was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfternoonPolicy {
    CurrentDayCapital,
    HalfOfNextSizing,
    FullNextSizing,
}

impl AfternoonPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "current" => Some(Self::CurrentDayCapital),
            "half-next" => Some(Self::HalfOfNextSizing),
            "full-next" => Some(Self::FullNextSizing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CurrentDayCapital => "current",
            Self::HalfOfNextSizing => "half-next",
            Self::FullNextSizing => "full-next",
        }
    }
}

/// Inputs for one projection run. The engine never validates these; degenerate
/// values (zero risk, negative capital) propagate arithmetically as documented
/// in the simulator module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub initial_capital: f64,
    pub target_points: f64,
    pub point_value: f64,
    pub risk_per_contract: f64,
    pub session_count: usize,
    pub start_date: Date,
    pub afternoon_policy: AfternoonPolicy,
}

impl SimulationParameters {
    /// Stock WIN mini-index setup: R$100 margin per contract, 60-point target
    /// at R$0.20 a point, three trading weeks.
    pub fn defaults_from(start_date: Date) -> Self {
        Self {
            initial_capital: 2_000.0,
            target_points: 60.0,
            point_value: 0.20,
            risk_per_contract: 100.0,
            session_count: 15,
            start_date,
            afternoon_policy: AfternoonPolicy::CurrentDayCapital,
        }
    }
}
