use time::{Date, Weekday};

/// One business day's trading opportunity. The morning and afternoon legs can
/// be toggled independently by the caller before simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingSession {
    pub sequence_index: usize,
    pub date: Date,
    pub morning_enabled: bool,
    pub afternoon_enabled: bool,
}

/// Collects `session_count` business days starting at `start_date` inclusive,
/// skipping Saturdays and Sundays. Both legs start enabled; regeneration fully
/// replaces any previous schedule, so leg toggles do not survive a change of
/// start date or session count.
pub fn generate_schedule(start_date: Date, session_count: usize) -> Vec<TradingSession> {
    let mut sessions = Vec::with_capacity(session_count);
    let mut current = start_date;

    while sessions.len() < session_count {
        if !is_weekend(current) {
            sessions.push(TradingSession {
                sequence_index: sessions.len() + 1,
                date: current,
                morning_enabled: true,
                afternoon_enabled: true,
            });
        }
        current = current
            .next_day()
            .expect("calendar range exhausted before the schedule was filled");
    }

    sessions
}

fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Enabled half-day legs, morning and afternoon counted separately.
pub fn active_half_sessions(sessions: &[TradingSession]) -> usize {
    sessions
        .iter()
        .map(|session| {
            usize::from(session.morning_enabled) + usize::from(session.afternoon_enabled)
        })
        .sum()
}

pub fn total_half_sessions(sessions: &[TradingSession]) -> usize {
    sessions.len() * 2
}
