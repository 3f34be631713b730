use std::{error::Error, fmt};

use projection::TradingSession;

/// One imported row of leg flags. The date column is positional only; rows
/// map onto sessions by order, not by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagRow {
    pub morning: bool,
    pub afternoon: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportError {
    MissingColumns,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns => {
                write!(f, "import header must contain date, morning and afternoon columns")
            }
        }
    }
}

impl Error for ImportError {}

/// Parses the `date,morning,afternoon` flag format. The header must mention
/// all three column names or the whole import is rejected; after that, rows
/// are tolerated loosely: lines with fewer than three fields are skipped and
/// any flag value other than `1` reads as disabled.
pub fn parse_flag_rows(text: &str) -> Result<Vec<FlagRow>, ImportError> {
    let mut lines = text.trim().lines();
    let header = lines.next().unwrap_or_default().to_lowercase();
    if !header.contains("date") || !header.contains("morning") || !header.contains("afternoon") {
        return Err(ImportError::MissingColumns);
    }

    let mut rows = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            continue;
        }
        rows.push(FlagRow {
            morning: fields[1].trim() == "1",
            afternoon: fields[2].trim() == "1",
        });
    }

    Ok(rows)
}

/// Applies rows onto sessions positionally, truncating at the shorter side.
/// Returns how many sessions were updated.
pub fn apply_flag_rows(sessions: &mut [TradingSession], rows: &[FlagRow]) -> usize {
    let applied = sessions.len().min(rows.len());
    for (session, row) in sessions.iter_mut().zip(rows) {
        session.morning_enabled = row.morning;
        session.afternoon_enabled = row.afternoon;
    }
    applied
}

#[cfg(test)]
mod tests {
    use projection::generate_schedule;
    use time::macros::date;

    use super::{apply_flag_rows, parse_flag_rows, FlagRow, ImportError};

    #[test]
    fn rejects_header_missing_a_required_column() {
        let err = parse_flag_rows("date,morning\n01/02,1,0\n").unwrap_err();

        assert_eq!(err, ImportError::MissingColumns);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_flag_rows(""), Err(ImportError::MissingColumns));
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let rows = parse_flag_rows("Date,Morning,Afternoon\n01/02,1,0\n").unwrap();

        assert_eq!(rows, vec![FlagRow { morning: true, afternoon: false }]);
    }

    #[test]
    fn only_the_literal_one_enables_a_leg() {
        let rows = parse_flag_rows("date,morning,afternoon\nx,1,0\nx,true,yes\nx, 1 ,1\n").unwrap();

        assert_eq!(
            rows,
            vec![
                FlagRow { morning: true, afternoon: false },
                FlagRow { morning: false, afternoon: false },
                FlagRow { morning: true, afternoon: true },
            ]
        );
    }

    #[test]
    fn short_rows_are_skipped_rather_than_failing() {
        let rows = parse_flag_rows("date,morning,afternoon\nx,1,1\nbroken\nx,0,1\n").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], FlagRow { morning: false, afternoon: true });
    }

    #[test]
    fn rows_apply_positionally_onto_sessions() {
        let mut sessions = generate_schedule(date!(2026 - 01 - 05), 3);
        let rows = parse_flag_rows("date,morning,afternoon\nx,0,1\nx,1,0\nx,0,0\n").unwrap();

        let applied = apply_flag_rows(&mut sessions, &rows);

        assert_eq!(applied, 3);
        assert!(!sessions[0].morning_enabled && sessions[0].afternoon_enabled);
        assert!(sessions[1].morning_enabled && !sessions[1].afternoon_enabled);
        assert!(!sessions[2].morning_enabled && !sessions[2].afternoon_enabled);
    }

    #[test]
    fn extra_rows_beyond_the_schedule_are_truncated() {
        let mut sessions = generate_schedule(date!(2026 - 01 - 05), 2);
        let rows = parse_flag_rows("date,morning,afternoon\nx,0,0\nx,0,0\nx,0,0\n").unwrap();

        let applied = apply_flag_rows(&mut sessions, &rows);

        assert_eq!(applied, 2);
    }

    #[test]
    fn fewer_rows_than_sessions_leave_the_tail_untouched() {
        let mut sessions = generate_schedule(date!(2026 - 01 - 05), 3);
        let rows = parse_flag_rows("date,morning,afternoon\nx,0,0\n").unwrap();

        let applied = apply_flag_rows(&mut sessions, &rows);

        assert_eq!(applied, 1);
        assert!(sessions[1].morning_enabled && sessions[1].afternoon_enabled);
        assert!(sessions[2].morning_enabled && sessions[2].afternoon_enabled);
    }
}
