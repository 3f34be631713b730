use std::io::{self, Write};

use projection::{DailyOutcome, ScenarioOutcome};
use time::macros::format_description;
use time::Date;

pub const OUTCOME_CSV_HEADER: &str =
    "Date,Start Capital,Morning Contracts,Morning Profit,Afternoon Contracts,Afternoon Profit,End Capital\n";

/// Streams a scenario's daily outcomes as CSV, one row per session in
/// sequence order.
pub struct OutcomeCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutcomeCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.writer.write_all(OUTCOME_CSV_HEADER.as_bytes())
    }

    pub fn append_outcome_rows(&mut self, outcomes: &[DailyOutcome]) -> io::Result<()> {
        for outcome in outcomes {
            writeln!(
                self.writer,
                "{},{},{},{},{},{},{}",
                format_row_date(outcome.date)?,
                format_currency(outcome.start_capital),
                format_contracts(outcome.morning_contracts),
                format_currency(outcome.morning_profit),
                format_contracts(outcome.afternoon_contracts),
                format_currency(outcome.afternoon_profit),
                format_currency(outcome.end_capital),
            )?;
        }
        Ok(())
    }
}

/// Renders a full scenario export in memory, header included.
pub fn render_outcome_csv(outcome: &ScenarioOutcome) -> io::Result<String> {
    let mut buffer = Vec::new();
    let mut writer = OutcomeCsvWriter::new(&mut buffer);
    writer.write_header()?;
    writer.append_outcome_rows(&outcome.daily_outcomes)?;
    String::from_utf8(buffer).map_err(io::Error::other)
}

fn format_row_date(date: Date) -> io::Result<String> {
    let format = format_description!("[day]/[month]/[year]");
    date.format(&format).map_err(io::Error::other)
}

fn format_currency(value: f64) -> String {
    format!("{value:.2}")
}

// Degenerate inputs can leave non-whole or non-finite counts; those render raw.
fn format_contracts(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
