pub mod export;
pub mod import;
pub mod runlog;

pub use export::{render_outcome_csv, OutcomeCsvWriter, OUTCOME_CSV_HEADER};
pub use import::{apply_flag_rows, parse_flag_rows, FlagRow, ImportError};
pub use runlog::{InMemoryRunLogWriter, RunLogEvent, RunLogEventKind, RunLogWriter};
