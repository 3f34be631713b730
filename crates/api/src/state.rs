use std::io;
use std::sync::Arc;

use projection::{
    active_half_sessions, generate_schedule, simulate, total_half_sessions, Scenario,
    SimulationParameters, SimulationResults, TradingSession,
};
use tabular::{
    apply_flag_rows, parse_flag_rows, render_outcome_csv, ImportError, InMemoryRunLogWriter,
    RunLogEvent, RunLogEventKind, RunLogWriter,
};
use tokio::sync::{broadcast, Mutex};

/// Event fan-out for websocket subscribers. Mirrors the run log but carries
/// enough payload for a client to refresh without polling.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ApiEvent {
    Connected {
        revision: u64,
    },
    ParametersUpdated {
        revision: u64,
    },
    ScheduleRegenerated {
        revision: u64,
        session_count: usize,
    },
    SessionToggled {
        revision: u64,
        sequence_index: usize,
        morning_enabled: bool,
        afternoon_enabled: bool,
    },
    FlagsImported {
        revision: u64,
        applied_rows: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub revision: u64,
    pub active_half_sessions: usize,
    pub total_half_sessions: usize,
    pub logged_events: usize,
}

#[derive(Debug)]
struct SimulatorState {
    parameters: SimulationParameters,
    sessions: Vec<TradingSession>,
    revision: u64,
    run_log: InMemoryRunLogWriter,
}

/// Owns the mutable parameter/schedule state the engine itself refuses to
/// hold. Every mutation bumps `revision`; projections are recomputed from the
/// current state on each read.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<SimulatorState>>,
    events_tx: broadcast::Sender<ApiEvent>,
}

impl AppState {
    pub fn new(parameters: SimulationParameters) -> Self {
        let sessions = generate_schedule(parameters.start_date, parameters.session_count);
        let (events_tx, _) = broadcast::channel(256);
        Self {
            inner: Arc::new(Mutex::new(SimulatorState {
                parameters,
                sessions,
                revision: 0,
                run_log: InMemoryRunLogWriter::new(),
            })),
            events_tx,
        }
    }

    pub async fn parameters(&self) -> SimulationParameters {
        self.inner.lock().await.parameters
    }

    pub async fn sessions(&self) -> Vec<TradingSession> {
        self.inner.lock().await.sessions.clone()
    }

    pub async fn revision(&self) -> u64 {
        self.inner.lock().await.revision
    }

    pub async fn status(&self) -> StatusSnapshot {
        let state = self.inner.lock().await;
        StatusSnapshot {
            revision: state.revision,
            active_half_sessions: active_half_sessions(&state.sessions),
            total_half_sessions: total_half_sessions(&state.sessions),
            logged_events: state.run_log.events().len(),
        }
    }

    /// Replaces the parameters. The schedule is regenerated, dropping all leg
    /// toggles, only when a schedule-affecting field changed.
    pub async fn update_parameters(&self, parameters: SimulationParameters) -> u64 {
        let mut state = self.inner.lock().await;
        let schedule_changed = parameters.start_date != state.parameters.start_date
            || parameters.session_count != state.parameters.session_count;

        state.parameters = parameters;
        state.revision += 1;
        let revision = state.revision;
        state
            .run_log
            .write(RunLogEvent::new(revision, RunLogEventKind::ParametersUpdated, None));
        let _ = self.events_tx.send(ApiEvent::ParametersUpdated { revision });

        if schedule_changed {
            state.sessions = generate_schedule(parameters.start_date, parameters.session_count);
            state.run_log.write(RunLogEvent::new(
                revision,
                RunLogEventKind::ScheduleRegenerated,
                None,
            ));
            let _ = self.events_tx.send(ApiEvent::ScheduleRegenerated {
                revision,
                session_count: state.sessions.len(),
            });
        }

        revision
    }

    /// Applies a partial flag update to one session, addressed by its 1-based
    /// sequence index. Returns the updated session, or `None` if the index is
    /// not in the schedule.
    pub async fn toggle_session(
        &self,
        sequence_index: usize,
        morning: Option<bool>,
        afternoon: Option<bool>,
    ) -> Option<TradingSession> {
        let mut state = self.inner.lock().await;
        let position = state
            .sessions
            .iter()
            .position(|session| session.sequence_index == sequence_index)?;

        {
            let session = &mut state.sessions[position];
            if let Some(morning) = morning {
                session.morning_enabled = morning;
            }
            if let Some(afternoon) = afternoon {
                session.afternoon_enabled = afternoon;
            }
        }
        let updated = state.sessions[position];

        state.revision += 1;
        let revision = state.revision;
        state.run_log.write(RunLogEvent::new(
            revision,
            RunLogEventKind::SessionToggled,
            Some(sequence_index),
        ));
        let _ = self.events_tx.send(ApiEvent::SessionToggled {
            revision,
            sequence_index,
            morning_enabled: updated.morning_enabled,
            afternoon_enabled: updated.afternoon_enabled,
        });

        Some(updated)
    }

    /// Bulk flag import. A rejected header fails the whole import and leaves
    /// the schedule untouched; accepted rows apply positionally, truncating at
    /// the shorter of rows and sessions.
    pub async fn import_flags(&self, text: &str) -> Result<usize, ImportError> {
        let rows = parse_flag_rows(text)?;
        let mut state = self.inner.lock().await;

        let applied_rows = apply_flag_rows(&mut state.sessions, &rows);
        state.revision += 1;
        let revision = state.revision;
        state
            .run_log
            .write(RunLogEvent::new(revision, RunLogEventKind::FlagsImported, None));
        let _ = self.events_tx.send(ApiEvent::FlagsImported {
            revision,
            applied_rows,
        });

        Ok(applied_rows)
    }

    pub async fn results(&self) -> SimulationResults {
        let mut state = self.inner.lock().await;
        let results = SimulationResults::compute(&state.parameters, &state.sessions);
        let revision = state.revision;
        state
            .run_log
            .write(RunLogEvent::new(revision, RunLogEventKind::ResultsComputed, None));
        results
    }

    pub async fn export_csv(&self, scenario: Scenario) -> io::Result<String> {
        let mut state = self.inner.lock().await;
        let outcome = simulate(scenario, &state.parameters, &state.sessions);
        let csv = render_outcome_csv(&outcome)?;
        let revision = state.revision;
        state
            .run_log
            .write(RunLogEvent::new(revision, RunLogEventKind::OutcomeExported, None));
        Ok(csv)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ApiEvent> {
        self.events_tx.subscribe()
    }
}
