//! Tick loop that drives a [`TimerState`].
//!
//! [`TimerRunner::run`] owns the timer, advances it once per second while it
//! is running, and applies [`TimerCommand`]s as they arrive. When a phase
//! completes, the session is handed to a [`SessionReporter`] on a spawned
//! task so the clock never waits on the network; the outcome comes back as a
//! [`TimerEvent`]. On shutdown the runner waits up to [`REPORT_GRACE`] for
//! reports still in flight before abandoning them.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use focusflow_core::session::{NewSession, Session, SessionKind};
use focusflow_core::timer::{CompletedInterval, TimerState};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio::time::{Interval, MissedTickBehavior};

use crate::client::{ApiClient, ClientError};

/// One timer step.
pub const TICK: Duration = Duration::from_secs(1);

/// How long shutdown waits for in-flight reports. Matches the client's
/// per-request timeout, so an HTTP report always settles within it.
pub const REPORT_GRACE: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// SessionReporter
// ---------------------------------------------------------------------------

/// Destination for completed sessions.
pub trait SessionReporter: Send + Sync + 'static {
    /// Persist `session`, returning the stored record.
    fn report(
        &self,
        session: NewSession,
    ) -> impl Future<Output = Result<Session, ClientError>> + Send;
}

impl SessionReporter for ApiClient {
    async fn report(&self, session: NewSession) -> Result<Session, ClientError> {
        self.create_session(&session).await
    }
}

// ---------------------------------------------------------------------------
// Commands and events
// ---------------------------------------------------------------------------

/// Instructions accepted by a running [`TimerRunner`].
#[derive(Debug)]
pub enum TimerCommand {
    Start,
    Pause,
    Toggle,
    Reset,
    Configure {
        work_seconds: u32,
        break_seconds: u32,
    },
    /// Reply with a copy of the current state.
    Snapshot(oneshot::Sender<TimerState>),
    Shutdown,
}

/// What the runner reports back to its owner.
#[derive(Debug)]
pub enum TimerEvent {
    /// A phase ran out. Sent before the session is dispatched.
    PhaseCompleted(CompletedInterval),
    /// The reporter stored the session.
    Reported(Session),
    /// The reporter failed; the session is dropped.
    ReportFailed {
        kind: SessionKind,
        error: ClientError,
    },
}

enum Wake {
    Tick,
    Command(Option<TimerCommand>),
}

// ---------------------------------------------------------------------------
// TimerRunner
// ---------------------------------------------------------------------------

pub struct TimerRunner<R> {
    state: TimerState,
    reporter: Arc<R>,
    events: mpsc::UnboundedSender<TimerEvent>,
    reports: JoinSet<()>,
}

impl<R: SessionReporter> TimerRunner<R> {
    pub fn new(
        state: TimerState,
        reporter: Arc<R>,
        events: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            state,
            reporter,
            events,
            reports: JoinSet::new(),
        }
    }

    /// Run until [`TimerCommand::Shutdown`] arrives or every command sender
    /// is dropped, then return the final state.
    ///
    /// Reports already in flight are awaited for up to [`REPORT_GRACE`]
    /// first; their events are still sent.
    pub async fn run(mut self, mut commands: mpsc::Receiver<TimerCommand>) -> TimerState {
        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval completes immediately.
        ticker.tick().await;

        loop {
            let wake = tokio::select! {
                _ = ticker.tick(), if self.state.is_running() => Wake::Tick,
                cmd = commands.recv() => Wake::Command(cmd),
            };

            match wake {
                Wake::Tick => self.on_tick(),
                Wake::Command(None) | Wake::Command(Some(TimerCommand::Shutdown)) => break,
                Wake::Command(Some(cmd)) => self.apply(cmd, &mut ticker),
            }
        }

        self.drain_reports().await;
        tracing::debug!("Timer runner stopped");
        self.state
    }

    async fn drain_reports(&mut self) {
        if self.reports.is_empty() {
            return;
        }
        tracing::info!(pending = self.reports.len(), "Waiting for in-flight reports");

        let drain = async {
            while self.reports.join_next().await.is_some() {}
        };
        if tokio::time::timeout(REPORT_GRACE, drain).await.is_err() {
            tracing::warn!(
                pending = self.reports.len(),
                "Abandoning reports still in flight"
            );
        }
    }

    fn apply(&mut self, command: TimerCommand, ticker: &mut Interval) {
        match command {
            TimerCommand::Start => {
                if self.state.start() {
                    // Count a full second from now, not from the last tick.
                    ticker.reset();
                    tracing::debug!(phase = %self.state.phase(), "Timer started");
                }
            }
            TimerCommand::Pause => {
                if self.state.pause() {
                    tracing::debug!(remaining = self.state.remaining_seconds(), "Timer paused");
                }
            }
            TimerCommand::Toggle => {
                if self.state.toggle() {
                    ticker.reset();
                }
            }
            TimerCommand::Reset => self.state.reset(),
            TimerCommand::Configure {
                work_seconds,
                break_seconds,
            } => {
                self.state.configure(work_seconds, break_seconds);
                tracing::debug!(
                    work_seconds = self.state.work_seconds(),
                    break_seconds = self.state.break_seconds(),
                    "Timer configured"
                );
            }
            TimerCommand::Snapshot(reply) => {
                let _ = reply.send(self.state.clone());
            }
            TimerCommand::Shutdown => {}
        }
    }

    fn on_tick(&mut self) {
        let Some(done) = self.state.tick(Utc::now()) else {
            return;
        };

        tracing::info!(kind = %done.kind, duration = done.duration_secs, "Phase completed");
        let _ = self.events.send(TimerEvent::PhaseCompleted(done));
        self.dispatch(done.into_new_session());
    }

    /// Hand `session` to the reporter without waiting for it.
    fn dispatch(&mut self, session: NewSession) {
        // Reap finished reports so the set only holds live ones.
        while self.reports.try_join_next().is_some() {}

        let reporter = Arc::clone(&self.reporter);
        let events = self.events.clone();

        self.reports.spawn(async move {
            let kind = session.kind;
            let event = match reporter.report(session).await {
                Ok(stored) => {
                    tracing::debug!(id = %stored.id, %kind, "Session reported");
                    TimerEvent::Reported(stored)
                }
                Err(error) => {
                    tracing::warn!(%kind, error = %error, "Failed to report session");
                    TimerEvent::ReportFailed { kind, error }
                }
            };
            let _ = events.send(event);
        });
    }
}
