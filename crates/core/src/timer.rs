//! Work/break countdown state machine.
//!
//! The whole timer is the [`TimerState`] value; every transition is a method
//! on it and nothing lives at module level, so any number of independent
//! timers can run side by side. Time never advances on its own: the driver
//! calls [`TimerState::tick`] once per second while the timer is running.

use crate::session::{NewSession, SessionKind};
use crate::types::{RecordDate, Timestamp};

/// Default work phase length (25 minutes).
pub const DEFAULT_WORK_SECONDS: u32 = 25 * 60;

/// Default break phase length (5 minutes).
pub const DEFAULT_BREAK_SECONDS: u32 = 5 * 60;

/// Shortest phase the timer accepts.
pub const MIN_PHASE_SECONDS: u32 = 1;

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

/// Parse a user-supplied phase length. Anything that is not an unsigned
/// integer counts as `0`; clamping happens in [`TimerState::configure`].
pub fn parse_duration_input(input: &str) -> u32 {
    input.trim().parse().unwrap_or(0)
}

fn clamp_phase(seconds: u32) -> u32 {
    seconds.max(MIN_PHASE_SECONDS)
}

/// Render seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// ---------------------------------------------------------------------------
// CompletedInterval
// ---------------------------------------------------------------------------

/// Emitted by [`TimerState::tick`] exactly once when a phase runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedInterval {
    /// The phase that just finished.
    pub kind: SessionKind,
    /// Configured length of that phase, in seconds.
    pub duration_secs: u32,
    pub completed_at: Timestamp,
}

impl CompletedInterval {
    /// Build the session record to persist for this interval.
    pub fn into_new_session(self) -> NewSession {
        NewSession {
            kind: self.kind,
            duration: self.duration_secs,
            date: RecordDate::from(self.completed_at),
            notes: Some(self.kind.default_note().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// TimerState
// ---------------------------------------------------------------------------

/// Complete state of one timer.
///
/// `Idle` and `Paused` are both `is_running == false`; they differ only in
/// whether `remaining_seconds` is below the phase length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    phase: SessionKind,
    remaining_seconds: u32,
    is_running: bool,
    work_seconds: u32,
    break_seconds: u32,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_SECONDS, DEFAULT_BREAK_SECONDS)
    }
}

impl TimerState {
    /// Idle timer at the start of a work phase. Lengths are clamped to
    /// [`MIN_PHASE_SECONDS`].
    pub fn new(work_seconds: u32, break_seconds: u32) -> Self {
        let work_seconds = clamp_phase(work_seconds);
        Self {
            phase: SessionKind::Work,
            remaining_seconds: work_seconds,
            is_running: false,
            work_seconds,
            break_seconds: clamp_phase(break_seconds),
        }
    }

    pub fn phase(&self) -> SessionKind {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn work_seconds(&self) -> u32 {
        self.work_seconds
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_seconds
    }

    /// Configured length of `phase`.
    pub fn phase_length(&self, phase: SessionKind) -> u32 {
        match phase {
            SessionKind::Work => self.work_seconds,
            SessionKind::Break => self.break_seconds,
        }
    }

    /// Fraction of the current phase still to run, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        let length = self.phase_length(self.phase);
        (f64::from(self.remaining_seconds) / f64::from(length)).clamp(0.0, 1.0)
    }

    /// True when stopped partway through a phase.
    pub fn is_paused(&self) -> bool {
        !self.is_running && self.remaining_seconds < self.phase_length(self.phase)
    }

    /// Idle/Paused -> Running. Returns `false` if it was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        self.is_running = true;
        true
    }

    /// Running -> Paused, keeping the remaining time. Returns `false` if it
    /// was not running.
    pub fn pause(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;
        true
    }

    /// Start if stopped, pause if running. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        if !self.start() {
            self.pause();
        }
        self.is_running
    }

    /// Stop the clock and rewind the current phase to its full length.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining_seconds = self.phase_length(self.phase);
    }

    /// Replace both phase lengths. The remaining time follows immediately
    /// unless the timer is running, in which case the new lengths apply from
    /// the next phase (or the next reset).
    pub fn configure(&mut self, work_seconds: u32, break_seconds: u32) {
        self.work_seconds = clamp_phase(work_seconds);
        self.break_seconds = clamp_phase(break_seconds);
        if !self.is_running {
            self.remaining_seconds = self.phase_length(self.phase);
        }
    }

    /// Advance one second.
    ///
    /// At the one-second-remaining boundary the current phase completes: the
    /// interval is returned, the phase flips, the remaining time rewinds to
    /// the new phase's length, and the clock stops. Ticks while stopped do
    /// nothing.
    pub fn tick(&mut self, now: Timestamp) -> Option<CompletedInterval> {
        if !self.is_running {
            return None;
        }

        if self.remaining_seconds > 1 {
            self.remaining_seconds -= 1;
            return None;
        }

        let finished = self.phase;
        let completed = CompletedInterval {
            kind: finished,
            duration_secs: self.phase_length(finished),
            completed_at: now,
        };

        self.phase = finished.opposite();
        self.remaining_seconds = self.phase_length(self.phase);
        self.is_running = false;

        Some(completed)
    }
}
