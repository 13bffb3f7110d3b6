//! Run state for the simulation
//!
//! An explicit state machine for the run lifecycle; any control text is
//! derived from the state, never stored alongside it.

use std::fmt;

/// Lifecycle state of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Lanes may be edited; no tick has run since the last reset or restore
    NotStarted,
    /// Ticks advance the simulation
    Running,
    /// Ticks are ignored; positions and snapshot are untouched
    Paused,
    /// Terminal: a lane finished or a collision occurred
    Stopped,
}

impl RunState {
    /// Text for the run control in this state.
    pub fn control_label(&self) -> &'static str {
        match self {
            RunState::NotStarted => "Start",
            RunState::Running => "Pause",
            RunState::Paused => "Resume",
            RunState::Stopped => "Back to start",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RunState::NotStarted => "not started",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Stopped => "stopped",
        };
        f.write_str(text)
    }
}
