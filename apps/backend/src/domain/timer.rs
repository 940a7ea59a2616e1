//! Countdown timer state machine.
//!
//! ```text
//! idle --start--> running <--pause/resume--> paused
//!                    |
//!                  tick (to 0)
//!                    v
//!                 finished
//! ```
//! `stop` returns any phase to idle; `reset` restores the initial duration
//! and parks the timer in `paused`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::{ActionError, ActionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// User-facing timer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerOp {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
}

impl fmt::Display for TimerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimerOp::Start => "start",
            TimerOp::Pause => "pause",
            TimerOp::Resume => "resume",
            TimerOp::Stop => "stop",
            TimerOp::Reset => "reset",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TimerOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(TimerOp::Start),
            "pause" => Ok(TimerOp::Pause),
            "resume" => Ok(TimerOp::Resume),
            "stop" => Ok(TimerOp::Stop),
            "reset" => Ok(TimerOp::Reset),
            other => Err(format!("unknown timer operation '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub phase: TimerPhase,
    pub remaining_seconds: Option<u32>,
    pub initial_seconds: Option<u32>,
}

impl Timer {
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn start(&mut self, duration_seconds: u32) -> Result<(), ActionError> {
        if duration_seconds == 0 {
            return Err(ActionError::InvalidActionValue {
                action: ActionKind::Timer,
            });
        }
        self.expect_phase(TimerOp::Start, TimerPhase::Idle)?;
        self.initial_seconds = Some(duration_seconds);
        self.remaining_seconds = Some(duration_seconds);
        self.phase = TimerPhase::Running;
        Ok(())
    }

    /// One elapsed second. Ignored unless running.
    ///
    /// Returns whether the tick was applied.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        let left = self.remaining_seconds.unwrap_or(0).saturating_sub(1);
        self.remaining_seconds = Some(left);
        if left == 0 {
            self.phase = TimerPhase::Finished;
        }
        true
    }

    pub fn pause(&mut self) -> Result<(), ActionError> {
        self.expect_phase(TimerOp::Pause, TimerPhase::Running)?;
        self.phase = TimerPhase::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), ActionError> {
        self.expect_phase(TimerOp::Resume, TimerPhase::Paused)?;
        self.phase = TimerPhase::Running;
        Ok(())
    }

    /// Back to idle from anywhere. The initial duration is kept so a later
    /// `reset` still works.
    pub fn stop(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = None;
    }

    pub fn reset(&mut self) -> Result<(), ActionError> {
        let Some(initial) = self.initial_seconds else {
            return Err(ActionError::InvalidTransition {
                op: TimerOp::Reset,
                from: self.phase,
            });
        };
        self.remaining_seconds = Some(initial);
        self.phase = TimerPhase::Paused;
        Ok(())
    }

    fn expect_phase(&self, op: TimerOp, phase: TimerPhase) -> Result<(), ActionError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(ActionError::InvalidTransition {
                op,
                from: self.phase,
            })
        }
    }
}
