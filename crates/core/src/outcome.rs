//! Task outcome reported back to the origin app.

use std::fmt;
use std::str::FromStr;

/// Outcome of a completed micro-task, as reported by the host UI.
///
/// The wire strings are part of the redirect contract with the origin app
/// and are mapped explicitly rather than derived from the variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The user will go on to open the previously blocked app.
    Opened,
    /// The user declined access and stays focused.
    StayedFocused,
    /// The user aborted the task without a decision.
    Cancelled,
}

impl TaskOutcome {
    /// String form carried in the `status` query parameter of the
    /// completion signal.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            TaskOutcome::Opened => "open",
            TaskOutcome::StayedFocused => "focus",
            TaskOutcome::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for TaskOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TaskOutcome::Opened),
            "focus" => Ok(TaskOutcome::StayedFocused),
            "cancelled" => Ok(TaskOutcome::Cancelled),
            other => Err(format!("unknown task outcome: {other}")),
        }
    }
}
