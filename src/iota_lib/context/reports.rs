use serde::Serialize;

use crate::context::{Context, SearchCounters, SearchStatus};

/// The outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Report {
    Satisfiable,
    Unsatisfiable,
    /// The time limit ran out before the tableau settled.
    Unknown,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl Context {
    pub fn report(&self) -> Report {
        match self.status {
            SearchStatus::Saturated => Report::Satisfiable,
            SearchStatus::Closed => Report::Unsatisfiable,
            SearchStatus::Initialised | SearchStatus::TimedOut => Report::Unknown,
        }
    }

    pub fn timed_out(&self) -> bool {
        self.status == SearchStatus::TimedOut
    }

    pub fn counters(&self) -> SearchCounters {
        self.counters
    }

    /// The classic result tuple: timed out, satisfiable (when known),
    /// branches closed, rules applied.
    pub fn verdict(&self) -> (bool, Option<bool>, usize, usize) {
        let satisfiable = match self.report() {
            Report::Satisfiable => Some(true),
            Report::Unsatisfiable => Some(false),
            Report::Unknown => None,
        };
        (
            self.timed_out(),
            satisfiable,
            self.counters.closed_branches,
            self.counters.rules_applied,
        )
    }
}
