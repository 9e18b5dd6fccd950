//! The tableau context: one current interpretation, the stack of untried
//! alternatives, counters and configuration.

pub mod builder;
pub mod reports;
pub mod solve;

use std::time::Duration;

use crate::config::Config;
use crate::io::window::SearchWindow;
use crate::structures::interpretation::Interpretation;

pub struct Context {
    /// The branch currently being expanded.
    interpretation: Interpretation,
    /// The input as built, before any rule fired.
    initial_interpretation: Interpretation,
    /// Untried branches, most recently forked on top.
    alternatives: Vec<Interpretation>,
    pub counters: SearchCounters,
    config: Config,
    pub status: SearchStatus,
    window: Option<SearchWindow>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchCounters {
    /// Incremented for every applied rule and for every clash.
    pub rules_applied: usize,
    /// Branches closed on a clash.
    pub closed_branches: usize,
    pub time: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Initialised,
    /// No rule applies on the current branch. The input is satisfiable.
    Saturated,
    /// Every branch closed on a clash. The input is unsatisfiable.
    Closed,
    /// The wall clock ran out first.
    TimedOut,
}

impl Context {
    pub fn interpretation(&self) -> &Interpretation {
        &self.interpretation
    }

    /// The interpretation as it stood before the search, for inspection.
    pub fn initial_interpretation(&self) -> &Interpretation {
        &self.initial_interpretation
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn open_branches(&self) -> usize {
        self.alternatives.len()
    }
}
