//! The search driver.
//!
//! Rules are tried in priority order; the first one to fire wins and the
//! scan restarts from the top, so clash checking always precedes expansion.
//! A clash closes the current branch and pops an alternative, exhaustion of
//! the alternatives concludes unsatisfiability, and a fully saturated branch
//! concludes satisfiability. The wall clock is polled between passes.

use crate::context::{Context, SearchStatus};
use crate::io::window::WindowItem;
use crate::rules::{RuleOutcome, RULE_SEQUENCE};

use super::reports::Report;

#[derive(Debug, Clone, Copy)]
pub enum StepInfo {
    /// No rule applies on the current branch.
    Saturated,
    /// A clash closed the last open branch.
    AllBranchesClosed,
}

impl Context {
    pub fn solve(&mut self) -> Report {
        let the_start = std::time::Instant::now();

        loop {
            self.counters.time = the_start.elapsed();
            if self.counters.time > self.config.time_limit {
                self.status = SearchStatus::TimedOut;
                log::debug!(target: crate::log::targets::SEARCH,
                    "time limit reached after {} rule applications", self.counters.rules_applied);
                break;
            }

            match self.step() {
                Ok(()) => continue,
                Err(_) => break,
            }
        }

        if let Some(window) = &self.window {
            window.update_item(WindowItem::RulesApplied, self.counters.rules_applied);
            window.update_item(WindowItem::ClosedBranches, self.counters.closed_branches);
            window.update_item(WindowItem::OpenBranches, self.alternatives.len());
            window.update_item(WindowItem::Time, format!("{:.2?}", self.counters.time));
            window.flush();
        }

        self.report()
    }

    /// Apply the highest priority applicable rule once.
    pub fn step(&mut self) -> Result<(), StepInfo> {
        for (name, rule) in RULE_SEQUENCE {
            match rule(&mut self.interpretation) {
                RuleOutcome::Clash => {
                    self.counters.closed_branches += 1;
                    self.counters.rules_applied += 1;
                    if let Some(window) = &self.window {
                        window.update_item(WindowItem::ClosedBranches, self.counters.closed_branches);
                        window.update_item(WindowItem::OpenBranches, self.alternatives.len());
                        window.flush();
                    }
                    match self.alternatives.pop() {
                        Some(next) => {
                            log::debug!(target: crate::log::targets::SEARCH,
                                "branch closed, {} left", self.alternatives.len() + 1);
                            self.interpretation = next;
                            return Ok(());
                        }
                        None => {
                            log::debug!(target: crate::log::targets::SEARCH, "all branches closed");
                            self.status = SearchStatus::Closed;
                            return Err(StepInfo::AllBranchesClosed);
                        }
                    }
                }
                RuleOutcome::Applied(forks) => {
                    self.counters.rules_applied += 1;
                    self.alternatives.extend(forks);
                    log::trace!(target: crate::log::targets::SEARCH, "{name} applied");
                    return Ok(());
                }
                RuleOutcome::NotApplied => continue,
            }
        }

        self.status = SearchStatus::Saturated;
        log::debug!(target: crate::log::targets::SEARCH, "saturated");
        Err(StepInfo::Saturated)
    }
}
