pub mod defaults;

pub type TimeLimit = std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Print every individual with its concepts and every edge after a solve.
    pub show_model: bool,
    /// Display live counters while the search runs.
    pub show_stats: bool,
    /// Wall-clock limit for a solve, polled between rule applications.
    pub time_limit: TimeLimit,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            show_model: false,
            show_stats: false,
            time_limit: defaults::TIME_LIMIT,
        }
    }
}
