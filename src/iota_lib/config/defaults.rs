use crate::config::{self};

pub const TIME_LIMIT: config::TimeLimit = std::time::Duration::from_secs(12);
