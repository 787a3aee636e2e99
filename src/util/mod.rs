//! Utilities: timing, process CPU time, host introspection, unit formatting

pub mod host;
pub mod resource;
pub mod time;
pub mod units;
