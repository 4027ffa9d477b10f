// Prospector application layer: artifact fetching, startup, logging and the
// command handlers behind the `prospector` binary.

pub mod artifacts;
pub mod commands;
pub mod logging;
pub mod startup;
