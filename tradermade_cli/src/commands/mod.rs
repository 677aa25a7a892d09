//! CLI subcommand implementations.

pub mod export;
pub mod historical;
pub mod live;
