//! CLI commands

pub mod relocate;
pub mod servers;
