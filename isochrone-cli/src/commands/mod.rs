//! CLI command implementations.

pub mod common;
pub mod compute;
pub mod config;
