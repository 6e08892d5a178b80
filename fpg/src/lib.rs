use std::sync::LazyLock;
use std::time::Instant;

/// Configuration of the floor plan generator
pub mod config;

/// Typed failures of a planning run
pub mod error;

/// CLI, logging, reading briefings and writing plans
pub mod io;

/// Capacity check, sizing, placement and orchestration of a planning run
pub mod opt;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
