//! Fibonacci Benchmark Library
//!
//! Times an external Fibonacci executable against an in-process naive
//! recursive implementation, reports descriptive statistics and renders
//! comparison charts.

pub mod core;
pub mod error;
pub mod stats;
pub mod ui;
pub mod utils;

pub use core::run_benchmark;
pub use error::{BenchError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
