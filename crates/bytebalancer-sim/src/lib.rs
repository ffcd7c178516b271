//! Simulation toolkit for the WRR scheduler.
//!
//! Provides TOML scenario configuration, sample allocation backends
//! (fixed resource-block budget, lossy channel), and a slot-loop runner
//! that drives the scheduler across simulated TTIs and reports per-slot
//! grant decisions.

pub mod alloc;
pub mod runner;
pub mod scenario;
