//! Launch module - command building and launch orchestration
//!
//! This module turns "launch this game" into a platform-correct process
//! invocation and sequences the processes a launch requires.
//!
//! ## Module Structure
//! - `types.rs`: Launcher, errors, constants and the OS identity
//! - `pure/`: Pure functions (path resolution, command building)
//! - `operations/`: Atomic side effects (process spawning, lifecycle relay)
//! - `pipelines/`: High-level orchestration (games, additional apps)

mod operations;
mod pipelines;
mod pure;
mod types;

// Re-export public API
pub use types::{LaunchError, LaunchOpts, Launcher, OsKind};
