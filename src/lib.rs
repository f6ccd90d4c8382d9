//! This crate provides the core logic for a deterministic single-tape Turing Machine
//! simulator. It includes a built-in catalog of machines for common regular-expression
//! patterns, an execution engine with full step-by-step history for replay, eager
//! validation of machine definitions, and a cancelable timed playback mode for front ends.

pub mod analyzer;
pub mod catalog;
pub mod machine;
pub mod playback;
pub mod types;

/// Re-exports the `validate` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{validate, AnalysisError};
/// Re-exports the catalog lookup functions and the default pattern name.
pub use catalog::{lookup, lookup_or_default, pattern_names, DEFAULT_PATTERN};
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the `Playback` handle from the playback module.
pub use playback::Playback;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Action, Direction, MachineDefinition, MachineError, Snapshot, Status, BLANK_SYMBOL,
    DEFAULT_MAX_STEPS,
};
