//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including machine definitions, transition actions, execution status, and error types.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// The blank symbol used on the Turing Machine tape.
pub const BLANK_SYMBOL: char = '_';
/// The default number of steps allowed by the bounded run safety valve.
pub const DEFAULT_MAX_STEPS: usize = 10000;
/// The minimum allowed inter-step playback delay, in milliseconds.
pub const MIN_STEP_DELAY_MS: u64 = 50;
/// The maximum allowed inter-step playback delay, in milliseconds.
pub const MAX_STEP_DELAY_MS: u64 = 1000;

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left (clamped at the left end of the tape).
    Left,
    /// Move the head one position to the right.
    Right,
}

/// The action half of a transition: what to write, where to move, and which
/// state to enter next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The symbol to write at the head position.
    pub write: char,
    /// The direction to move the head after writing.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: String,
}

/// A transition function: for each state, a map from the symbol under the head
/// to the `Action` to perform. A missing entry means the transition is
/// undefined for that (state, symbol) pair.
pub type Transitions = HashMap<String, HashMap<char, Action>>;

/// An immutable description of a deterministic single-tape Turing Machine.
///
/// A definition owns no run state. It is shared, read-only, by every run
/// created from it (typically behind an `Arc`).
#[derive(Debug, Clone, PartialEq)]
pub struct MachineDefinition {
    /// A human-readable name for the machine (the pattern it recognizes).
    pub name: String,
    /// The finite set of states.
    pub states: HashSet<String>,
    /// The symbols an input string is expected to be drawn from.
    pub input_alphabet: HashSet<char>,
    /// The symbols that may appear on the tape, including the blank.
    pub tape_alphabet: HashSet<char>,
    /// The transition function.
    pub transitions: Transitions,
    /// The state the machine starts in.
    pub start_state: String,
    /// States in which the machine halts and accepts.
    pub accepting: HashSet<String>,
    /// States in which the machine halts and rejects.
    pub rejecting: HashSet<String>,
}

impl MachineDefinition {
    /// Looks up the action for a (state, symbol) pair.
    pub fn action(&self, state: &str, symbol: char) -> Option<&Action> {
        self.transitions.get(state).and_then(|row| row.get(&symbol))
    }

    /// Returns `true` if `state` is an accepting or rejecting state.
    pub fn is_terminal(&self, state: &str) -> bool {
        self.accepting.contains(state) || self.rejecting.contains(state)
    }

    /// Returns the total number of transitions in the definition.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(|row| row.len()).sum()
    }
}

/// The observable status of a run.
///
/// `Stuck` is reported when the machine halted on an undefined transition
/// while in a non-accepting, non-rejecting state. This is distinct from
/// `Running` so callers can tell "more steps are possible" apart from
/// "no further step will ever execute".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The machine can (potentially) execute further steps.
    Running,
    /// The machine halted in an accepting state.
    Accepted,
    /// The machine halted in a rejecting state.
    Rejected,
    /// The machine halted on an undefined (state, symbol) pair.
    Stuck,
}

impl Status {
    /// Returns `true` if no further step will execute from this status.
    pub fn is_halted(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// A point-in-time view of a run, captured after initialization and after
/// every successfully executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The full tape contents at capture time.
    pub tape: Vec<char>,
    /// The head position at capture time.
    pub head: usize,
    /// The current state at capture time.
    pub state: String,
    /// The step counter at capture time (0 for the initial snapshot).
    pub step: usize,
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// Indicates that a catalog lookup used a pattern with no registered machine.
    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),
    /// Indicates an error during the validation of a machine definition's structure or logic.
    #[error("Invalid machine definition '{0}': {1}")]
    InvalidDefinition(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_status_is_halted() {
        assert!(!Status::Running.is_halted());
        assert!(Status::Accepted.is_halted());
        assert!(Status::Rejected.is_halted());
        assert!(Status::Stuck.is_halted());
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = Snapshot {
            tape: vec!['a', 'b', BLANK_SYMBOL],
            head: 1,
            state: "q0".to_string(),
            step: 3,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"head\":1"));
        assert!(json.contains("\"state\":\"q0\""));
        assert!(json.contains("\"step\":3"));

        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::UnknownPattern("z*".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unknown pattern"));
        assert!(error_msg.contains("z*"));

        let error = MachineError::InvalidDefinition("0*1*".to_string(), "bad".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("0*1*"));
        assert!(error_msg.contains("bad"));
    }
}
