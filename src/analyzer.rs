//! This module provides functions for validating machine definitions before any run is
//! created from them. The catalog tables are hand-authored, so defects like a transition
//! pointing at an unknown state would otherwise only surface as silent mis-transitions
//! at run time.

use crate::types::{MachineDefinition, MachineError, BLANK_SYMBOL};
use std::collections::HashSet;

/// Represents various errors that can be found during validation of a machine definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Indicates that the start state is not a member of the state set.
    InvalidStartState(String),
    /// Indicates states that appear in both the accepting and rejecting sets.
    AmbiguousTerminalStates(Vec<String>),
    /// Indicates that transitions are keyed by, or point to, states outside the state set.
    UnknownStates(Vec<String>),
    /// Indicates that transitions read or write symbols outside the tape alphabet.
    UnknownSymbols(Vec<char>),
    /// Indicates states that cannot be reached from the start state.
    UnreachableStates(Vec<String>),
}

impl AnalysisError {
    /// Converts the error into a `MachineError::InvalidDefinition` for the named definition.
    pub fn into_machine_error(self, name: &str) -> MachineError {
        let message = match self {
            AnalysisError::InvalidStartState(state) => {
                format!("start state '{}' is not in the state set", state)
            }
            AnalysisError::AmbiguousTerminalStates(states) => {
                format!("states are both accepting and rejecting: {:?}", states)
            }
            AnalysisError::UnknownStates(states) => {
                format!("transitions reference unknown states: {:?}", states)
            }
            AnalysisError::UnknownSymbols(symbols) => {
                format!(
                    "transitions use symbols outside the tape alphabet: {:?}",
                    symbols
                )
            }
            AnalysisError::UnreachableStates(states) => {
                format!("unreachable states detected: {:?}", states)
            }
        };

        MachineError::InvalidDefinition(name.to_string(), message)
    }
}

/// Validates a machine definition for structural and logical errors.
///
/// Runs every check and reports the first failure, converted into a
/// [`MachineError::InvalidDefinition`] carrying the definition's name.
pub fn validate(definition: &MachineDefinition) -> Result<(), MachineError> {
    [
        check_start_state,
        check_terminal_states,
        check_transition_states,
        check_transition_symbols,
        check_unreachable_states,
    ]
    .iter()
    .find_map(|check| check(definition).err())
    .map_or(Ok(()), |error| {
        Err(error.into_machine_error(&definition.name))
    })
}

/// Checks that the start state belongs to the state set.
fn check_start_state(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    if !definition.states.contains(&definition.start_state) {
        return Err(AnalysisError::InvalidStartState(
            definition.start_state.clone(),
        ));
    }

    Ok(())
}

/// Checks that no state is both accepting and rejecting, and that both sets
/// are subsets of the state set.
fn check_terminal_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut ambiguous: Vec<String> = definition
        .accepting
        .intersection(&definition.rejecting)
        .cloned()
        .collect();

    if !ambiguous.is_empty() {
        ambiguous.sort();
        return Err(AnalysisError::AmbiguousTerminalStates(ambiguous));
    }

    let mut unknown: Vec<String> = definition
        .accepting
        .union(&definition.rejecting)
        .filter(|state| !definition.states.contains(*state))
        .cloned()
        .collect();

    if !unknown.is_empty() {
        unknown.sort();
        return Err(AnalysisError::UnknownStates(unknown));
    }

    Ok(())
}

/// Checks that every transition's source state and next state belong to the state set.
fn check_transition_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut unknown = HashSet::new();

    for (state, row) in &definition.transitions {
        if !definition.states.contains(state) {
            unknown.insert(state.clone());
        }
        for action in row.values() {
            if !definition.states.contains(&action.next_state) {
                unknown.insert(action.next_state.clone());
            }
        }
    }

    if !unknown.is_empty() {
        let mut unknown: Vec<String> = unknown.into_iter().collect();
        unknown.sort();
        return Err(AnalysisError::UnknownStates(unknown));
    }

    Ok(())
}

/// Checks that the blank and every symbol read or written by a transition
/// belong to the tape alphabet.
fn check_transition_symbols(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut unknown = HashSet::new();

    if !definition.tape_alphabet.contains(&BLANK_SYMBOL) {
        unknown.insert(BLANK_SYMBOL);
    }

    for row in definition.transitions.values() {
        for (&read, action) in row {
            if !definition.tape_alphabet.contains(&read) {
                unknown.insert(read);
            }
            if !definition.tape_alphabet.contains(&action.write) {
                unknown.insert(action.write);
            }
        }
    }

    if !unknown.is_empty() {
        let mut unknown: Vec<char> = unknown.into_iter().collect();
        unknown.sort();
        return Err(AnalysisError::UnknownSymbols(unknown));
    }

    Ok(())
}

/// Checks for unreachable states by a traversal from the start state.
///
/// Every state in the state set must be reachable through some sequence of
/// transitions, otherwise the table carries dead entries.
fn check_unreachable_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut visited = HashSet::new();
    let mut queue = vec![definition.start_state.clone()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state.clone()) {
            continue;
        }

        if let Some(row) = definition.transitions.get(&state) {
            for action in row.values() {
                if !visited.contains(&action.next_state) {
                    queue.push(action.next_state.clone());
                }
            }
        }
    }

    let mut unreachable: Vec<String> = definition
        .states
        .difference(&visited)
        .cloned()
        .collect();

    if !unreachable.is_empty() {
        unreachable.sort(); // Sort for deterministic output
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Direction, Transitions, BLANK_SYMBOL};
    use std::collections::HashMap;

    fn create_test_definition() -> MachineDefinition {
        let mut transitions: Transitions = HashMap::new();
        transitions.insert(
            "q0".to_string(),
            HashMap::from([
                (
                    'a',
                    Action {
                        write: 'X',
                        direction: Direction::Right,
                        next_state: "accept".to_string(),
                    },
                ),
                (
                    'b',
                    Action {
                        write: 'X',
                        direction: Direction::Right,
                        next_state: "reject".to_string(),
                    },
                ),
            ]),
        );

        MachineDefinition {
            name: "test".to_string(),
            states: ["q0", "accept", "reject"].map(String::from).into(),
            input_alphabet: HashSet::from(['a', 'b']),
            tape_alphabet: HashSet::from(['a', 'b', 'X', BLANK_SYMBOL]),
            transitions,
            start_state: "q0".to_string(),
            accepting: HashSet::from(["accept".to_string()]),
            rejecting: HashSet::from(["reject".to_string()]),
        }
    }

    #[test]
    fn test_valid_definition() {
        let definition = create_test_definition();
        assert!(validate(&definition).is_ok());
    }

    #[test]
    fn test_invalid_start_state() {
        let mut definition = create_test_definition();
        definition.start_state = "missing".to_string();

        let result = check_start_state(&definition);
        assert_eq!(
            result,
            Err(AnalysisError::InvalidStartState("missing".to_string()))
        );
    }

    #[test]
    fn test_ambiguous_terminal_states() {
        let mut definition = create_test_definition();
        definition.rejecting.insert("accept".to_string());

        let result = check_terminal_states(&definition);
        assert_eq!(
            result,
            Err(AnalysisError::AmbiguousTerminalStates(vec![
                "accept".to_string()
            ]))
        );
    }

    #[test]
    fn test_terminal_state_outside_state_set() {
        let mut definition = create_test_definition();
        definition.accepting.insert("ghost".to_string());

        let result = check_terminal_states(&definition);
        assert_eq!(
            result,
            Err(AnalysisError::UnknownStates(vec!["ghost".to_string()]))
        );
    }

    #[test]
    fn test_transition_to_unknown_state() {
        let mut definition = create_test_definition();
        definition
            .transitions
            .get_mut("q0")
            .unwrap()
            .get_mut(&'a')
            .unwrap()
            .next_state = "nowhere".to_string();

        let result = check_transition_states(&definition);
        assert_eq!(
            result,
            Err(AnalysisError::UnknownStates(vec!["nowhere".to_string()]))
        );
    }

    #[test]
    fn test_transition_symbol_outside_alphabet() {
        let mut definition = create_test_definition();
        definition
            .transitions
            .get_mut("q0")
            .unwrap()
            .get_mut(&'a')
            .unwrap()
            .write = '!';

        let result = check_transition_symbols(&definition);
        assert_eq!(result, Err(AnalysisError::UnknownSymbols(vec!['!'])));
    }

    #[test]
    fn test_blank_missing_from_tape_alphabet() {
        let mut definition = create_test_definition();
        definition.tape_alphabet.remove(&BLANK_SYMBOL);

        let result = check_transition_symbols(&definition);
        assert_eq!(result, Err(AnalysisError::UnknownSymbols(vec![BLANK_SYMBOL])));
    }

    #[test]
    fn test_unreachable_states() {
        let mut definition = create_test_definition();
        definition.states.insert("orphan".to_string());

        let result = check_unreachable_states(&definition);
        assert_eq!(
            result,
            Err(AnalysisError::UnreachableStates(vec!["orphan".to_string()]))
        );
    }

    #[test]
    fn test_validate_reports_named_error() {
        let mut definition = create_test_definition();
        definition.start_state = "missing".to_string();

        let result = validate(&definition);
        match result {
            Err(MachineError::InvalidDefinition(name, message)) => {
                assert_eq!(name, "test");
                assert!(message.contains("missing"));
            }
            other => panic!("Expected InvalidDefinition, got {:?}", other),
        }
    }
}
