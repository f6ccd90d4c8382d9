//! This module provides the built-in catalog of ready-made machine definitions, one per
//! supported regular-expression pattern. The machines are hand-authored transition tables
//! carried as data, not derived by a regex compiler; a single builder expands each table
//! into a validated [`MachineDefinition`].

use crate::analyzer;
use crate::types::{
    Action, Direction, MachineDefinition, MachineError, Transitions, BLANK_SYMBOL,
};

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use Direction::{Left, Right};

/// The pattern that [`lookup_or_default`] falls back to.
pub const DEFAULT_PATTERN: &str = "(a|b)*abb";

/// One row of a transition table: (state, read, write, direction, next state).
type Rule = (&'static str, char, char, Direction, &'static str);

/// A declarative machine description. The state set and tape alphabet are
/// derived from the rules, so a table only spells out what varies per pattern.
struct PatternTable {
    name: &'static str,
    input_alphabet: &'static str,
    start: &'static str,
    accepting: &'static [&'static str],
    rejecting: &'static [&'static str],
    rules: &'static [Rule],
}

impl PatternTable {
    /// Expands the table into a full `MachineDefinition` and validates it.
    fn build(&self) -> Result<MachineDefinition, MachineError> {
        let mut states: HashSet<String> = HashSet::new();
        states.insert(self.start.to_string());
        states.extend(self.accepting.iter().map(|s| s.to_string()));
        states.extend(self.rejecting.iter().map(|s| s.to_string()));

        let mut tape_alphabet: HashSet<char> = self.input_alphabet.chars().collect();
        tape_alphabet.insert(BLANK_SYMBOL);

        let mut transitions: Transitions = HashMap::new();
        for &(state, read, write, direction, next_state) in self.rules {
            states.insert(state.to_string());
            states.insert(next_state.to_string());
            tape_alphabet.insert(read);
            tape_alphabet.insert(write);

            let row = transitions.entry(state.to_string()).or_default();
            if row
                .insert(
                    read,
                    Action {
                        write,
                        direction,
                        next_state: next_state.to_string(),
                    },
                )
                .is_some()
            {
                return Err(MachineError::InvalidDefinition(
                    self.name.to_string(),
                    format!("duplicate rule for state '{}' and symbol {:?}", state, read),
                ));
            }
        }

        let definition = MachineDefinition {
            name: self.name.to_string(),
            states,
            input_alphabet: self.input_alphabet.chars().collect(),
            tape_alphabet,
            transitions,
            start_state: self.start.to_string(),
            accepting: self.accepting.iter().map(|s| s.to_string()).collect(),
            rejecting: self.rejecting.iter().map(|s| s.to_string()).collect(),
        };

        analyzer::validate(&definition)?;
        Ok(definition)
    }
}

const TABLES: &[PatternTable] = &[
    PatternTable {
        name: "(a|b)*abb",
        input_alphabet: "ab",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", 'a', 'X', Right, "q1"),
            ("q0", 'b', 'X', Right, "q0"),
            ("q0", '_', '_', Right, "reject"),
            ("q1", 'a', 'X', Right, "q1"),
            ("q1", 'b', 'X', Right, "q2"),
            ("q2", 'a', 'X', Right, "q1"),
            ("q2", 'b', 'X', Right, "q3"),
            ("q3", 'a', 'X', Right, "q1"),
            ("q3", 'b', 'X', Right, "q0"),
            ("q3", '_', '_', Right, "accept"),
        ],
    },
    PatternTable {
        name: "0*1*",
        input_alphabet: "01",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", '0', 'X', Right, "q0"),
            ("q0", '1', 'X', Right, "q1"),
            ("q0", '_', '_', Right, "accept"),
            ("q1", '1', 'X', Right, "q1"),
            ("q1", '0', 'X', Right, "reject"),
            ("q1", '_', '_', Right, "accept"),
        ],
    },
    PatternTable {
        name: "(ab)*",
        input_alphabet: "ab",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", 'a', 'X', Right, "q1"),
            ("q0", 'b', 'X', Right, "reject"),
            ("q0", '_', '_', Right, "accept"),
            ("q1", 'b', 'X', Right, "q0"),
            ("q1", 'a', 'X', Right, "reject"),
            ("q1", '_', '_', Right, "reject"),
        ],
    },
    // Matches 1(01)*0, i.e. the strings (10)+. The end-of-input check happens
    // in q2 on the blank; q1 on the blank is deliberately left undefined, so
    // an input ending mid-pair (like "1") halts stuck.
    PatternTable {
        name: "1(01)*0",
        input_alphabet: "01",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", '1', 'X', Right, "q1"),
            ("q0", '0', 'X', Right, "reject"),
            ("q1", '0', 'X', Right, "q2"),
            ("q1", '1', 'X', Right, "reject"),
            ("q2", '1', 'X', Right, "q1"),
            ("q2", '0', 'X', Right, "reject"),
            ("q2", '_', '_', Right, "accept"),
        ],
    },
    PatternTable {
        name: "(a+b)*a(a+b)*",
        input_alphabet: "ab",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", 'a', 'X', Right, "q1"),
            ("q0", 'b', 'X', Right, "q0"),
            ("q0", '_', '_', Right, "reject"),
            ("q1", 'a', 'X', Right, "q1"),
            ("q1", 'b', 'X', Right, "q1"),
            ("q1", '_', '_', Right, "accept"),
        ],
    },
    PatternTable {
        name: "a*b*c*",
        input_alphabet: "abc",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", 'a', 'X', Right, "q0"),
            ("q0", 'b', 'X', Right, "q1"),
            ("q0", 'c', 'X', Right, "q2"),
            ("q0", '_', '_', Right, "accept"),
            ("q1", 'b', 'X', Right, "q1"),
            ("q1", 'c', 'X', Right, "q2"),
            ("q1", 'a', 'X', Right, "reject"),
            ("q1", '_', '_', Right, "accept"),
            ("q2", 'c', 'X', Right, "q2"),
            ("q2", 'a', 'X', Right, "reject"),
            ("q2", 'b', 'X', Right, "reject"),
            ("q2", '_', '_', Right, "accept"),
        ],
    },
    PatternTable {
        name: "(00)*1(11)*",
        input_alphabet: "01",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", '0', 'X', Right, "q1"),
            ("q0", '1', 'X', Right, "q2"),
            ("q0", '_', '_', Right, "reject"),
            ("q1", '0', 'X', Right, "q0"),
            ("q1", '1', 'X', Right, "reject"),
            ("q2", '1', 'X', Right, "q3"),
            ("q2", '0', 'X', Right, "reject"),
            ("q3", '1', 'X', Right, "q2"),
            ("q3", '0', 'X', Right, "reject"),
            ("q3", '_', '_', Right, "accept"),
        ],
    },
    // First symbol must be 'a'; the rest of the input is copied through
    // unchanged so check_last can read the final symbol after scanning back
    // from the blank. Position 0 holds the 'X' written by q0, so reaching an
    // 'X' in check_last means the input was a lone 'a'.
    PatternTable {
        name: "a(a|b)*b",
        input_alphabet: "ab",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", 'a', 'X', Right, "q1"),
            ("q0", 'b', 'X', Right, "reject"),
            ("q1", 'a', 'a', Right, "q1"),
            ("q1", 'b', 'b', Right, "q1"),
            ("q1", '_', '_', Left, "check_last"),
            ("check_last", 'b', 'X', Right, "accept"),
            ("check_last", 'a', 'X', Right, "reject"),
            ("check_last", 'X', 'X', Right, "reject"),
        ],
    },
    PatternTable {
        name: "(0|1)*00(0|1)*",
        input_alphabet: "01",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", '0', 'X', Right, "q1"),
            ("q0", '1', 'X', Right, "q0"),
            ("q0", '_', '_', Right, "reject"),
            ("q1", '0', 'X', Right, "accept"),
            ("q1", '1', 'X', Right, "q0"),
            ("q1", '_', '_', Right, "reject"),
        ],
    },
    PatternTable {
        name: "1*01*01*",
        input_alphabet: "01",
        start: "q0",
        accepting: &["accept"],
        rejecting: &["reject"],
        rules: &[
            ("q0", '1', 'X', Right, "q0"),
            ("q0", '0', 'X', Right, "q1"),
            ("q0", '_', '_', Right, "reject"),
            ("q1", '1', 'X', Right, "q1"),
            ("q1", '0', 'X', Right, "q2"),
            ("q1", '_', '_', Right, "reject"),
            ("q2", '1', 'X', Right, "q2"),
            ("q2", '0', 'X', Right, "reject"),
            ("q2", '_', '_', Right, "accept"),
        ],
    },
];

lazy_static! {
    static ref CATALOG: Vec<Arc<MachineDefinition>> = TABLES
        .iter()
        .map(|table| table.build().map(Arc::new))
        .collect::<Result<_, _>>()
        .expect("built-in pattern catalog must validate");
}

/// Returns the machine definition for `pattern`.
///
/// Unknown patterns are an explicit [`MachineError::UnknownPattern`] error.
/// Use [`lookup_or_default`] where the silent-fallback behavior is wanted.
pub fn lookup(pattern: &str) -> Result<Arc<MachineDefinition>, MachineError> {
    CATALOG
        .iter()
        .find(|definition| definition.name == pattern)
        .cloned()
        .ok_or_else(|| MachineError::UnknownPattern(pattern.to_string()))
}

/// Returns the machine definition for `pattern`, falling back to the
/// [`DEFAULT_PATTERN`] machine when the pattern is unknown.
///
/// This is a compatibility mode: an unrecognized selector silently degrades
/// to the default machine instead of erroring. Prefer [`lookup`] for new
/// callers.
pub fn lookup_or_default(pattern: &str) -> Arc<MachineDefinition> {
    lookup(pattern).unwrap_or_else(|_| default_definition())
}

/// Returns the definition for the [`DEFAULT_PATTERN`].
pub fn default_definition() -> Arc<MachineDefinition> {
    CATALOG[0].clone()
}

/// Lists the catalog's pattern names, in catalog order.
pub fn pattern_names() -> Vec<&'static str> {
    TABLES.iter().map(|table| table.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;
    use crate::types::Status;

    fn run(pattern: &str, input: &str) -> Machine {
        let definition = lookup(pattern).unwrap();
        let mut machine = Machine::new(definition, input);
        machine.run_to_halt();
        machine
    }

    #[test]
    fn test_catalog_has_ten_patterns() {
        let names = pattern_names();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"(a|b)*abb"));
        assert!(names.contains(&"1*01*01*"));
    }

    #[test]
    fn test_all_definitions_validate() {
        for name in pattern_names() {
            let definition = lookup(name).unwrap();
            assert!(
                crate::analyzer::validate(&definition).is_ok(),
                "Definition '{}' is invalid",
                name
            );
        }
    }

    #[test]
    fn test_lookup_unknown_pattern() {
        let result = lookup("z*");
        assert_eq!(result, Err(MachineError::UnknownPattern("z*".to_string())));
    }

    #[test]
    fn test_lookup_or_default_falls_back() {
        let definition = lookup_or_default("z*");
        assert_eq!(definition.name, DEFAULT_PATTERN);

        let definition = lookup_or_default("0*1*");
        assert_eq!(definition.name, "0*1*");
    }

    #[test]
    fn test_abb_scenarios() {
        assert_eq!(run("(a|b)*abb", "aabb").status(), Status::Accepted);
        assert_eq!(run("(a|b)*abb", "ab").status(), Status::Stuck);
        assert_eq!(run("(a|b)*abb", "").status(), Status::Rejected);
        assert_eq!(run("(a|b)*abb", "ababb").status(), Status::Accepted);
    }

    #[test]
    fn test_abb_reads_whole_input() {
        let machine = run("(a|b)*abb", "aabb");
        // Four input symbols plus the final blank transition into accept.
        assert_eq!(machine.step_count(), 5);
        assert_eq!(machine.history().len(), 6);
    }

    #[test]
    fn test_zero_star_one_star_scenarios() {
        assert_eq!(run("0*1*", "0011").status(), Status::Accepted);
        assert_eq!(run("0*1*", "0101").status(), Status::Rejected);
        assert_eq!(run("0*1*", "").status(), Status::Accepted);
    }

    #[test]
    fn test_one_zero_pairs_scenarios() {
        assert_eq!(run("1(01)*0", "10").status(), Status::Accepted);
        assert_eq!(run("1(01)*0", "1010").status(), Status::Accepted);
        assert_eq!(run("1(01)*0", "1").status(), Status::Stuck);
        assert_eq!(run("1(01)*0", "100").status(), Status::Rejected);
        assert_eq!(run("1(01)*0", "01").status(), Status::Rejected);
    }

    #[test]
    fn test_ab_star_scenarios() {
        assert_eq!(run("(ab)*", "").status(), Status::Accepted);
        assert_eq!(run("(ab)*", "abab").status(), Status::Accepted);
        assert_eq!(run("(ab)*", "aba").status(), Status::Rejected);
        assert_eq!(run("(ab)*", "ba").status(), Status::Rejected);
    }

    #[test]
    fn test_contains_a_scenarios() {
        assert_eq!(run("(a+b)*a(a+b)*", "bba").status(), Status::Accepted);
        assert_eq!(run("(a+b)*a(a+b)*", "bbb").status(), Status::Rejected);
    }

    #[test]
    fn test_abc_star_scenarios() {
        assert_eq!(run("a*b*c*", "aabbcc").status(), Status::Accepted);
        assert_eq!(run("a*b*c*", "cba").status(), Status::Rejected);
        assert_eq!(run("a*b*c*", "").status(), Status::Accepted);
    }

    #[test]
    fn test_starts_a_ends_b_scenarios() {
        assert_eq!(run("a(a|b)*b", "ab").status(), Status::Accepted);
        assert_eq!(run("a(a|b)*b", "abab").status(), Status::Accepted);
        assert_eq!(run("a(a|b)*b", "aba").status(), Status::Rejected);
        assert_eq!(run("a(a|b)*b", "a").status(), Status::Rejected);
        assert_eq!(run("a(a|b)*b", "ba").status(), Status::Rejected);
    }

    #[test]
    fn test_contains_double_zero_scenarios() {
        assert_eq!(run("(0|1)*00(0|1)*", "1001").status(), Status::Accepted);
        assert_eq!(run("(0|1)*00(0|1)*", "0101").status(), Status::Rejected);
    }

    #[test]
    fn test_exactly_two_zeros_scenarios() {
        assert_eq!(run("1*01*01*", "1010").status(), Status::Accepted);
        assert_eq!(run("1*01*01*", "000").status(), Status::Rejected);
        assert_eq!(run("1*01*01*", "11").status(), Status::Rejected);
    }

    #[test]
    fn test_duplicate_rule_is_rejected() {
        let table = PatternTable {
            name: "dup",
            input_alphabet: "a",
            start: "q0",
            accepting: &["accept"],
            rejecting: &[],
            rules: &[
                ("q0", 'a', 'X', Right, "accept"),
                ("q0", 'a', 'Y', Right, "accept"),
            ],
        };

        let result = table.build();
        match result {
            Err(MachineError::InvalidDefinition(name, message)) => {
                assert_eq!(name, "dup");
                assert!(message.contains("duplicate rule"));
            }
            other => panic!("Expected InvalidDefinition, got {:?}", other),
        }
    }
}
