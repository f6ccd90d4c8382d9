//! This module defines the `Machine` struct, which executes a single run of a
//! deterministic single-tape Turing Machine. It owns the run's mutable state (tape, head
//! position, current state, step counter) and a history of snapshots for replay.

use crate::types::{Action, Direction, MachineDefinition, Snapshot, Status, BLANK_SYMBOL};

use std::collections::VecDeque;
use std::sync::Arc;

/// Executes a single run of a Turing Machine against an input string.
///
/// A `Machine` is created from a shared, immutable [`MachineDefinition`] and an
/// input string, and is advanced one step at a time (or to completion). Every
/// abnormal condition is expressed through [`Status`] or the return value of
/// [`Machine::step`], never through an error path: the engine is a pure step
/// function over explicit state, which keeps runs trivially resumable and
/// replayable.
pub struct Machine {
    definition: Arc<MachineDefinition>,
    tape: Vec<char>,
    head: usize,
    state: String,
    step_count: usize,
    stuck: bool,
    history: VecDeque<Snapshot>,
    history_bound: Option<usize>,
}

impl Machine {
    /// Creates a new run from a definition and an input string.
    ///
    /// The tape is initialized to the input's characters followed by exactly
    /// one blank sentinel cell, the head is placed at position 0, and the
    /// state is set to the definition's start state. A single initial snapshot
    /// is recorded.
    ///
    /// The input is not validated against the definition's input alphabet:
    /// unknown symbols are carried onto the tape as-is and will fail
    /// transition lookup when the head reaches them.
    pub fn new(definition: Arc<MachineDefinition>, input: &str) -> Self {
        let mut machine = Self {
            definition,
            tape: Vec::new(),
            head: 0,
            state: String::new(),
            step_count: 0,
            stuck: false,
            history: VecDeque::new(),
            history_bound: None,
        };
        machine.load_input(input);
        machine
    }

    /// Bounds the history to the most recent `bound` snapshots.
    ///
    /// With a bound in place the history behaves as a ring buffer: appending
    /// beyond the bound evicts the oldest snapshot. Without one (the default)
    /// the history grows by one snapshot per executed step, which is unbounded
    /// for non-halting machines.
    pub fn with_history_bound(mut self, bound: usize) -> Self {
        self.history_bound = Some(bound.max(1));
        self.trim_history();
        self
    }

    /// Resets the run in place with a new input string.
    ///
    /// Tape, head, state, step counter, stuck flag, and history are all reset
    /// exactly as in [`Machine::new`]. The history bound is kept.
    pub fn load_input(&mut self, input: &str) {
        self.tape = input.chars().chain([BLANK_SYMBOL]).collect();
        self.head = 0;
        self.state = self.definition.start_state.clone();
        self.step_count = 0;
        self.stuck = false;
        self.history.clear();
        self.record_snapshot();
    }

    /// Executes exactly one transition.
    ///
    /// Returns `true` if a step was executed, `false` if the machine is
    /// halted: either the current state is accepting or rejecting, or no
    /// transition is defined for the current (state, symbol) pair. Repeated
    /// calls after a halt are safe no-ops that keep returning `false`.
    pub fn step(&mut self) -> bool {
        if self.definition.is_terminal(&self.state) {
            return false;
        }

        let symbol = self.symbol();
        let action = match self.definition.action(&self.state, symbol).cloned() {
            Some(action) => action,
            None => {
                self.stuck = true;
                return false;
            }
        };

        self.apply(&action);
        self.step_count += 1;
        self.record_snapshot();

        true
    }

    /// Runs the machine until `step()` returns `false`.
    ///
    /// There is no iteration cap: a definition with a cycle through
    /// non-halting states will loop forever. Use [`Machine::run_bounded`] when
    /// a safety valve is needed.
    pub fn run_to_halt(&mut self) {
        while self.step() {}
    }

    /// Runs the machine for at most `max_steps` steps.
    ///
    /// Returns `true` if the machine halted within the bound, `false` if the
    /// bound was exhausted while the machine was still running. Per-step
    /// semantics are identical to [`Machine::run_to_halt`].
    pub fn run_bounded(&mut self, max_steps: usize) -> bool {
        for _ in 0..max_steps {
            if !self.step() {
                return true;
            }
        }

        self.definition.is_terminal(&self.state)
    }

    /// Returns the observable status of the run.
    pub fn status(&self) -> Status {
        if self.definition.accepting.contains(&self.state) {
            Status::Accepted
        } else if self.definition.rejecting.contains(&self.state) {
            Status::Rejected
        } else if self.stuck {
            Status::Stuck
        } else {
            Status::Running
        }
    }

    /// Renders the tape with the head position bracketed, e.g. `[a] b  c`.
    ///
    /// Pure query; calling it repeatedly without an intervening step returns
    /// identical results.
    pub fn render_tape(&self) -> String {
        let rendered: String = self
            .tape
            .iter()
            .enumerate()
            .map(|(i, &symbol)| {
                if i == self.head {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();

        rendered.trim().to_string()
    }

    /// Returns the symbol under the head.
    ///
    /// A position at or beyond the tape's current length reads as blank; the
    /// tape is kept contiguous, so this is primarily a defensive bound.
    pub fn symbol(&self) -> char {
        self.tape.get(self.head).copied().unwrap_or(BLANK_SYMBOL)
    }

    /// Returns the transition that would fire on the next step, if any.
    ///
    /// Useful for display layers that want to preview the upcoming move.
    pub fn pending_action(&self) -> Option<&Action> {
        if self.definition.is_terminal(&self.state) {
            return None;
        }
        self.definition.action(&self.state, self.symbol())
    }

    /// Returns the tape contents.
    pub fn tape(&self) -> &[char] {
        &self.tape
    }

    /// Returns the head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the current state of the run.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the number of steps executed so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the recorded history, oldest snapshot first.
    pub fn history(&self) -> &VecDeque<Snapshot> {
        &self.history
    }

    /// Returns the definition this run was created from.
    pub fn definition(&self) -> &Arc<MachineDefinition> {
        &self.definition
    }

    fn apply(&mut self, action: &Action) {
        if self.head == self.tape.len() {
            self.tape.push(BLANK_SYMBOL);
        }
        self.tape[self.head] = action.write;

        match action.direction {
            Direction::Right => {
                self.head += 1;
                if self.head >= self.tape.len() {
                    self.tape.push(BLANK_SYMBOL);
                }
            }
            // Moving left from position 0 leaves the head in place.
            Direction::Left => self.head = self.head.saturating_sub(1),
        }

        self.state = action.next_state.clone();
    }

    fn record_snapshot(&mut self) {
        self.history.push_back(Snapshot {
            tape: self.tape.clone(),
            head: self.head,
            state: self.state.clone(),
            step: self.step_count,
        });
        self.trim_history();
    }

    fn trim_history(&mut self) {
        if let Some(bound) = self.history_bound {
            while self.history.len() > bound {
                self.history.pop_front();
            }
        }
    }
}
