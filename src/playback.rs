//! This module provides a cancelable auto-run mode for animated playback: a background
//! thread owns the machine for the duration of the run and issues one step + observer
//! notification per delay interval. The engine itself stays single-threaded; the thread
//! boundary exists only so a front end can keep rendering while the run advances.

use crate::machine::Machine;
use crate::types::{MAX_STEP_DELAY_MS, MIN_STEP_DELAY_MS};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Clamps an inter-step delay to the supported 50–1000 ms range.
pub fn clamp_delay(delay: Duration) -> Duration {
    Duration::from_millis(
        (delay.as_millis() as u64).clamp(MIN_STEP_DELAY_MS, MAX_STEP_DELAY_MS),
    )
}

/// A handle to a machine running on a timer in a background thread.
///
/// The `Machine` is moved into the worker, so at most one `step()` is ever in
/// flight and no other caller can observe the run mid-step. The observer is
/// invoked after each step fully completes. Cancellation is cooperative: the
/// stop flag is checked between steps, never mid-step, and [`Playback::join`]
/// hands the machine back with whatever progress was made.
pub struct Playback {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<Machine>>,
}

impl Playback {
    /// Starts stepping `machine` on a background thread, sleeping `delay`
    /// (clamped) between steps and calling `observer` after each executed step.
    ///
    /// The run ends when `step()` returns `false` or the playback is canceled.
    pub fn spawn<F>(mut machine: Machine, delay: Duration, mut observer: F) -> Self
    where
        F: FnMut(&Machine) + Send + 'static,
    {
        let delay = clamp_delay(delay);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::SeqCst) {
                if !machine.step() {
                    break;
                }
                observer(&machine);
                thread::sleep(delay);
            }
            machine
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Requests cancellation. The current step (if any) still completes.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once the worker thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }

    /// Waits for the worker to finish and returns the machine.
    ///
    /// Call [`Playback::cancel`] first to stop an ongoing run; otherwise this
    /// blocks until the machine halts on its own.
    pub fn join(mut self) -> Machine {
        let handle = self
            .handle
            .take()
            .expect("playback joined exactly once by construction");
        match handle.join() {
            Ok(machine) => machine,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        self.cancel();
    }
}
