use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dsim_core::DsimResult;
use tracing::info;

/// Shared flag that stops a [`PeriodicTask`] between cycles.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Waits out the delay between cycles.
pub trait Sleeper {
    /// Sleep up to `duration`, returning early once `cancel` fires.
    fn sleep(&self, duration: Duration, cancel: &CancelHandle);
}

/// Real wall-clock sleeping, polled in short slices so cancellation is prompt.
#[derive(Debug, Clone, Copy)]
pub struct ThreadSleeper {
    pub poll: Duration,
}

impl Default for ThreadSleeper {
    fn default() -> Self {
        Self {
            poll: Duration::from_millis(250),
        }
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration, cancel: &CancelHandle) {
        let deadline = Instant::now() + duration;
        while !cancel.is_cancelled() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep(self.poll.min(deadline - now));
        }
    }
}

/// Fixed-delay repetition: run a cycle, sleep `interval`, repeat.
///
/// Cycles never overlap. A cycle error stops the task and is returned as-is;
/// there is no retry.
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    interval: Duration,
    max_cycles: Option<u64>,
    cancel: CancelHandle,
}

impl PeriodicTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_cycles: None,
            cancel: CancelHandle::default(),
        }
    }

    /// Stop after `cycles` completed cycles; `None` runs until cancelled.
    pub fn with_max_cycles(mut self, cycles: Option<u64>) -> Self {
        self.max_cycles = cycles;
        self
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Drive cycles until cancelled, `max_cycles` is reached, or a cycle
    /// fails. `cycle` receives the 1-based cycle number. Returns the number of
    /// completed cycles.
    pub fn run<S, F>(&self, sleeper: &S, mut cycle: F) -> DsimResult<u64>
    where
        S: Sleeper + ?Sized,
        F: FnMut(u64) -> DsimResult<()>,
    {
        let mut completed = 0u64;
        while !self.cancel.is_cancelled() {
            cycle(completed + 1)?;
            completed += 1;

            if self.max_cycles.is_some_and(|max| completed >= max) || self.cancel.is_cancelled() {
                break;
            }
            info!("next cycle in {}", humanize(self.interval));
            sleeper.sleep(self.interval, &self.cancel);
        }
        Ok(completed)
    }
}

fn humanize(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{secs} seconds")
    }
}
