//! Autoplay: advance the year once per interval, wrapping at the end of
//! the range.
//!
//! The timer thread never touches engine state. It only delivers tick
//! messages over a channel; the embedding UI loop drains them and runs the
//! synchronous recomputation, so ticks cannot overlap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::domain::Year;

/// Pure wrap-around step: one year forward, back to `min` after `max`.
pub fn advance_year(current: Year, min: Year, max: Year) -> Year {
    if current >= max {
        min
    } else {
        current + 1
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AutoplayConfig {
    pub interval: Duration,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
        }
    }
}

/// A cancelable tick source. Dropping the timer stops it.
pub struct AutoplayTimer {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AutoplayTimer {
    /// Spawn the tick thread. Ticks stop when the timer is stopped/dropped
    /// or when the receiving side goes away.
    pub fn start(config: AutoplayConfig, ticks: Sender<()>) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_flag = Arc::clone(&cancel);
        let handle = thread::spawn(move || loop {
            thread::sleep(config.interval);
            if cancel_flag.load(Ordering::Relaxed) {
                break;
            }
            if ticks.send(()).is_err() {
                break;
            }
        });
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Cancel and wait for the tick thread to exit.
    pub fn stop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
