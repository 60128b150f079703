//! Dashboard greeting and live clock.
//!
//! # Responsibility
//! - Compute the wall-clock greeting bucket and greeting line.
//! - Format the clock readout, transliterating digits for RTL languages.
//! - Drive a repeating tick bounded to the view's mounted lifetime.
//!
//! # Invariants
//! - Bucket boundaries are fixed: [5,12) morning, [12,17) afternoon,
//!   [17,20) evening, else night.
//! - The clock format is `HH:mm:ss` regardless of language; only the digit
//!   glyphs are localized.
//! - Dropping a `ClockTicker` cancels its timer deterministically.

use crate::identity::{IdentityError, IdentityHandle};
use crate::model::profile::Language;
use chrono::{Local, NaiveTime, Timelike};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Time-of-day greeting bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingBucket {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl GreetingBucket {
    /// Buckets a wall-clock hour (0..=23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=19 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Translation key for this bucket's greeting copy.
    pub fn message_key(self) -> &'static str {
        match self {
            Self::Morning => "good_morning",
            Self::Afternoon => "good_afternoon",
            Self::Evening => "good_evening",
            Self::Night => "good_night",
        }
    }
}

/// Greeting line rendered at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Greeting {
    /// First visit: no name stored yet, show the welcome copy.
    Welcome,
    Named { bucket: GreetingBucket, name: String },
}

/// Builds the greeting for the current hour and identity.
///
/// An empty identity name means the user has never stored one.
///
/// # Errors
/// - `IdentityError::NotInstalled` when the shell context is gone.
pub fn greeting(identity: &IdentityHandle) -> Result<Greeting, IdentityError> {
    greeting_at_hour(identity, Local::now().hour())
}

/// Greeting for an explicit hour; `greeting` uses the wall clock.
pub fn greeting_at_hour(identity: &IdentityHandle, hour: u32) -> Result<Greeting, IdentityError> {
    let name = identity.display_name()?;
    if name.is_empty() {
        return Ok(Greeting::Welcome);
    }
    Ok(Greeting::Named {
        bucket: GreetingBucket::from_hour(hour),
        name,
    })
}

/// Formats a clock readout as `HH:mm:ss` with language-native digit glyphs.
pub fn format_clock(time: NaiveTime, language: Language) -> String {
    language.localize_digits(&time.format("%H:%M:%S").to_string())
}

/// Repeating timer for the live clock.
///
/// Runs on a background thread and invokes the callback with the current
/// local time once per interval. Dropping the ticker cancels the timer and
/// joins the thread, so no tick outlives the view.
pub struct ClockTicker {
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ClockTicker {
    /// Starts ticking every `interval` (1 second in production).
    pub fn start(interval: Duration, on_tick: impl Fn(NaiveTime) + Send + 'static) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let worker = std::thread::spawn(move || loop {
            match cancel_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => on_tick(Local::now().time()),
                // Cancelled or sender dropped: stop immediately.
                _ => break,
            }
        });
        Self {
            cancel: Some(cancel_tx),
            worker: Some(worker),
        }
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        // Dropping the sender disconnects the channel and wakes the worker.
        self.cancel.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
