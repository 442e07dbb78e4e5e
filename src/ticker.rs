//! Cancellable periodic task and time sources.
//!
//! The ticker does not own a timer. Whoever drives it (a browser interval, a
//! test loop) calls [`Ticker::poll`] with the current time and the ticker
//! decides whether a period has elapsed. Tests step time with [`ManualTime`].

#[cfg(test)]
#[path = "ticker_test.rs"]
mod ticker_test;

use std::cell::Cell;

/// Wall-clock milliseconds since the Unix epoch.
pub trait TimeSource {
    fn now_ms(&self) -> i64;
}

/// Time that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualTime {
    now: Cell<i64>,
}

impl ManualTime {
    #[must_use]
    pub fn new(start_ms: i64) -> Self {
        Self { now: Cell::new(start_ms) }
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// `Date.now()` in the browser.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTime;

#[cfg(target_arch = "wasm32")]
impl TimeSource for BrowserTime {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// A periodic task that fires at most once per poll.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval_ms: i64,
    next_due_ms: i64,
    cancelled: bool,
}

impl Ticker {
    /// A ticker whose first fire is one interval after `now_ms`.
    ///
    /// Intervals below one millisecond are raised to one.
    #[must_use]
    pub fn new(interval_ms: u32, now_ms: i64) -> Self {
        let interval_ms = i64::from(interval_ms.max(1));
        Self { interval_ms, next_due_ms: now_ms + interval_ms, cancelled: false }
    }

    #[must_use]
    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    #[must_use]
    pub fn next_due_ms(&self) -> i64 {
        self.next_due_ms
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Fire if due. Missed periods collapse into one fire and the next is
    /// scheduled one interval after `now_ms`.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        if self.cancelled || now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms = now_ms + self.interval_ms;
        true
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Undo a cancel; the next fire is one interval after `now_ms`.
    pub fn resume(&mut self, now_ms: i64) {
        self.cancelled = false;
        self.next_due_ms = now_ms + self.interval_ms;
    }
}
