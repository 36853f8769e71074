//! Bounded in-memory history of panel events.
//!
//! Power transitions, recognized touches and calibration fallbacks are recorded here
//! next to the `defmt` output, so a host (the simulator, or a debugger reading RAM)
//! can see the recent history without a probe attached.
//!
//! Lines longer than [`EVENT_LINE_LENGTH`] are truncated. When the buffer is full the
//! oldest line is dropped.

use core::fmt::{self, Write};

use heapless::{Deque, String};

/// Maximum number of lines kept.
pub const EVENT_LOG_SIZE: usize = 16;

/// Maximum characters per line.
pub const EVENT_LINE_LENGTH: usize = 48;

/// One recorded event.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EventLine {
    /// Control-loop time of the event.
    pub at_ms: u64,
    pub text: String<EVENT_LINE_LENGTH>,
}

/// Ring buffer of event lines.
pub struct EventLog {
    buffer: Deque<EventLine, EVENT_LOG_SIZE>,
    total: u32,
}

impl EventLog {
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            total: 0,
        }
    }

    /// Push a line. If the buffer is full, the oldest line is dropped.
    pub fn push(
        &mut self,
        at_ms: u64,
        msg: &str,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut text: String<EVENT_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if text.push(c).is_err() {
                break;
            }
        }

        self.buffer.push_back(EventLine { at_ms, text }).ok();
        self.total = self.total.wrapping_add(1);
    }

    /// Format and push a line.
    pub fn record(
        &mut self,
        at_ms: u64,
        args: fmt::Arguments<'_>,
    ) {
        let mut line: String<{ 2 * EVENT_LINE_LENGTH }> = String::new();
        let _ = line.write_fmt(args);
        self.push(at_ms, &line);
    }

    /// Iterate over lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EventLine> { self.buffer.iter() }

    /// Lines pushed after the caller had seen `seen` lines in total.
    ///
    /// Pair with [`EventLog::total`] to print each line once.
    pub fn since(
        &self,
        seen: u32,
    ) -> impl Iterator<Item = &EventLine> {
        let fresh = (self.total.wrapping_sub(seen) as usize).min(self.buffer.len());
        self.buffer.iter().skip(self.buffer.len() - fresh)
    }

    /// Total number of lines ever pushed.
    #[inline]
    pub const fn total(&self) -> u32 { self.total }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    fn texts(log: &EventLog) -> Vec<&str> { log.iter().map(|l| l.text.as_str()).collect() }

    #[test]
    fn test_push_keeps_order() {
        let mut log = EventLog::new();
        log.push(10, "first");
        log.push(20, "second");
        assert_eq!(texts(&log), ["first", "second"]);
        assert_eq!(log.iter().next().map(|l| l.at_ms), Some(10));
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut log = EventLog::new();
        for i in 0..EVENT_LOG_SIZE as u64 + 3 {
            log.record(i, format_args!("event {i}"));
        }
        assert_eq!(log.len(), EVENT_LOG_SIZE);
        assert_eq!(log.iter().next().map(|l| l.text.as_str()), Some("event 3"));
        assert_eq!(log.total(), EVENT_LOG_SIZE as u32 + 3);
    }

    #[test]
    fn test_long_lines_truncated() {
        let mut log = EventLog::new();
        let long = "x".repeat(EVENT_LINE_LENGTH + 20);
        log.push(0, &long);
        assert_eq!(log.iter().next().map(|l| l.text.len()), Some(EVENT_LINE_LENGTH));
    }

    #[test]
    fn test_since_returns_unseen_lines() {
        let mut log = EventLog::new();
        log.push(0, "a");
        let seen = log.total();
        log.push(1, "b");
        log.push(2, "c");
        let fresh: Vec<&str> = log.since(seen).map(|l| l.text.as_str()).collect();
        assert_eq!(fresh, ["b", "c"]);
        assert_eq!(log.since(log.total()).count(), 0);
    }
}
