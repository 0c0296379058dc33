//! Time source and id allocation for runtime-generated alerts.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

use crate::domain::AlertStamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant, or advances by a fixed step per read.
#[derive(Debug)]
pub struct FixedClock {
    start: DateTime<Utc>,
    step: Duration,
    reads: AtomicI64,
}

impl FixedClock {
    pub fn at(start: DateTime<Utc>) -> Self {
        Self::stepping(start, Duration::zero())
    }

    pub fn stepping(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            start,
            step,
            reads: AtomicI64::new(0),
        }
    }

    /// Convenience constructor from unix milliseconds; out-of-range values clamp to the epoch.
    pub fn at_millis(millis: i64) -> Self {
        let start = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default();
        Self::at(start)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let read = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + self.step * read as i32
    }
}

/// Issues alert ids that are strictly increasing and, while the clock moves forward, equal
/// to the creation time in unix milliseconds.
pub struct AlertStamper {
    clock: Box<dyn Clock>,
    last_id: Option<u64>,
}

impl AlertStamper {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last_id: None,
        }
    }

    /// Ensures future ids are greater than `id`.
    pub fn observe(&mut self, id: u64) {
        self.last_id = Some(self.last_id.map_or(id, |last| last.max(id)));
    }

    pub fn next_stamp(&mut self) -> AlertStamp {
        let now = self.clock.now();
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last_id {
            // Saturates at u64::MAX; a stored id that large pins every later id to it.
            Some(last) if millis <= last => last.saturating_add(1),
            _ => millis,
        };
        self.last_id = Some(id);
        AlertStamp {
            id,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl std::fmt::Debug for AlertStamper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertStamper")
            .field("last_id", &self.last_id)
            .finish_non_exhaustive()
    }
}
