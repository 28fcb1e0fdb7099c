/**
 * Time-based Id Generation
 *
 * Record ids are milliseconds since the Unix epoch. Two records created in
 * the same millisecond would collide, so the generator hands out
 * `max(now, last + 1)`: ids stay close to wall-clock time and are strictly
 * increasing within one process.
 *
 * At startup the generator is primed with the largest id already on disk so
 * that a clock step backwards cannot reissue an existing id.
 */
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::shared::models::RecordId;

/// Strictly increasing, time-based id source
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose next id is greater than `last`
    pub fn starting_after(last: RecordId) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }

    /// Next unique id
    pub fn next_id(&self) -> RecordId {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Next unique id rendered as a user id string
    pub fn next_user_id(&self) -> String {
        self.next_id().to_string()
    }
}
