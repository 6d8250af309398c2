//! Wall clock for execution contexts

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::traits::Clock;

/// UTC wall clock that never goes backwards
///
/// If the system clock steps back, the last issued instant is repeated until
/// wall time catches up again.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_issued_nanos: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn issue(&self, candidate: DateTime<Utc>) -> DateTime<Utc> {
        // Outside the i64 nanosecond range (years before 1677 or after 2262)
        let Some(candidate_nanos) = candidate.timestamp_nanos_opt() else {
            return candidate;
        };

        let previous = self.last_issued_nanos.fetch_max(candidate_nanos, Ordering::SeqCst);
        if previous > candidate_nanos {
            DateTime::from_timestamp_nanos(previous)
        } else {
            candidate
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        self.issue(Utc::now())
    }
}
