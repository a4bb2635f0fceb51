use std::convert::TryFrom;
use std::time::Duration;

use chrono::{TimeZone, Utc};

// Unix timestamp in milliseconds.
pub type Timestamp = i64;

pub trait TimestampTrait {
    fn add(&self, d: Duration) -> Self;
    fn sub(&self, d: Duration) -> Self;
    fn to_string_millis(&self) -> String;
}

impl TimestampTrait for Timestamp {
    #[inline]
    fn add(&self, d: Duration) -> Self {
        self.saturating_add(i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }

    #[inline]
    fn sub(&self, d: Duration) -> Self {
        self.saturating_sub(i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }

    fn to_string_millis(&self) -> String {
        Utc.timestamp_millis_opt(*self)
            .single()
            .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}
