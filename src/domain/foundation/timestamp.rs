//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Returns the duration elapsed from this timestamp to now.
    pub fn elapsed(&self) -> Duration {
        Utc::now().signed_duration_since(self.0)
    }

    /// Creates a new timestamp by subtracting the specified number of seconds.
    pub fn minus_seconds(&self, seconds: i64) -> Self {
        Self(self.0 - Duration::seconds(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_an_earlier_timestamp() {
        let earlier = Timestamp::now().minus_seconds(60);
        let now = Timestamp::now();
        assert!(now.is_after(&earlier));
        assert!(earlier.is_before(&now));
    }

    #[test]
    fn duration_since_measures_the_gap() {
        let now = Timestamp::now();
        let earlier = now.minus_seconds(90);
        assert_eq!(now.duration_since(&earlier), Duration::seconds(90));
    }

    #[test]
    fn elapsed_grows_for_backdated_timestamps() {
        let backdated = Timestamp::now().minus_seconds(120);
        assert!(backdated.elapsed() >= Duration::seconds(120));
    }
}
