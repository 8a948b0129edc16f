use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Name of the single lock guarding the hourly notification.
pub const NOTIFICATION_LOCK: &str = "Notification";

/// Last time a notification went out under a given lock name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLock {
    name: String,
    date: DateTime<Utc>,
}

impl NotificationLock {
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }

    /// Reconstitutes from a stored unix timestamp in microseconds (used by adapters).
    pub fn from_timestamp_micros(name: impl Into<String>, micros: i64) -> Option<Self> {
        let date = Utc.timestamp_micros(micros).single()?;
        Some(Self::new(name, date))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn timestamp_micros(&self) -> i64 {
        self.date.timestamp_micros()
    }

    /// Whether this lock still blocks a send at `now`.
    ///
    /// Only the UTC hour-of-day is compared, so a lock taken exactly one day
    /// earlier also blocks.
    pub fn blocks(&self, now: DateTime<Utc>) -> bool {
        self.date.hour() == now.hour()
    }
}
