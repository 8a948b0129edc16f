use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::Topic;

pub const JOB_NOTIFICATION_TITLE: &str = "now(JST)";
const JOB_DATA_KEY: &str = "data";
const JOB_DATA_VALUE: &str = "hogehogehoge";
const JST_OFFSET_SECS: i32 = 9 * 60 * 60;

/// Title and body shown by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// A message addressed to every device subscribed to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMessage {
    topic: Topic,
    notification: Option<Notification>,
    data: BTreeMap<String, String>,
}

impl TopicMessage {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            notification: None,
            data: BTreeMap::new(),
        }
    }

    pub fn with_notification(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.notification = Some(Notification {
            title: title.into(),
            body: body.into(),
        });
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// The message the hourly job publishes: the current time in JST.
    pub fn hourly(topic: Topic, now: DateTime<Utc>) -> Self {
        Self::new(topic)
            .with_notification(JOB_NOTIFICATION_TITLE, format_jst(now))
            .with_data(JOB_DATA_KEY, JOB_DATA_VALUE)
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }
}

const JST_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z Asia/Tokyo";

/// Formats `now` in UTC+9, e.g. `2020-06-08 21:04:05.123456789 +0900 Asia/Tokyo`.
///
/// Fractional seconds are omitted when zero, otherwise printed with 3, 6 or 9 digits.
pub fn format_jst(now: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(JST_OFFSET_SECS) {
        Some(jst) => now.with_timezone(&jst).format(JST_FORMAT).to_string(),
        None => now.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn hourly_message_carries_jst_time() {
        let now = Utc.with_ymd_and_hms(2020, 6, 8, 12, 4, 5).unwrap();
        let msg = TopicMessage::hourly(Topic::sample(), now);

        let notification = msg.notification().unwrap();
        assert_eq!(notification.title, "now(JST)");
        assert_eq!(notification.body, "2020-06-08 21:04:05 +0900 Asia/Tokyo");
        assert_eq!(msg.data().get("data").map(String::as_str), Some("hogehogehoge"));
        assert_eq!(msg.topic().name(), "sample");
    }

    #[test]
    fn jst_body_keeps_nanoseconds() {
        let now = Utc
            .with_ymd_and_hms(2020, 6, 8, 15, 30, 0)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();

        assert_eq!(format_jst(now), "2020-06-09 00:30:00.123456789 +0900 Asia/Tokyo");
    }

    #[test]
    fn plain_message_has_no_notification() {
        let msg = TopicMessage::new(Topic::sample()).with_data("k", "v");
        assert!(msg.notification().is_none());
        assert_eq!(msg.data().len(), 1);
    }
}
