//! In-memory log of started work sessions

use std::collections::VecDeque;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One started work session. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Epoch milliseconds at which the work phase started
    pub start_timestamp_ms: i64,
    pub work_minutes: u64,
    pub break_minutes: u64,
}

impl SessionRecord {
    pub fn new(started_at: DateTime<Utc>, work_minutes: u64, break_minutes: u64) -> Self {
        Self {
            start_timestamp_ms: started_at.timestamp_millis(),
            work_minutes,
            break_minutes,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.start_timestamp_ms)
    }

    /// "Mode: 25/5" style label
    pub fn mode_label(&self) -> String {
        format!("{}/{}", self.work_minutes, self.break_minutes)
    }

    /// Start time rendered as "HH:MM, DD Mon" in the given zone
    pub fn time_label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self.started_at() {
            Some(at) => at.with_timezone(tz).format("%H:%M, %d %b").to_string(),
            None => "unknown".to_string(),
        }
    }

    pub fn local_time_label(&self) -> String {
        self.time_label_in(&Local)
    }
}

/// Session history, most recent first. Grows without bound.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: VecDeque<SessionRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new record
    pub fn record(&mut self, started_at: DateTime<Utc>, work_minutes: u64, break_minutes: u64) {
        self.entries.push_front(SessionRecord::new(started_at, work_minutes, break_minutes));
    }

    pub fn entries(&self) -> impl Iterator<Item = &SessionRecord> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&SessionRecord> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut log = SessionLog::new();
        assert!(log.is_empty());

        let first = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        log.record(first, 25, 5);
        log.record(second, 50, 10);

        let modes: Vec<String> = log.entries().map(|r| r.mode_label()).collect();
        assert_eq!(modes, vec!["50/10", "25/5"]);
        assert_eq!(log.latest().unwrap().started_at(), Some(second));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_time_label_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap();
        let record = SessionRecord::new(at, 25, 5);
        assert_eq!(record.time_label_in(&Utc), "14:05, 07 Mar");
        assert_eq!(record.start_timestamp_ms, at.timestamp_millis());
    }
}
