use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Most history entries a user keeps; the oldest is evicted beyond this.
pub const HISTORY_CAPACITY: usize = 8;

/// One successful login: when, and from what client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub user_agent: String,
}

/// Capped, newest-first log of authentication events. Stored as JSONB on
/// the user row; index 0 is always the most recent login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginHistory(Vec<LoginEntry>);

impl LoginHistory {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Prepends `entry`, evicting the oldest entry first whenever the log
    /// is already at (or somehow beyond) capacity.
    pub fn push_front_evict_oldest(&mut self, entry: LoginEntry) {
        while self.0.len() >= HISTORY_CAPACITY {
            self.0.pop();
        }
        self.0.insert(0, entry);
    }

    pub fn record(&mut self, user_agent: &str) {
        self.push_front_evict_oldest(LoginEntry {
            timestamp: OffsetDateTime::now_utc(),
            user_agent: user_agent.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[LoginEntry] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn entry(n: i64) -> LoginEntry {
        LoginEntry {
            timestamp: OffsetDateTime::UNIX_EPOCH + Duration::seconds(n),
            user_agent: format!("agent-{n}"),
        }
    }

    #[test]
    fn newest_entry_is_first() {
        let mut history = LoginHistory::new();
        history.push_front_evict_oldest(entry(1));
        history.push_front_evict_oldest(entry(2));
        assert_eq!(history.entries()[0], entry(2));
        assert_eq!(history.entries()[1], entry(1));
    }

    #[test]
    fn ninth_login_evicts_the_oldest() {
        let mut history = LoginHistory::new();
        for n in 0..HISTORY_CAPACITY as i64 {
            history.push_front_evict_oldest(entry(n));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        history.push_front_evict_oldest(entry(99));
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0], entry(99));
        // entry(0) was the oldest and must be gone
        assert!(!history.entries().contains(&entry(0)));
        assert_eq!(history.entries().last(), Some(&entry(1)));
    }

    #[test]
    fn overfull_history_is_trimmed_back_to_capacity() {
        // A log that somehow grew past the cap still lands at exactly
        // capacity after the next insert.
        let mut history = LoginHistory((0..12).map(entry).collect());
        history.push_front_evict_oldest(entry(100));
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0], entry(100));
    }

    #[test]
    fn serde_roundtrips_as_plain_array() {
        let mut history = LoginHistory::new();
        history.push_front_evict_oldest(entry(7));
        let json = serde_json::to_value(&history).expect("serialize");
        assert!(json.is_array());
        let back: LoginHistory = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, history);
    }
}
