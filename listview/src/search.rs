//! Controlled search box state.

use serde::{Deserialize, Serialize};

/// How search changes propagate to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SearchPolicy {
    /// Every change is reported at once.
    #[default]
    Immediate,
    /// At most one report per interval. Changes inside the interval are held
    /// until the next change or [`Tick`](crate::event::Event::Tick) after it.
    Throttle { interval_ms: u64 },
}

/// The search term plus throttling bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    term: String,
    pending: bool,
    last_emit_ms: Option<i64>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current term, as typed.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether a change is waiting to be reported.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a new term. Returns the term to report, if any.
    pub fn set(&mut self, term: String, now_ms: i64, policy: SearchPolicy) -> Option<String> {
        if term == self.term && !self.pending {
            return None;
        }
        self.term = term;
        self.pending = true;
        self.flush(now_ms, policy)
    }

    /// Reset to the empty term. Always reported, regardless of policy.
    pub fn clear(&mut self, now_ms: i64) -> String {
        self.term.clear();
        self.pending = false;
        self.last_emit_ms = Some(now_ms);
        String::new()
    }

    /// Report a held change once the throttle interval has elapsed.
    pub fn flush(&mut self, now_ms: i64, policy: SearchPolicy) -> Option<String> {
        if !self.pending {
            return None;
        }
        let ready = match (policy, self.last_emit_ms) {
            (SearchPolicy::Immediate, _) | (_, None) => true,
            (SearchPolicy::Throttle { interval_ms }, Some(last)) => {
                now_ms.saturating_sub(last) >= interval_ms as i64
            }
        };
        if !ready {
            return None;
        }
        self.pending = false;
        self.last_emit_ms = Some(now_ms);
        Some(self.term.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_reports_every_change() {
        let mut search = SearchState::new();
        assert_eq!(search.set("b".into(), 0, SearchPolicy::Immediate), Some("b".into()));
        assert_eq!(search.set("ba".into(), 1, SearchPolicy::Immediate), Some("ba".into()));
        assert_eq!(search.set("ba".into(), 2, SearchPolicy::Immediate), None);
    }

    #[test]
    fn test_throttle_holds_and_flushes() {
        let policy = SearchPolicy::Throttle { interval_ms: 300 };
        let mut search = SearchState::new();

        assert_eq!(search.set("b".into(), 1_000, policy), Some("b".into()));
        assert_eq!(search.set("ba".into(), 1_100, policy), None);
        assert_eq!(search.set("ban".into(), 1_200, policy), None);
        assert!(search.is_pending());
        assert_eq!(search.term(), "ban");

        assert_eq!(search.flush(1_250, policy), None);
        assert_eq!(search.flush(1_300, policy), Some("ban".into()));
        assert!(!search.is_pending());
        assert_eq!(search.flush(2_000, policy), None);
    }

    #[test]
    fn test_clear_always_reports() {
        let policy = SearchPolicy::Throttle { interval_ms: 300 };
        let mut search = SearchState::new();
        search.set("b".into(), 0, policy);
        search.set("ba".into(), 10, policy);
        assert_eq!(search.clear(20), "");
        assert!(!search.is_pending());
        assert_eq!(search.term(), "");
    }
}
