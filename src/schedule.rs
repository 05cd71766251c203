use datepick::{Deferred, DeferredAction};
use std::time::{Duration, Instant};

/// Deferred picker actions waiting for their delay to elapse
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Deferrals(Vec<(Instant, DeferredAction)>);

impl Deferrals {
    pub(crate) fn new() -> Deferrals {
        Deferrals::default()
    }

    pub(crate) fn schedule(&mut self, now: Instant, deferred: Deferred) {
        let due = now.checked_add(deferred.delay).unwrap_or(now);
        self.0.push((due, deferred.action));
    }

    /// Returns how long until the next action is due, or `None` if nothing is
    /// scheduled
    pub(crate) fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.0
            .iter()
            .map(|&(due, _)| due.saturating_duration_since(now))
            .min()
    }

    /// Removes & returns the actions that are due at `now`, earliest first
    pub(crate) fn take_due(&mut self, now: Instant) -> Vec<DeferredAction> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.0)
            .into_iter()
            .partition(|&(at, _)| at <= now);
        self.0 = waiting;
        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, action)| action).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
