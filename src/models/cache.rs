use crate::models::place::PlaceSummary;

/// The single in-memory cache slot of an execution context.
///
/// It lives as long as the process (a warm Lambda container) and is empty
/// after a cold start. Each instance keeps its own copy; nothing is shared
/// between instances. Stale data is only ever overwritten, never purged.
#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    pub timestamp: u64,
    pub data: Option<PlaceSummary>,
}

impl CacheEntry {
    /// Returns the cached summary if it is younger than `max_age` seconds at `now`.
    pub fn fresh(&self, now: u64, max_age: u64) -> Option<&PlaceSummary> {
        self.data
            .as_ref()
            .filter(|_| now.saturating_sub(self.timestamp) < max_age)
    }

    pub fn store(&mut self, now: u64, data: PlaceSummary) {
        self.timestamp = now;
        self.data = Some(data);
    }
}
