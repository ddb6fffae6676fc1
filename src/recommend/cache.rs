use crate::types::Track;

/// How long a computed recommendation batch stays valid.
pub const CACHE_TTL_SECS: u64 = 600;

/// Single-entry cache over the most recent recommendation batch.
///
/// Holds exactly one list plus the timestamp it was computed at; a store
/// replaces the previous content wholesale, there is no partial refresh.
/// Empty results are never cached so a failed fetch does not shadow a later
/// successful one. All access happens from the single discover task, so no
/// synchronization is needed.
#[derive(Debug, Clone, Default)]
pub struct RecommendationCache {
    tracks: Vec<Track>,
    fetched_at: Option<u64>,
}

impl RecommendationCache {
    /// Returns the cached list while it is non-empty and younger than
    /// [`CACHE_TTL_SECS`]; `None` means the caller has to fetch.
    pub fn fresh(&self, now: u64) -> Option<&[Track]> {
        let fetched_at = self.fetched_at?;
        if self.tracks.is_empty() {
            return None;
        }
        if now.saturating_sub(fetched_at) < CACHE_TTL_SECS {
            Some(&self.tracks)
        } else {
            None
        }
    }

    /// Replaces the cache content. Empty batches are ignored so the previous
    /// entry keeps serving until its TTL runs out.
    pub fn store(&mut self, tracks: Vec<Track>, now: u64) {
        if tracks.is_empty() {
            return;
        }
        self.tracks = tracks;
        self.fetched_at = Some(now);
    }

    pub fn invalidate(&mut self) {
        self.tracks.clear();
        self.fetched_at = None;
    }

    pub fn age(&self, now: u64) -> Option<u64> {
        self.fetched_at.map(|at| now.saturating_sub(at))
    }
}
