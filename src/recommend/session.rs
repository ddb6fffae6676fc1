use std::collections::HashSet;

use crate::recommend::RecommendationCache;

/// Per-run discovery state: which track ids have already been dealt this
/// session, plus the recommendation cache.
///
/// Deliberately not persisted: a fresh process starts with a clean slate,
/// only the liked/disliked stores survive. The context is passed explicitly
/// into the engine instead of living as global state so the pipeline can be
/// exercised without any UI attached.
#[derive(Debug, Default)]
pub struct SessionContext {
    presented: HashSet<String>,
    pub cache: RecommendationCache,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a track id as dealt. Returns `false` when it was already
    /// known, which callers can use to detect repeats.
    pub fn mark_presented(&mut self, track_id: &str) -> bool {
        self.presented.insert(track_id.to_string())
    }

    pub fn was_presented(&self, track_id: &str) -> bool {
        self.presented.contains(track_id)
    }

    pub fn presented_ids(&self) -> &HashSet<String> {
        &self.presented
    }

    pub fn presented_count(&self) -> usize {
        self.presented.len()
    }
}
