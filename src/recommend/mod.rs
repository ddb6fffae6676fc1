//! # Recommendation Module
//!
//! Everything between the user's judged history and the next batch of
//! candidate tracks lives here:
//!
//! - [`SeedSet`] - capped seed assembly (tracks, artists, one genre; five
//!   random genres as the cold-start fallback)
//! - [`TargetFeatures`] - arithmetic-mean audio-feature targets, dropped
//!   when they fall outside the unit range
//! - [`RecommendationCache`] - single-entry, ten-minute cache over the
//!   assembled candidate list
//! - [`SessionContext`] - per-run presented-track bookkeeping plus the cache
//! - `engine` - the async pipeline wiring the above to the Spotify client
//!
//! Seed assembly, targets, cache and session are pure and synchronous so
//! they can be tested without any I/O; only the engine touches the network.

mod cache;
mod seeds;
mod session;
mod targets;

pub mod engine;

pub use cache::{CACHE_TTL_SECS, RecommendationCache};
pub use seeds::{
    FALLBACK_GENRE_SEEDS, MAX_ARTIST_SEEDS, MAX_GENRE_SEEDS, MAX_SEEDS, MAX_TRACK_SEEDS, SeedSet,
};
pub use session::SessionContext;
pub use targets::TargetFeatures;
