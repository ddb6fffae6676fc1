//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by
//! EchoFind: authentication, playlist tracks, audio features, artist
//! metadata and seed-based recommendations. It is the only layer that talks
//! HTTP, handling authentication headers, rate limiting and transient
//! upstream errors so the management and CLI layers never have to.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Management, Recommendation Engine)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE + client credentials)
//!     ├── Playlist Tracks (discover deck source)
//!     ├── Audio Features (recommendation targets)
//!     ├── Artist Metadata (genre seeds)
//!     └── Recommendations (seeded candidate fetch)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Error Handling
//!
//! Every call site captures its own failures and returns `reqwest::Error`
//! to the caller; `429 Too Many Requests` is honored via the `Retry-After`
//! header and `502 Bad Gateway` is retried after a fixed delay. Anything
//! else propagates immediately; higher layers decide whether a failure is
//! fatal or collapses to an empty result.

pub mod artists;
pub mod auth;
pub mod features;
pub mod playlist;
pub mod recommend;

/// Parses the `Retry-After` header of a 429 response, defaulting to one
/// second when the header is missing or malformed.
pub(crate) fn retry_after_secs(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1)
}
