//! # CLI Module
//!
//! This module provides the command-line interface layer for EchoFind. It
//! implements all user-facing commands and coordinates between the Spotify
//! client, the management layer and the recommendation engine.
//!
//! ## Command Categories
//!
//! ### Authentication & Accounts
//!
//! - [`auth`] - Interactive Spotify OAuth flow (PKCE) via a local callback server
//! - [`register`] / [`login`] / [`logout`] - Local account lifecycle; the
//!   signed-in uid partitions every per-user store
//!
//! ### Discovery
//!
//! - [`discover`] - The swipe deck: playlist tracks and seeded
//!   recommendations, dealt one preview at a time
//!
//! ### Library & Profile
//!
//! - [`songs`] / [`remove_song`] - List and prune the liked/disliked stores
//! - [`profile`] - Account identity plus lifetime interaction counters
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (user interaction, progress, tables)
//!     ↓
//! Management Layer (accounts, library, counters, token cache)
//!     ↓                         ↓
//! Recommendation Engine  →  Spotify API Layer
//!     ↓
//! Network Layer (HTTP requests)
//! ```
//!
//! ## Error Handling Philosophy
//!
//! Unrecoverable situations (no account session, no token) terminate with a
//! message pointing at the fixing command; everything else degrades to a
//! warning plus an empty result so a flaky network never kills a session.

mod account;
mod auth;
mod discover;
mod profile;
mod songs;

pub use account::login;
pub use account::logout;
pub use account::register;
pub use auth::auth;
pub use discover::discover;
pub use profile::profile;
pub use songs::remove_song;
pub use songs::songs;
