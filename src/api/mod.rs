//! # API Module
//!
//! HTTP endpoints for the local callback server that backs the interactive
//! OAuth flow:
//!
//! - [`callback`] - receives the authorization code from Spotify's redirect
//!   and completes the PKCE exchange into the shared auth state
//! - [`health`] - status endpoint returning application version, useful to
//!   verify the server came up before the browser redirect lands
//!
//! The server only runs for the duration of `echofind auth`; both handlers
//! are plain async functions wired into an axum router in `server`.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
