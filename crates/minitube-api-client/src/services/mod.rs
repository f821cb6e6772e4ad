//! Domain methods for the Minitube API client.
//!
//! Each module adds an `impl ApiClient` block for one backend area. All calls are
//! thin pass-throughs: no caching and no retries.

pub mod admin;
pub mod auth;
pub mod channels;
pub mod comments;
pub mod playlists;
pub mod videos;
