//! Data models for the Minitube API
//!
//! Wire shapes of the metadata API, organized by domain. Field names follow the
//! server's camelCase JSON.

mod admin;
mod channel;
mod comment;
mod id;
mod playlist;
mod upload;
mod user;
mod video;

// Re-export all models for convenient imports
pub use admin::*;
pub use channel::*;
pub use comment::*;
pub use id::*;
pub use playlist::*;
pub use upload::*;
pub use user::*;
pub use video::*;
