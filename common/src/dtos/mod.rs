//! Wire representations of the whiteboard backend resources
//!
//! Field names follow the backend JSON schema exactly. Nothing is validated on
//! decode besides the JSON structure itself: converting to domain entities is
//! the job of the sync client.

pub mod anchor;
pub mod encoding;
pub mod group;
pub mod hash_message;
pub mod post_it;
pub mod revision_metadata;
pub mod swipe;

pub use encoding::{DtoEncodingError, JsonDto};
