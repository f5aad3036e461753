use serde::{Deserialize, Serialize};

use super::{post_it::PostItDto, JsonDto};

/// Body of `GET /hasSwipe/{username}`
///
/// `hasSwipe` is a string, not a boolean.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SwipeDto {
    #[serde(rename = "hasSwipe", default)]
    pub has_swipe: Option<String>,
    #[serde(rename = "postIt", default)]
    pub post_it: Option<PostItDto>,
}

impl SwipeDto {
    /// Only the literal `"true"` flags a pending swipe
    pub fn is_pending(&self) -> bool {
        self.has_swipe.as_deref() == Some("true")
    }
}

impl JsonDto for SwipeDto {}
