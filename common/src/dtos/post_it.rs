use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

use super::{revision_metadata::RevisionMetadataDto, JsonDto};

/// Position `[x, y, z]` and 4 components orientation of a post-it
///
/// A missing or `null` component is read as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PoseDto {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub position: Vec<f64>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub orientation: Vec<f64>,
}

/// A post-it as stored and returned by the backend
///
/// Every field may be missing or `null` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PostItDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub anchor_id: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// `"text"` or `"media"`
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub pose: Option<PoseDto>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
    #[serde(flatten)]
    pub revision: RevisionMetadataDto,
}

/// Body of `POST /postit`
///
/// Unlike `PostItDto`, the pose is always present and the scale is an empty
/// sequence when unset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PostItUploadDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub anchor_id: String,
    pub owner: String,
    pub title: String,
    pub content_type: String,
    pub content: String,
    pub color: String,
    pub pose: PoseDto,
    pub scale: Vec<f64>,
}

/// Body of `GET /postits`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PostItsResponseDto {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub postits: Vec<PostItDto>,
}

impl JsonDto for PostItDto {}
impl JsonDto for PostItUploadDto {}
impl JsonDto for PostItsResponseDto {}
