use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

use super::{revision_metadata::RevisionMetadataDto, JsonDto};

/// A spatial anchor registered under a group, as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnchorDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub anchor_id: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(flatten)]
    pub revision: RevisionMetadataDto,
}

/// Body of `GET /anchors/{group_name}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnchorsResponseDto {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub anchors: Vec<AnchorDto>,
}

/// Body of `POST /anchor`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewAnchorDto {
    pub anchor_id: String,
    pub owner: String,
}

impl JsonDto for AnchorDto {}
impl JsonDto for AnchorsResponseDto {}
impl JsonDto for NewAnchorDto {}
