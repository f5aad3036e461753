use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

use super::{revision_metadata::RevisionMetadataDto, JsonDto};

/// A collaboration group and its members
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GroupDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub users: Option<Vec<String>>,
    #[serde(flatten)]
    pub revision: RevisionMetadataDto,
}

/// Body of `GET /groups`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GroupsResponseDto {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub groups: Vec<GroupDto>,
}

/// Body of `POST /joingroup`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JoinGroupDto {
    pub group_name: String,
    pub username: String,
}

impl JsonDto for GroupDto {}
impl JsonDto for GroupsResponseDto {}
impl JsonDto for JoinGroupDto {}
