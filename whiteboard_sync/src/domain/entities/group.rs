use common::dtos::{group::GroupDto, revision_metadata::RevisionMetadataDto};

/// Backend bookkeeping kept along a group, never interpreted by the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionMetadata {
    pub resource_id: Option<String>,
    pub self_link: Option<String>,
    pub etag: Option<String>,
    pub attachments: Option<String>,
    pub timestamp: Option<i64>,
}

impl From<RevisionMetadataDto> for RevisionMetadata {
    fn from(value: RevisionMetadataDto) -> Self {
        Self {
            resource_id: value.rid,
            self_link: value.self_link,
            etag: value.etag,
            attachments: value.attachments,
            timestamp: value.ts,
        }
    }
}

/// A named collaboration session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub group_name: String,
    /// Members, in the order they joined
    pub users: Vec<String>,
    pub revision: RevisionMetadata,
}

impl From<GroupDto> for Group {
    fn from(value: GroupDto) -> Self {
        Self {
            id: value.id.unwrap_or_default(),
            group_name: value.group_name.unwrap_or_default(),
            users: value.users.unwrap_or_default(),
            revision: value.revision.into(),
        }
    }
}
