use common::dtos::anchor::{AnchorDto, NewAnchorDto};

/// A physical spatial anchor shared with the members of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAnchor {
    pub anchor_id: String,
    pub owner: String,
}

impl LocalAnchor {
    pub fn new(anchor_id: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            anchor_id: anchor_id.into(),
            owner: owner.into(),
        }
    }

    /// Anchors are published with the group they are registered under as owner
    pub fn to_new_anchor_dto(&self, group_name: &str) -> NewAnchorDto {
        NewAnchorDto {
            anchor_id: self.anchor_id.clone(),
            owner: group_name.to_string(),
        }
    }
}

impl From<AnchorDto> for LocalAnchor {
    fn from(value: AnchorDto) -> Self {
        Self {
            anchor_id: value.anchor_id.unwrap_or_default(),
            owner: value.owner.unwrap_or_default(),
        }
    }
}
