use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;

/// Bookkeeping fields added by the backend document store to every persisted resource
///
/// `_ts` is a number on post-its and groups but a string on anchors, both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RevisionMetadataDto {
    #[serde(rename = "_rid", default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,

    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(rename = "_attachments", default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<String>,

    #[serde(
        rename = "_ts",
        default,
        deserialize_with = "deserialize_option_number_from_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ts: Option<i64>,
}
