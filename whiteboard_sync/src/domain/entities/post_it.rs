use common::dtos::post_it::{PoseDto, PostItDto, PostItUploadDto};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostItContentType {
    #[default]
    Text,
    Media,
}

impl PostItContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostItContentType::Text => "text",
            PostItContentType::Media => "media",
        }
    }
}

/// Anything but `"media"` is a text post-it
impl From<&str> for PostItContentType {
    fn from(value: &str) -> Self {
        match value {
            "media" => PostItContentType::Media,
            _ => PostItContentType::Text,
        }
    }
}

/// Placement of a post-it in the physical space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: [f64; 3],
    pub orientation: [f64; 4],
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: [0.0, 0.0, 0.0],
        orientation: [1.0, 0.0, 0.0, 0.0],
    };
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Pose> for PoseDto {
    fn from(value: Pose) -> Self {
        PoseDto {
            position: value.position.to_vec(),
            orientation: value.orientation.to_vec(),
        }
    }
}

/// Components with an unexpected length fall back to the identity ones
impl From<PoseDto> for Pose {
    fn from(value: PoseDto) -> Self {
        Pose {
            position: value
                .position
                .try_into()
                .unwrap_or(Pose::IDENTITY.position),
            orientation: value
                .orientation
                .try_into()
                .unwrap_or(Pose::IDENTITY.orientation),
        }
    }
}

/// A virtual sticky note anchored in the physical space
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct PostIt {
    /// Assigned by the backend, `None` until the post-it has been stored
    #[builder(default, setter(strip_option, into))]
    pub id: Option<String>,

    #[builder(default, setter(into))]
    pub anchor_id: String,

    #[builder(setter(into))]
    pub owner: String,

    #[builder(setter(into))]
    pub title: String,

    #[builder(default)]
    pub content_type: PostItContentType,

    #[builder(default, setter(into))]
    pub content: String,

    #[builder(default, setter(into))]
    pub color: String,

    #[builder(default, setter(strip_option))]
    pub pose: Option<Pose>,

    #[builder(default, setter(strip_option))]
    pub scale: Option<[f64; 3]>,
}

impl From<&PostIt> for PostItUploadDto {
    fn from(value: &PostIt) -> Self {
        PostItUploadDto {
            id: value.id.clone(),
            anchor_id: value.anchor_id.clone(),
            owner: value.owner.clone(),
            title: value.title.clone(),
            content_type: value.content_type.as_str().to_string(),
            content: value.content.clone(),
            color: value.color.clone(),
            pose: value.pose.unwrap_or_default().into(),
            scale: value.scale.map(|scale| scale.to_vec()).unwrap_or_default(),
        }
    }
}

/// Never fails: a missing pose is the identity pose, a missing or malformed scale is no scale
impl From<PostItDto> for PostIt {
    fn from(value: PostItDto) -> Self {
        PostIt {
            id: value.id,
            anchor_id: value.anchor_id.unwrap_or_default(),
            owner: value.owner.unwrap_or_default(),
            title: value.title.unwrap_or_default(),
            content_type: value
                .content_type
                .as_deref()
                .map(PostItContentType::from)
                .unwrap_or_default(),
            content: value.content.unwrap_or_default(),
            color: value.color.unwrap_or_default(),
            pose: Some(value.pose.map(Pose::from).unwrap_or_default()),
            scale: value.scale.and_then(|scale| scale.try_into().ok()),
        }
    }
}
