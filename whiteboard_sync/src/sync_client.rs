use common::{
    dtos::{
        anchor::AnchorsResponseDto,
        group::{GroupsResponseDto, JoinGroupDto},
        hash_message::HashMessageDto,
        post_it::{PostItUploadDto, PostItsResponseDto},
        swipe::SwipeDto,
        DtoEncodingError, JsonDto,
    },
    helper::error_chain_fmt,
};
use std::sync::{PoisonError, RwLock};
use tracing::{error, info, warn};

use crate::{
    configuration::{Settings, WriteMode},
    domain::{
        entities::{
            fetch_outcome::FetchOutcome, group::Group, local_anchor::LocalAnchor, post_it::PostIt,
        },
        services::change_detector::{ChangeDetector, TrackedResource},
    },
    repositories::backend_http_repository::{BackendHttpRepository, BackendHttpRepositoryError},
};

/// High level operations on the shared whiteboard
///
/// Reads never return an error: `fetch_*` methods describe what went wrong
/// with a `FetchOutcome`, `list_*`/`poll_*` methods log it and degrade to an
/// empty value. Mutations return a `Result` so the caller can tell whether the
/// backend took them into account.
pub struct SyncClient {
    backend: BackendHttpRepository,
    change_detector: ChangeDetector,
    username: String,
    group_name: RwLock<String>,
    post_it_write_mode: WriteMode,
}

#[derive(thiserror::Error)]
pub enum SyncClientError {
    #[error(transparent)]
    Backend(#[from] BackendHttpRepositoryError),
    #[error(transparent)]
    Encoding(#[from] DtoEncodingError),
    #[error("The post-it has no id, it has never been stored by the backend")]
    MissingPostItId,
}

impl std::fmt::Debug for SyncClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl SyncClient {
    pub fn new(
        backend: BackendHttpRepository,
        username: impl Into<String>,
        group_name: impl Into<String>,
        post_it_write_mode: WriteMode,
    ) -> Self {
        Self {
            backend,
            change_detector: ChangeDetector::new(),
            username: username.into(),
            group_name: RwLock::new(group_name.into()),
            post_it_write_mode,
        }
    }

    pub fn try_from_settings(settings: &Settings) -> Result<Self, SyncClientError> {
        let backend = BackendHttpRepository::try_new(&settings.backend)?;

        if settings.session.group_name.is_empty() {
            info!("No group configured, anchors are scoped to the empty group until one is joined");
        }

        Ok(Self::new(
            backend,
            settings.session.username.clone(),
            settings.session.group_name.clone(),
            settings.backend.post_it_write_mode,
        ))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn group_name(&self) -> String {
        self.group_name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Switching to another group forgets the anchors hash, the next check
    /// reports a change so the anchors of the new group get fetched
    pub fn set_group_name(&self, group_name: impl Into<String>) {
        let group_name = group_name.into();
        let mut current = self
            .group_name
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if *current != group_name {
            *current = group_name;
            self.change_detector
                .tracker(TrackedResource::Anchors)
                .reset();
        }
    }

    pub fn change_detector(&self) -> &ChangeDetector {
        &self.change_detector
    }

    // Change detection

    #[tracing::instrument(name = "Fetch collection hash", skip(self))]
    pub async fn fetch_hash(&self, resource: TrackedResource) -> FetchOutcome<String> {
        self.fetch_dto::<HashMessageDto>(resource.hash_path())
            .await
            .map(|message| message.hash)
    }

    pub async fn get_post_its_hash(&self) -> Option<String> {
        self.fetch_hash(TrackedResource::PostIts).await.data()
    }

    pub async fn get_anchors_hash(&self) -> Option<String> {
        self.fetch_hash(TrackedResource::Anchors).await.data()
    }

    /// Reports `true` when the collection hash is new or differs from the last one seen
    ///
    /// Without a hash from the backend there is no evidence of a change: `false`
    /// is returned and the stored hash is kept.
    #[tracing::instrument(name = "Check collection for changes", skip(self))]
    pub async fn should_refresh(&self, resource: TrackedResource) -> bool {
        match self.fetch_hash(resource).await {
            FetchOutcome::Fetched(hash) => self.change_detector.has_changed(resource, &hash),
            outcome => {
                warn!(?outcome, "No hash available, assuming no change");
                false
            }
        }
    }

    pub async fn should_refresh_post_its(&self) -> bool {
        self.should_refresh(TrackedResource::PostIts).await
    }

    pub async fn should_refresh_anchors(&self) -> bool {
        self.should_refresh(TrackedResource::Anchors).await
    }

    /// Forces the next check of both collections to report a change
    ///
    /// Unless the hash itself is unavailable then: `should_refresh` stays
    /// `false` until the backend hands out a hash again.
    pub fn reset(&self) {
        self.change_detector.reset();
    }

    // Post-its

    #[tracing::instrument(name = "Fetch post-its", skip(self))]
    pub async fn fetch_post_its(&self) -> FetchOutcome<Vec<PostIt>> {
        self.fetch_dto::<PostItsResponseDto>("/postits")
            .await
            .map(|response| {
                info!(count = response.postits.len(), "Fetched post-its");
                response.postits.into_iter().map(PostIt::from).collect()
            })
    }

    /// Post-its in the order the backend returned them
    pub async fn list_post_its(&self) -> Vec<PostIt> {
        self.fetch_post_its().await.into_data_or_default()
    }

    #[tracing::instrument(
        name = "Create post-it",
        skip(self, post_it),
        fields(post_it_id = ?post_it.id, title = %post_it.title)
    )]
    pub async fn create_post_it(&self, post_it: &PostIt) -> Result<String, SyncClientError> {
        let mut upload = PostItUploadDto::from(post_it);
        if self.post_it_write_mode == WriteMode::CreateOnly {
            upload.id = None;
        }

        let response = self
            .backend
            .post_json("/postit", upload.try_serializing()?)
            .await
            .map_err(|error| {
                error!(error = %error, "Failed to create post-it");
                error
            })?;

        info!(response = %response, "Post-it sent");
        Ok(response)
    }

    /// Returns whether the backend acknowledged the deletion
    #[tracing::instrument(name = "Delete post-it", skip(self, post_it), fields(post_it_id = ?post_it.id))]
    pub async fn delete_post_it(&self, post_it: &PostIt) -> bool {
        let Some(id) = post_it.id.as_deref() else {
            warn!(error = %SyncClientError::MissingPostItId, "Post-it not deleted");
            return false;
        };

        let path = format!("/postit/{}", urlencoding::encode(id));
        match self.backend.delete(&path).await {
            Ok(response) => {
                info!(response = %response, "Post-it deleted");
                true
            }
            Err(error) => {
                error!(error = %error, "Failed to delete post-it");
                false
            }
        }
    }

    // Anchors

    #[tracing::instrument(name = "Fetch anchors", skip(self))]
    pub async fn fetch_anchors(&self, group_name: &str) -> FetchOutcome<Vec<LocalAnchor>> {
        let path = format!("/anchors/{}", urlencoding::encode(group_name));

        self.fetch_dto::<AnchorsResponseDto>(&path)
            .await
            .map(|response| {
                info!(count = response.anchors.len(), "Fetched anchors");
                response.anchors.into_iter().map(LocalAnchor::from).collect()
            })
    }

    pub async fn list_anchors(&self, group_name: &str) -> Vec<LocalAnchor> {
        self.fetch_anchors(group_name).await.into_data_or_default()
    }

    /// Anchors of the group the client is currently in
    pub async fn list_current_anchors(&self) -> Vec<LocalAnchor> {
        let group_name = self.group_name();
        self.list_anchors(&group_name).await
    }

    /// Publishes an anchor under the current group, returns whether the backend accepted it
    #[tracing::instrument(name = "Create anchor", skip(self, anchor), fields(anchor_id = %anchor.anchor_id))]
    pub async fn create_anchor(&self, anchor: &LocalAnchor) -> bool {
        let new_anchor = anchor.to_new_anchor_dto(&self.group_name());

        let json_body = match new_anchor.try_serializing() {
            Ok(json_body) => json_body,
            Err(error) => {
                error!(error = %error, "Failed to encode anchor");
                return false;
            }
        };

        match self.backend.post_json("/anchor", json_body).await {
            Ok(response) => {
                info!(response = %response, "Anchor created");
                true
            }
            Err(error) => {
                error!(error = %error, "Failed to create anchor");
                false
            }
        }
    }

    // Swipes

    /// A swipe is pending only when the backend flag is the string `"true"`,
    /// anything else is `FetchOutcome::Empty`, even with a post-it in the body
    #[tracing::instrument(name = "Fetch swipe", skip(self))]
    pub async fn fetch_swipe(&self, username: &str) -> FetchOutcome<PostIt> {
        let path = format!("/hasSwipe/{}", urlencoding::encode(username));

        self.fetch_dto::<SwipeDto>(&path)
            .await
            .and_then(|swipe| match (swipe.is_pending(), swipe.post_it) {
                (true, Some(post_it)) => {
                    info!("New swipe available");
                    FetchOutcome::Fetched(post_it.into())
                }
                (true, None) => {
                    warn!("Swipe flagged without post-it");
                    FetchOutcome::Empty
                }
                (false, _) => FetchOutcome::Empty,
            })
    }

    pub async fn poll_swipe(&self, username: &str) -> Option<PostIt> {
        self.fetch_swipe(username).await.data()
    }

    // Groups

    #[tracing::instrument(name = "Fetch groups", skip(self))]
    pub async fn fetch_groups(&self) -> FetchOutcome<Vec<Group>> {
        self.fetch_dto::<GroupsResponseDto>("/groups")
            .await
            .map(|response| {
                info!(count = response.groups.len(), "Fetched groups");
                response.groups.into_iter().map(Group::from).collect()
            })
    }

    pub async fn list_groups(&self) -> Vec<Group> {
        self.fetch_groups().await.into_data_or_default()
    }

    /// Joins a group with the client username, the group becomes the current one on success
    #[tracing::instrument(name = "Join group", skip(self))]
    pub async fn join_group(&self, group_name: &str) -> Result<String, SyncClientError> {
        let join_group = JoinGroupDto {
            group_name: group_name.to_string(),
            username: self.username.clone(),
        };

        let response = self
            .backend
            .post_json("/joingroup", join_group.try_serializing()?)
            .await
            .map_err(|error| {
                error!(error = %error, "Failed to join group");
                error
            })?;

        self.set_group_name(group_name);
        info!(response = %response, "Group joined");
        Ok(response)
    }

    /// GETs `path` and decodes the body, logging any failure
    async fn fetch_dto<T: JsonDto>(&self, path: &str) -> FetchOutcome<T> {
        let body = match self.backend.get(path).await {
            Ok(body) => body,
            Err(error) => {
                error!(error = %error, path, "Request to the backend failed");
                return FetchOutcome::TransportError(error.to_string());
            }
        };

        let trimmed_body = body.trim();
        if trimmed_body.is_empty() || trimmed_body == "null" {
            warn!(path, "The backend answered without content");
            return FetchOutcome::Empty;
        }

        match T::try_parsing(body.as_bytes()) {
            Ok(dto) => FetchOutcome::Fetched(dto),
            Err(error) => {
                error!(error = %error, path, "Unexpected answer from the backend");
                FetchOutcome::DecodeError(error.to_string())
            }
        }
    }
}
