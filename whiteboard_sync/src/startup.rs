use common::helper::error_chain_fmt;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc::{error::SendError, Sender},
    time::MissedTickBehavior,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};

use crate::{
    configuration::Settings,
    domain::entities::{local_anchor::LocalAnchor, post_it::PostIt},
    sync_client::{SyncClient, SyncClientError},
};

/// What the poll loop found out about the shared whiteboard
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// The post-it collection changed, here is all of it
    PostItsChanged(Vec<PostIt>),
    /// The anchor collection changed, here are the anchors of the current group
    AnchorsChanged {
        group_name: String,
        anchors: Vec<LocalAnchor>,
    },
    /// Another device swiped a post-it to this user
    SwipeReceived(PostIt),
}

/// Holds the sync client and drives it at a fixed pace
pub struct Application {
    sync_client: Arc<SyncClient>,
    poll_interval: Duration,
    poll_swipes: bool,
}

#[derive(thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    SyncClientError(#[from] SyncClientError),
}

impl std::fmt::Debug for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl Application {
    #[tracing::instrument(name = "Building sync application", skip(settings))]
    pub fn build(settings: Settings) -> Result<Self, ApplicationError> {
        let sync_client = SyncClient::try_from_settings(&settings)?;

        info!(
            username = sync_client.username(),
            group_name = %sync_client.group_name(),
            "Sync client ready"
        );

        Ok(Self {
            sync_client: Arc::new(sync_client),
            poll_interval: settings.poller.interval(),
            poll_swipes: settings.poller.poll_swipes,
        })
    }

    /// Shared handle on the client, to create/delete post-its or join groups while the loop runs
    pub fn sync_client(&self) -> Arc<SyncClient> {
        self.sync_client.clone()
    }

    /// Polls the backend every interval and sends what changed on `events`
    ///
    /// Returns when `cancel_token` is cancelled, an in-flight poll is dropped,
    /// or when nobody listens to `events` anymore.
    pub async fn run_until_stopped(
        self,
        cancel_token: CancellationToken,
        events: Sender<SyncEvent>,
    ) -> Result<(), ApplicationError> {
        info!("📡 Polling the backend until stopped");

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                _ = interval.tick() => {}
            }

            let poll = self
                .poll_once(&events)
                .instrument(info_span!("Polling the backend"));

            let result = tokio::select! {
                _ = cancel_token.cancelled() => break,
                result = poll => result,
            };

            if result.is_err() {
                info!("Event receiver dropped, stopping");
                break;
            }
        }

        info!("👋 Bye!");
        Ok(())
    }

    /// One pass over the tracked collections, then the pending swipe
    pub async fn poll_once(&self, events: &Sender<SyncEvent>) -> Result<(), SendError<SyncEvent>> {
        if self.sync_client.should_refresh_post_its().await {
            let post_its = self.sync_client.list_post_its().await;
            events.send(SyncEvent::PostItsChanged(post_its)).await?;
        }

        if self.sync_client.should_refresh_anchors().await {
            let group_name = self.sync_client.group_name();
            let anchors = self.sync_client.list_anchors(&group_name).await;
            events
                .send(SyncEvent::AnchorsChanged {
                    group_name,
                    anchors,
                })
                .await?;
        }

        if self.poll_swipes {
            let username = self.sync_client.username().to_string();
            if let Some(post_it) = self.sync_client.poll_swipe(&username).await {
                events.send(SyncEvent::SwipeReceived(post_it)).await?;
            }
        }

        Ok(())
    }
}
