use crate::helpers::{post_it_json, spawn_poller, TEST_GROUP_NAME};
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use whiteboard_sync::startup::SyncEvent;

#[tokio::test(flavor = "multi_thread")]
async fn changed_collections_are_sent_once_per_hash() {
    // Arranges
    let (backend, application) = spawn_poller().await;
    backend.respond_json("GET", "/postitsHash", json!({ "hash": "p1" }));
    backend.respond_json("GET", "/anchorsHash", json!({ "hash": "a1" }));
    backend.respond_json(
        "GET",
        "/postits",
        json!({ "postits": [post_it_json("1", "first")] }),
    );
    backend.respond_json(
        "GET",
        "/anchors/lab",
        json!({ "anchors": [{ "anchor_id": "anchor-1", "owner": TEST_GROUP_NAME }] }),
    );
    backend.respond_json("GET", "/hasSwipe/alice", json!({ "hasSwipe": "false" }));
    let (sender, mut receiver) = mpsc::channel(8);

    // Acts
    application.poll_once(&sender).await.unwrap();
    application.poll_once(&sender).await.unwrap();
    drop(sender);

    // Asserts
    let mut events = vec![];
    while let Some(event) = receiver.recv().await {
        events.push(event);
    }
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], SyncEvent::PostItsChanged(post_its) if post_its.len() == 1));
    assert!(matches!(
        &events[1],
        SyncEvent::AnchorsChanged { group_name, anchors } if group_name == TEST_GROUP_NAME && anchors.len() == 1
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn a_pending_swipe_is_sent() {
    // Arranges
    let (backend, application) = spawn_poller().await;
    backend.respond_json(
        "GET",
        "/hasSwipe/alice",
        json!({ "hasSwipe": "true", "postIt": post_it_json("3", "for you") }),
    );
    let (sender, mut receiver) = mpsc::channel(8);

    // Acts
    application.poll_once(&sender).await.unwrap();

    // Asserts
    // The hashes are unavailable (404): no collection event
    match receiver.try_recv() {
        Ok(SyncEvent::SwipeReceived(post_it)) => assert_eq!(post_it.title, "for you"),
        other => panic!("Expected a swipe, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn the_loop_stops_when_cancelled() {
    // Arranges
    let (backend, application) = spawn_poller().await;
    backend.respond_json("GET", "/postitsHash", json!({ "hash": "p1" }));
    backend.respond_json("GET", "/postits", json!({ "postits": [] }));
    let (sender, mut receiver) = mpsc::channel(8);
    let cancel_token = CancellationToken::new();
    let handle = tokio::spawn(application.run_until_stopped(cancel_token.clone(), sender));

    // Acts
    let first_event = tokio::time::timeout(Duration::from_secs(5), receiver.recv())
        .await
        .expect("No event received in time");
    cancel_token.cancel();

    // Asserts
    assert_eq!(first_event, Some(SyncEvent::PostItsChanged(vec![])));
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("The loop did not stop in time")
        .expect("The loop panicked");
    assert!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn the_loop_stops_when_nobody_listens() {
    // Arranges
    let (backend, application) = spawn_poller().await;
    backend.respond_json("GET", "/postitsHash", json!({ "hash": "p1" }));
    backend.respond_json("GET", "/postits", json!({ "postits": [] }));
    let (sender, receiver) = mpsc::channel(8);
    drop(receiver);

    // Acts
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        application.run_until_stopped(CancellationToken::new(), sender),
    )
    .await
    .expect("The loop did not stop in time");

    // Asserts
    assert!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn joining_a_group_sends_its_anchors_on_the_next_poll() {
    // Arranges
    let (backend, application) = spawn_poller().await;
    backend.respond_json("GET", "/anchorsHash", json!({ "hash": "a1" }));
    backend.respond_json("GET", "/anchors/lab", json!({ "anchors": [] }));
    backend.respond_json(
        "GET",
        "/anchors/other",
        json!({ "anchors": [{ "anchor_id": "anchor-2", "owner": "other" }] }),
    );
    backend.respond_json("POST", "/joingroup", json!({ "message": "joined" }));
    backend.respond_json("GET", "/hasSwipe/alice", json!({ "hasSwipe": "false" }));
    let (sender, mut receiver) = mpsc::channel(8);
    application.poll_once(&sender).await.unwrap();

    // Acts
    application
        .sync_client()
        .join_group("other")
        .await
        .expect("Failed to join the group");
    application.poll_once(&sender).await.unwrap();
    drop(sender);

    // Asserts
    let mut events = vec![];
    while let Some(event) = receiver.recv().await {
        events.push(event);
    }
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        SyncEvent::AnchorsChanged { group_name, anchors } if group_name == TEST_GROUP_NAME && anchors.is_empty()
    ));
    assert!(matches!(
        &events[1],
        SyncEvent::AnchorsChanged { group_name, anchors } if group_name == "other" && anchors.len() == 1
    ));
}
