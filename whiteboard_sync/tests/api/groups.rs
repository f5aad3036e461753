use crate::helpers::{spawn_app, TEST_GROUP_NAME, TEST_USERNAME};
use claims::{assert_err, assert_none, assert_ok, assert_some};
use whiteboard_sync::domain::services::change_detector::TrackedResource;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn groups_are_listed_with_their_members() {
    // Arranges
    let app = spawn_app().await;
    app.backend.respond_json(
        "GET",
        "/groups",
        json!({ "groups": [
            { "id": "g1", "group_name": "lab", "users": ["alice", "bob"], "_etag": "\"1\"", "_ts": 1700000000 },
            { "id": "g2", "group_name": "museum", "users": [] }
        ] }),
    );

    // Acts
    let groups = app.sync_client.list_groups().await;

    // Asserts
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].group_name, "lab");
    assert_eq!(groups[0].users, vec!["alice".to_string(), "bob".to_string()]);
    assert_eq!(groups[0].revision.etag.as_deref(), Some("\"1\""));
    assert_eq!(groups[1].group_name, "museum");
    assert!(groups[1].users.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn joining_a_group_sends_the_username_and_makes_it_current() {
    // Arranges
    let app = spawn_app().await;
    app.backend
        .respond_json("POST", "/joingroup", json!({ "message": "joined" }));

    // Acts
    let response = app.sync_client.join_group("museum").await;

    // Asserts
    assert_ok!(response);
    let requests = app.backend.received("POST", "/joingroup");
    assert_eq!(
        requests[0].json_body(),
        json!({ "group_name": "museum", "username": TEST_USERNAME })
    );
    assert_eq!(app.sync_client.group_name(), "museum");
}

#[tokio::test(flavor = "multi_thread")]
async fn a_failed_join_keeps_the_current_group() {
    // Arranges
    let app = spawn_app().await;
    app.backend.respond("POST", "/joingroup", 409, "{}");

    // Acts
    let response = app.sync_client.join_group("museum").await;

    // Asserts
    assert_err!(response);
    assert_eq!(app.sync_client.group_name(), TEST_GROUP_NAME);
}

#[tokio::test(flavor = "multi_thread")]
async fn switching_group_forgets_the_anchors_hash_only() {
    // Arranges
    let app = spawn_app().await;
    let detector = app.sync_client.change_detector();
    detector.has_changed(TrackedResource::Anchors, "a1");
    detector.has_changed(TrackedResource::PostIts, "p1");

    // Acts
    app.sync_client.set_group_name(TEST_GROUP_NAME);
    let kept = detector.tracker(TrackedResource::Anchors).last_hash();
    app.sync_client.set_group_name("museum");

    // Asserts
    assert_some!(kept);
    assert_none!(detector.tracker(TrackedResource::Anchors).last_hash());
    assert_some!(detector.tracker(TrackedResource::PostIts).last_hash());
}
