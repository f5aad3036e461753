use crate::helpers::spawn_app;
use serde_json::json;
use whiteboard_sync::domain::services::change_detector::TrackedResource;

#[tokio::test(flavor = "multi_thread")]
async fn an_unchanged_post_its_hash_only_triggers_one_refresh() {
    // Arranges
    let app = spawn_app().await;
    app.backend
        .respond_json("GET", "/postitsHash", json!({ "hash": "abc" }));

    // Acts
    let first = app.sync_client.should_refresh_post_its().await;
    let second = app.sync_client.should_refresh_post_its().await;

    // Asserts
    assert!(first);
    assert!(!second);
    assert_eq!(
        app.sync_client
            .change_detector()
            .tracker(TrackedResource::PostIts)
            .last_hash(),
        Some("abc".to_string())
    );
    assert_eq!(app.backend.received("GET", "/postitsHash").len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn a_new_anchors_hash_triggers_a_refresh() {
    // Arranges
    let app = spawn_app().await;
    app.backend
        .respond_json("GET", "/anchorsHash", json!({ "hash": "v1" }));
    assert!(app.sync_client.should_refresh_anchors().await);

    // Acts
    app.backend
        .respond_json("GET", "/anchorsHash", json!({ "hash": "v2" }));

    // Asserts
    assert!(app.sync_client.should_refresh_anchors().await);
    assert!(!app.sync_client.should_refresh_anchors().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn reset_forces_a_refresh_of_both_collections() {
    // Arranges
    let app = spawn_app().await;
    app.backend
        .respond_json("GET", "/postitsHash", json!({ "hash": "p" }));
    app.backend
        .respond_json("GET", "/anchorsHash", json!({ "hash": "a" }));
    assert!(app.sync_client.should_refresh_post_its().await);
    assert!(app.sync_client.should_refresh_anchors().await);

    // Acts
    app.sync_client.reset();

    // Asserts
    assert!(app.sync_client.should_refresh_post_its().await);
    assert!(app.sync_client.should_refresh_anchors().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn a_missing_hash_is_not_a_change_and_keeps_the_stored_one() {
    // Arranges
    let app = spawn_app().await;
    app.backend
        .respond_json("GET", "/postitsHash", json!({ "hash": "abc" }));
    assert!(app.sync_client.should_refresh_post_its().await);

    // Acts
    app.backend.respond("GET", "/postitsHash", 500, "boom");
    let refresh = app.sync_client.should_refresh_post_its().await;

    // Asserts
    assert!(!refresh);
    assert_eq!(app.sync_client.get_post_its_hash().await, None);
    assert_eq!(
        app.sync_client
            .change_detector()
            .tracker(TrackedResource::PostIts)
            .last_hash(),
        Some("abc".to_string())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn hashes_can_be_read_without_being_stored() {
    // Arranges
    let app = spawn_app().await;
    app.backend
        .respond_json("GET", "/anchorsHash", json!({ "hash": "h" }));

    // Acts
    let hash = app.sync_client.get_anchors_hash().await;

    // Asserts
    assert_eq!(hash, Some("h".to_string()));
    assert!(app.sync_client.should_refresh_anchors().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn after_a_reset_an_unavailable_hash_is_still_not_a_change() {
    // Arranges
    let app = spawn_app().await;
    app.backend
        .respond_json("GET", "/anchorsHash", json!({ "hash": "a1" }));
    assert!(app.sync_client.should_refresh_anchors().await);
    app.sync_client.reset();

    // Acts
    app.backend.respond("GET", "/anchorsHash", 503, "unavailable");
    let refresh = app.sync_client.should_refresh_anchors().await;

    // Asserts
    assert!(!refresh);
    app.backend
        .respond_json("GET", "/anchorsHash", json!({ "hash": "a1" }));
    assert!(app.sync_client.should_refresh_anchors().await);
}
