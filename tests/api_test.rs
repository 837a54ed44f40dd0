//! REST API integration tests.
//!
//! Each test builds the axum router over a seeded store and sends real HTTP
//! requests through it with `tower::ServiceExt`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt; // for `.oneshot()`

use corpusd::http::{create_router, AppState};
use corpusd::stemming::{SnowballStemmer, Stemmer};
use corpusd::store::{CorpusStore, MemoryStore, SledStore};
use corpusd::ClassificationObject;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn router(store: Arc<dyn CorpusStore>) -> Router {
    create_router(AppState::new(store, Arc::new(SnowballStemmer::english())))
}

/// Documents modified `minutes_ago` minutes before now
fn aged(id: i64, minutes_ago: i64) -> ClassificationObject {
    ClassificationObject::new(id).with_last_modified(Utc::now() - Duration::minutes(minutes_ago))
}

fn seeded_store() -> Arc<MemoryStore> {
    let stemmer = SnowballStemmer::english();
    Arc::new(MemoryStore::with_objects([
        aged(1, 30).with_keywords(["running", "cats"], &stemmer),
        aged(2, 10).with_keywords(["cats"], &stemmer),
        aged(3, 20),
        aged(4, 5).with_tags(["funny", "odd"]),
        aged(5, 15).with_tags(["funny"]),
        aged(6, 25).with_tags(["odd", "sad"]).with_field("url", "http://example.com/6"),
    ]))
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, content_type, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request(Method::GET, uri)).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// GET /corpus
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_defaults_to_untagged_newest_first() {
    let app = router(seeded_store());
    let (status, content_type, body) = send(&app, request(Method::GET, "/corpus")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(ids(&body), vec![2, 3, 1]);
}

#[tokio::test]
async fn list_respects_limit() {
    let app = router(seeded_store());
    let (status, body) = get_json(&app, "/corpus?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 3]);

    let (_, body) = get_json(&app, "/corpus?limit=0").await;
    assert_eq!(ids(&body), Vec::<i64>::new());
}

#[tokio::test]
async fn list_rejects_non_integer_limit() {
    let app = router(seeded_store());
    for uri in ["/corpus?limit=ten", "/corpus?limit=", "/corpus?limit=2.5"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn list_tagged_returns_only_tagged() {
    let app = router(seeded_store());
    let (_, body) = get_json(&app, "/corpus?tagged=true").await;
    assert_eq!(ids(&body), vec![4, 5, 6]);

    let (_, body) = get_json(&app, "/corpus?tagged=false").await;
    assert_eq!(ids(&body), vec![2, 3, 1]);
}

#[tokio::test]
async fn list_by_tags_requires_all() {
    let app = router(seeded_store());
    let (_, body) = get_json(&app, "/corpus?tags=funny,odd").await;
    assert_eq!(ids(&body), vec![4]);

    let (_, body) = get_json(&app, "/corpus?tags=ODD").await;
    assert_eq!(ids(&body), vec![4, 6]);
}

#[tokio::test]
async fn tags_override_tagged_flag() {
    let app = router(seeded_store());
    let (_, body) = get_json(&app, "/corpus?tags=funny&tagged=0").await;
    assert_eq!(ids(&body), vec![4, 5]);
}

#[tokio::test]
async fn list_by_keywords_stems_terms() {
    let app = router(seeded_store());
    let (_, body) = get_json(&app, "/corpus?keywords=Cat").await;
    assert_eq!(ids(&body), vec![2, 1]);

    let (_, body) = get_json(&app, "/corpus?keywords=runs,CATS").await;
    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn keywords_combine_with_tag_filters() {
    let stemmer = SnowballStemmer::english();
    let store = Arc::new(MemoryStore::with_objects([
        aged(1, 30).with_keywords(["cats"], &stemmer),
        aged(2, 20).with_keywords(["cats"], &stemmer).with_tags(["funny"]),
        aged(3, 10).with_keywords(["cats"], &stemmer).with_tags(["odd"]),
    ]));
    let app = router(store);

    let (_, body) = get_json(&app, "/corpus?keywords=cats").await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = get_json(&app, "/corpus?keywords=cats&tags=funny").await;
    assert_eq!(ids(&body), vec![2]);

    let (_, body) = get_json(&app, "/corpus?keywords=cats&tagged=true").await;
    assert_eq!(ids(&body), vec![3, 2]);
}

#[tokio::test]
async fn list_with_no_match_is_empty_array() {
    let app = router(seeded_store());
    let (status, body) = get_json(&app, "/corpus?tags=nonexistent").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_serializes_dictionary_projection() {
    let app = router(seeded_store());
    let (_, body) = get_json(&app, "/corpus?tags=sad").await;
    let doc = &body[0];
    assert_eq!(doc["id"], 6);
    assert_eq!(doc["tags"], json!(["odd", "sad"]));
    assert_eq!(doc["url"], "http://example.com/6");
    assert!(doc["last_modified"].as_str().unwrap().contains('T'));
}

// ---------------------------------------------------------------------------
// PUT /corpus
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_tags() {
    let store = seeded_store();
    let app = router(store.clone());

    let (status, content_type, body) =
        send(&app, request(Method::PUT, "/corpus?id=5&tags=Funny,Weird")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        json!({"success": true, "message": "Updated document with id 5", "tags": ["funny", "weird"]})
    );

    let stored = store.find_by_id(5).unwrap().unwrap();
    assert_eq!(stored.tag_list(), ["funny", "weird"]);
}

#[tokio::test]
async fn update_moves_document_to_front() {
    let store = seeded_store();
    let app = router(store.clone());

    send(&app, request(Method::PUT, "/corpus?id=1&tags=late")).await;
    let (_, body) = get_json(&app, "/corpus?tagged=1").await;
    assert_eq!(ids(&body)[0], 1);
}

#[tokio::test]
async fn update_accepts_form_body() {
    let store = seeded_store();
    let app = router(store.clone());

    let req = Request::builder()
        .method(Method::PUT)
        .uri("/corpus?id=3")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("tags=funny"))
        .unwrap();
    let (status, _, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.find_by_id(3).unwrap().unwrap().tag_list(), ["funny"]);
}

#[tokio::test]
async fn update_without_tags_stores_null() {
    let store = seeded_store();
    let app = router(store.clone());

    let (status, _, body) = send(&app, request(Method::PUT, "/corpus?id=4")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["tags"].is_null());
    assert_eq!(store.find_by_id(4).unwrap().unwrap().tags, None);

    // A null tag field is neither untagged nor carrying any tag
    let (_, untagged) = get_json(&app, "/corpus").await;
    assert!(!ids(&untagged).contains(&4));
    let (_, tagged) = get_json(&app, "/corpus?tagged=1").await;
    assert!(ids(&tagged).contains(&4));
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let store = seeded_store();
    let before = store.find(&Default::default(), 100, Default::default()).unwrap();
    let app = router(store.clone());

    let (status, _, body) = send(&app, request(Method::PUT, "/corpus?id=999&tags=x")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Could not find document with id 999");

    let after = store.find(&Default::default(), 100, Default::default()).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn update_requires_integer_id() {
    let app = router(seeded_store());
    for uri in ["/corpus?tags=a", "/corpus?id=abc&tags=a"] {
        let (status, _, _) = send(&app, request(Method::PUT, uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

// ---------------------------------------------------------------------------
// DELETE /corpus
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_existing_document() {
    let store = seeded_store();
    let app = router(store.clone());

    let (status, content_type, body) = send(&app, request(Method::DELETE, "/corpus?id=3")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert_eq!(String::from_utf8(body).unwrap(), "Document id 3 successfully deleted");
    assert!(store.find_by_id(3).unwrap().is_none());
}

#[tokio::test]
async fn delete_with_matching_tags_removes() {
    let store = seeded_store();
    let app = router(store.clone());

    let (status, _, _) = send(&app, request(Method::DELETE, "/corpus?id=4&tags=ODD,funny")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.find_by_id(4).unwrap().is_none());
}

#[tokio::test]
async fn delete_with_mismatched_tags_succeeds_without_removing() {
    let store = seeded_store();
    let app = router(store.clone());

    let (status, _, body) = send(&app, request(Method::DELETE, "/corpus?id=4&tags=funny")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Document id 4 successfully deleted");
    assert!(store.find_by_id(4).unwrap().is_some());
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let app = router(seeded_store());
    let (status, _, body) = send(&app, request(Method::DELETE, "/corpus?id=999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Could not find document with id 999");
}

#[tokio::test]
async fn delete_requires_integer_id() {
    let app = router(seeded_store());
    let (status, _, _) = send(&app, request(Method::DELETE, "/corpus?id=x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// GET /corpus/tags
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tags_are_distinct() {
    let store = Arc::new(MemoryStore::with_objects([
        ClassificationObject::new(1).with_tags(["a"]),
        ClassificationObject::new(2).with_tags(["a", "b"]),
        ClassificationObject::new(3),
    ]));
    let app = router(store);

    let (status, content_type, body) = send(&app, request(Method::GET, "/corpus/tags")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"tags": ["a", "b"]}));
}

#[tokio::test]
async fn tags_reflect_updates() {
    let app = router(seeded_store());
    send(&app, request(Method::PUT, "/corpus?id=1&tags=new")).await;
    send(&app, request(Method::DELETE, "/corpus?id=6")).await;

    let (_, body) = get_json(&app, "/corpus/tags").await;
    assert_eq!(body, json!({"tags": ["funny", "new", "odd"]}));
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_routes_and_methods() {
    let app = router(seeded_store());
    let (status, _, _) = send(&app, request(Method::GET, "/elsewhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, request(Method::POST, "/corpus")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Sled-backed end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sled_store_round_trip_through_api() {
    let tmp = TempDir::new().unwrap();
    let stemmer = SnowballStemmer::english();
    let store: Arc<dyn CorpusStore> = Arc::new(SledStore::open(tmp.path()).unwrap());
    store.save(&aged(10, 3).with_keywords(["elections"], &stemmer)).unwrap();
    store.save(&aged(11, 1).with_tags(["politics"])).unwrap();
    let app = router(store.clone());

    let (_, body) = get_json(&app, "/corpus?keywords=Election").await;
    assert_eq!(ids(&body), vec![10]);
    assert_eq!(stemmer.stem("election"), body[0]["stemmed_keywords"][0]);

    let (status, _, _) = send(&app, request(Method::PUT, "/corpus?id=10&tags=politics,news")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_json(&app, "/corpus?tags=politics").await;
    assert_eq!(ids(&body), vec![10, 11]);

    let (_, body) = get_json(&app, "/corpus/tags").await;
    assert_eq!(body, json!({"tags": ["news", "politics"]}));

    let (status, _, _) = send(&app, request(Method::DELETE, "/corpus?id=11")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.find_by_id(11).unwrap().is_none());
}
