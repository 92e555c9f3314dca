use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use club_map::config::MapConfig;
use club_map::server::{create_router, Catalog};
use club_map::types::Club;
use serde_json::{json, Value};
use tower::ServiceExt;

const SESSION_HEADER: &str = "x-club-map-session";

fn catalog() -> Catalog {
    let clubs: Vec<Club> = serde_json::from_value(json!([
        { "id": "1", "name": "Chess Club", "school": "XYZ U", "city": "Beijing",
          "province": "北京市", "latitude": 39.9, "longitude": 116.4, "tags": ["chess"] },
        { "id": "2", "name": "<i>Tea</i>", "school": "UofT", "city": "Toronto",
          "province": "Ontario", "latitude": 43.66, "longitude": -79.39 }
    ]))
    .unwrap();
    Catalog::new(clubs.into(), MapConfig::default())
}

fn router() -> axum::Router {
    create_router(catalog(), "assets")
}

/// Load the page and return its HTML and the session id embedded in it.
async fn open_page(app: &axum::Router) -> (String, String) {
    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    let start = html.find(r#"data-session=""#).unwrap() + r#"data-session=""#.len();
    let end = start + html[start..].find('"').unwrap();
    let session = html[start..end].to_string();
    (html, session)
}

async fn post_event(app: &axum::Router, session: &str, event: Value) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/events")
                .header(header::CONTENT_TYPE, "application/json")
                .header(SESSION_HEADER, session)
                .body(Body::from(event.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn added_markers(resp: &Value) -> Vec<String> {
    resp["map"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["op"] == "add_marker")
        .map(|c| c["club_id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_index_lists_provinces() {
    let (html, session) = open_page(&router()).await;
    assert!(html.contains(r#"data-value="北京市""#));
    assert!(html.contains(r#"data-value="Ontario""#));
    assert!(html.contains("全部"));
    assert!(!session.is_empty());
}

#[tokio::test]
async fn test_health_reports_collection_size() {
    let app = router();
    open_page(&app).await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["clubs"], 2);
    assert_eq!(value["sessions"], 1);
}

#[tokio::test]
async fn test_ready_event_ships_markers() {
    let app = router();
    let (_, session) = open_page(&app).await;
    let resp = post_event(&app, &session, json!({ "type": "ready" })).await;

    assert_eq!(added_markers(&resp).len(), 2);
    assert!(resp["province_list_html"].is_string());
    assert!(resp["alert"].is_null());
}

#[tokio::test]
async fn test_search_event_renders_escaped_rows() {
    let app = router();
    let (_, session) = open_page(&app).await;
    let resp = post_event(&app, &session, json!({ "type": "search_input", "value": "tea" })).await;
    let html = resp["search_html"].as_str().unwrap();
    assert!(html.contains("&lt;i&gt;Tea"));
    assert!(!html.contains("<i>Tea"));
    assert!(resp["panel_html"].is_null());
}

#[tokio::test]
async fn test_province_event_opens_sidebar_and_filters_markers() {
    let app = router();
    let (_, session) = open_page(&app).await;
    let resp = post_event(&app, &session, json!({ "type": "province_selected", "value": "北京市" })).await;

    assert_eq!(resp["sidebar_open"], true);
    let panel = resp["panel_html"].as_str().unwrap();
    assert!(panel.contains("北京市社团 (1个)"));
    assert_eq!(added_markers(&resp), vec!["1"]);
}

#[tokio::test]
async fn test_sessions_do_not_share_filter_or_sidebar() {
    let app = router();
    let (_, first) = open_page(&app).await;
    post_event(&app, &first, json!({ "type": "province_selected", "value": "北京市" })).await;

    let (html, second) = open_page(&app).await;
    assert_ne!(first, second);
    assert!(!html.contains(r#"class="active""#));
    assert!(html.contains(r#"class="province-item active" data-event="province_selected" data-value="all""#));

    let resp = post_event(&app, &second, json!({ "type": "ready" })).await;
    assert_eq!(added_markers(&resp), vec!["1", "2"]);
    assert_eq!(resp["sidebar_open"], false);

    // The first page keeps its own filter
    let resp = post_event(&app, &first, json!({ "type": "ready" })).await;
    assert_eq!(added_markers(&resp), vec!["1"]);
    assert_eq!(resp["sidebar_open"], true);
}

#[tokio::test]
async fn test_load_failure_alerts_every_session_once() {
    let app = create_router(
        Catalog::new(Vec::<Club>::new().into(), MapConfig::default()).with_alert(Some("load failed".to_string())),
        "assets",
    );
    let (_, first) = open_page(&app).await;
    let (_, second) = open_page(&app).await;

    let resp = post_event(&app, &first, json!({ "type": "ready" })).await;
    assert_eq!(resp["alert"], "load failed");
    let resp = post_event(&app, &first, json!({ "type": "ready" })).await;
    assert!(resp["alert"].is_null());

    let resp = post_event(&app, &second, json!({ "type": "ready" })).await;
    assert_eq!(resp["alert"], "load failed");
}

#[tokio::test]
async fn test_unknown_session_is_reopened_fresh() {
    let app = router();
    let resp = post_event(&app, "6f1c2d1e-8f5a-4c3b-9a7e-2b1d0c9e8f7a", json!({ "type": "ready" })).await;
    assert_eq!(added_markers(&resp).len(), 2);
}

#[tokio::test]
async fn test_event_without_session_is_rejected() {
    let response = router()
        .oneshot(
            Request::post("/api/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"type":"ready"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_event_is_rejected() {
    let app = router();
    let (_, session) = open_page(&app).await;
    let response = app
        .oneshot(
            Request::post("/api/events")
                .header(header::CONTENT_TYPE, "application/json")
                .header(SESSION_HEADER, session)
                .body(Body::from(r#"{"type":"explode"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
