use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use highlights::error::{INTERNAL_ERROR_MESSAGE, NOT_FOUND_MESSAGE};
use highlights::handler::AppState;
use highlights::model::{ErrorResponse, Highlight, seed_highlights};
use highlights::routes;
use highlights::store::{HighlightStore, IdPolicy};
use pretty_assertions::assert_eq;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;

fn seeded_app() -> Router {
    let store = HighlightStore::new(
        vec![
            Highlight::new("1", "A"),
            Highlight::new("2", "B"),
            Highlight::new("3", "C"),
        ],
        IdPolicy::Counter,
    );
    routes::app(AppState::new(store))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

async fn list(app: &Router) -> Vec<Highlight> {
    let (status, body) = send(app, empty_request("GET", "/api/highlights")).await;
    assert_eq!(status, StatusCode::OK);
    parse(&body)
}

#[tokio::test]
async fn list_returns_seed_in_order() {
    let app = routes::app(AppState::new(HighlightStore::new(seed_highlights(), IdPolicy::Counter)));
    assert_eq!(list(&app).await, seed_highlights());
}

#[tokio::test]
async fn create_returns_201_and_appends() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request("POST", "/api/highlights", json!({ "text": "New highlight text" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created: Highlight = parse(&body);
    assert_eq!(created, Highlight::new("4", "New highlight text"));
    assert_eq!(list(&app).await.last(), Some(&created));
}

#[tokio::test]
async fn create_without_text_is_accepted() {
    let app = seeded_app();
    let (status, body) = send(&app, json_request("POST", "/api/highlights", json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse::<Highlight>(&body).text, "");
}

#[tokio::test]
async fn update_replaces_text_keeping_position() {
    let app = seeded_app();
    let (status, body) = send(&app, json_request("PUT", "/api/highlights/2", json!({ "text": "t" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Highlight>(&body), Highlight::new("2", "t"));
    assert_eq!(
        list(&app).await,
        vec![Highlight::new("1", "A"), Highlight::new("2", "t"), Highlight::new("3", "C")]
    );
}

#[tokio::test]
async fn update_unknown_id_is_404_with_message() {
    let app = seeded_app();
    let (status, body) = send(&app, json_request("PUT", "/api/highlights/99", json!({ "text": "t" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse::<ErrorResponse>(&body).message, NOT_FOUND_MESSAGE);
    assert_eq!(list(&app).await.len(), 3);
}

#[tokio::test]
async fn delete_is_204_even_when_absent() {
    let app = seeded_app();

    let (status, body) = send(&app, empty_request("DELETE", "/api/highlights/2")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, empty_request("DELETE", "/api/highlights/2")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let ids: Vec<String> = list(&app).await.into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn reorder_replaces_sequence_verbatim() {
    let app = seeded_app();
    let reordered = json!({
        "reorderedHighlights": [
            { "id": "3", "text": "C" },
            { "id": "1", "text": "A" },
            { "id": "2", "text": "B" }
        ]
    });
    let (status, body) = send(&app, json_request("POST", "/api/highlights/reorder", reordered)).await;

    let expected = vec![Highlight::new("3", "C"), Highlight::new("1", "A"), Highlight::new("2", "B")];
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Vec<Highlight>>(&body), expected);
    assert_eq!(list(&app).await, expected);
}

#[tokio::test]
async fn reorder_passes_through_omissions_and_duplicates() {
    let app = seeded_app();
    let reordered = json!({
        "reorderedHighlights": [
            { "id": "2", "text": "B" },
            { "id": "2", "text": "B" }
        ]
    });
    let (status, _) = send(&app, json_request("POST", "/api/highlights/reorder", reordered)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list(&app).await, vec![Highlight::new("2", "B"), Highlight::new("2", "B")]);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let app = seeded_app();
    let (_, body) = send(&app, json_request("POST", "/api/highlights", json!({ "text": "New highlight text" }))).await;
    assert_eq!(parse::<Highlight>(&body).id, "4");

    send(&app, empty_request("DELETE", "/api/highlights/2")).await;

    let (_, body) = send(&app, json_request("POST", "/api/highlights", json!({ "text": "X" }))).await;
    assert_eq!(parse::<Highlight>(&body).id, "5");
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let app = seeded_app();
    let (status, body) = send(&app, empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Value>(&body), json!({ "status": "ok" }));
}

#[tokio::test]
async fn panicking_handler_becomes_generic_500() {
    async fn boom() -> &'static str {
        panic!("store exploded")
    }
    let app = routes::with_middleware(Router::new().route("/boom", get(boom)));

    let (status, body) = send(&app, empty_request("GET", "/boom")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse::<ErrorResponse>(&body).message, INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let app = seeded_app();
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/highlights")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

fn raw_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn reorder_with_max_numeric_id_keeps_service_up() {
    let app = seeded_app();
    let max = u64::MAX.to_string();
    let reordered = json!({ "reorderedHighlights": [{ "id": max.clone(), "text": "x" }] });

    let (status, _) = send(&app, json_request("POST", "/api/highlights/reorder", reordered)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, json_request("POST", "/api/highlights", json!({ "text": "after" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Highlight = parse(&body);
    assert_ne!(created.id, max);

    let ids: Vec<String> = list(&app).await.into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![max, created.id]);
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let app = seeded_app();
    let (status, body) = send(&app, raw_json_request("POST", "/api/highlights", "{not json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse::<ErrorResponse>(&body).message, INTERNAL_ERROR_MESSAGE);
    assert_eq!(list(&app).await.len(), 3);
}

#[tokio::test]
async fn mistyped_text_gets_json_error() {
    let app = seeded_app();
    let (status, body) = send(&app, raw_json_request("PUT", "/api/highlights/1", r#"{"text":5}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse::<ErrorResponse>(&body).message, INTERNAL_ERROR_MESSAGE);
    assert_eq!(list(&app).await[0], Highlight::new("1", "A"));
}

#[tokio::test]
async fn reorder_without_list_key_is_rejected_and_keeps_collection() {
    let app = seeded_app();
    let (status, body) = send(&app, json_request("POST", "/api/highlights/reorder", json!({}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse::<ErrorResponse>(&body).message, INTERNAL_ERROR_MESSAGE);
    assert_eq!(list(&app).await.len(), 3);
}
