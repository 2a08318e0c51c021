use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_db, Db};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADVERTISING: &str = "/v1/breeders/b1/poultries/p1/advertisings/a1";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header("X-Cig-Token", token);
    }
    builder.body(body.to_string()).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- home ---

#[tokio::test]
async fn home_returns_four_collections() {
    let resp = app().oneshot(get("/v1/home")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], true);
    for key in ["femaleChickens", "maleChickens", "matrixes", "reproductives"] {
        assert!(body[key].is_array(), "{key} should be an array");
    }
}

// --- search ---

#[tokio::test]
async fn search_without_filters_returns_first_page() {
    let resp = app().oneshot(get("/v1/search")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["pages"], 2);
    assert_eq!(body["advertisings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_filters_by_keyword() {
    let resp = app()
        .oneshot(get("/v1/search?keyword=caipira&favoriteIds=&page=0"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let ids: Vec<&str> = body["advertisings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ad| ad["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a2", "a4"]);
    assert_eq!(body["pages"], 1);
}

#[tokio::test]
async fn search_rejects_bad_page() {
    let resp = app().oneshot(get("/v1/search?page=abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- identity-bearing routes ---

#[tokio::test]
async fn question_without_token_returns_401() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            &format!("{ADVERTISING}/questions"),
            None,
            r#"{"question":{"content":"hi"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(resp).await,
        json!({ "ok": false, "message": "missing token" })
    );
}

#[tokio::test]
async fn deal_with_non_positive_value_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            &format!("{ADVERTISING}/deals"),
            Some("tok"),
            r#"{"deal":{"value":0}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "invalid deal value");
}

#[tokio::test]
async fn deal_with_fractional_value_is_accepted() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            &format!("{ADVERTISING}/deals"),
            Some("tok"),
            r#"{"deal":{"value":0.5}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["deal"]["value"], 0.5);
}

#[tokio::test]
async fn deal_is_returned_inside_envelope() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            &format!("{ADVERTISING}/deals"),
            Some("tok"),
            r#"{"deal":{"value":100}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["deal"]["value"], 100);
    assert_eq!(body["deal"]["advertisingId"], "a1");
    assert!(body["deal"]["id"].is_string());
}

#[tokio::test]
async fn removing_unknown_favorite_returns_404() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("{ADVERTISING}/favorites/nope"))
                .header("X-Cig-Token", "tok")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn answer_to_unknown_question_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            &format!("{ADVERTISING}/questions/q-missing/answers"),
            Some("tok"),
            r#"{"answer":{"content":"yes"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- favorite lifecycle and recording ---

#[tokio::test]
async fn favorite_lifecycle_is_recorded() {
    use tower::Service;

    let db = Db::default();
    let mut app = app_with_db(db.clone()).into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("{ADVERTISING}/favorites"),
            Some("tok"),
            "{}",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let favorite_id = body_json(resp).await["favorite"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // remove
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("{ADVERTISING}/favorites/{favorite_id}"))
                .header("X-Cig-Token", "tok")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // remove again: gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("{ADVERTISING}/favorites/{favorite_id}"))
                .header("X-Cig-Token", "tok")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let store = db.read().await;
    assert_eq!(store.requests.len(), 3);
    assert_eq!(store.requests[0].method, "POST");
    assert_eq!(store.requests[0].body, Some(json!({})));
    assert_eq!(store.requests[1].method, "DELETE");
    assert_eq!(
        store.requests[1].path,
        format!("{ADVERTISING}/favorites/{favorite_id}")
    );
    assert!(store
        .requests
        .iter()
        .all(|r| r.token.as_deref() == Some("tok")));
    assert!(store.favorites.is_empty());
}

#[tokio::test]
async fn question_then_answer() {
    use tower::Service;

    let db = Db::default();
    let mut app = app_with_db(db.clone()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("{ADVERTISING}/questions"),
            Some("tok"),
            r#"{"question":{"content":"Vaccinated?"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let question_id = body_json(resp).await["question"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("{ADVERTISING}/questions/{question_id}/answers"),
            Some("tok"),
            r#"{"answer":{"content":"Yes"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let store = db.read().await;
    assert_eq!(
        store.questions[&question_id]["answers"],
        json!([{ "content": "Yes" }])
    );
}

#[tokio::test]
async fn request_headers_are_recorded_lowercase() {
    let db = Db::default();
    let resp = app_with_db(db.clone())
        .oneshot(json_request(
            "POST",
            &format!("{ADVERTISING}/favorites"),
            Some("tok"),
            "{}",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let store = db.read().await;
    let headers = &store.requests[0].headers;
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["x-cig-token"], "tok");
}
