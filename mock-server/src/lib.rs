//! In-memory stand-in for the marketplace BFF.
//!
//! Serves the documented `/v1` routes with fixture data and records every
//! request it receives, so client tests can assert on exactly what went over
//! the wire.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const TOKEN_HEADER: &str = "x-cig-token";

/// Results per search page.
pub const PAGE_SIZE: usize = 2;

/// One request as the server saw it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    /// Header names are lowercase.
    pub headers: HashMap<String, String>,
    pub token: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub advertising_id: String,
}

#[derive(Default)]
pub struct Store {
    pub requests: Vec<RecordedRequest>,
    pub questions: HashMap<String, Value>,
    pub deals: Vec<Value>,
    pub favorites: HashMap<String, Favorite>,
}

pub type Db = Arc<RwLock<Store>>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    app_with_db(Db::default())
}

pub fn app_with_db(db: Db) -> Router {
    let advertising = "/v1/breeders/{breeder_id}/poultries/{poultry_id}/advertisings/{advertising_id}";
    Router::new()
        .route("/v1/home", get(home))
        .route("/v1/search", get(search))
        .route(&format!("{advertising}/questions"), post(post_question))
        .route(
            &format!("{advertising}/questions/{{question_id}}/answers"),
            post(post_answer),
        )
        .route(&format!("{advertising}/deals"), post(post_deal))
        .route(&format!("{advertising}/favorites"), post(post_favorite))
        .route(
            &format!("{advertising}/favorites/{{favorite_id}}"),
            delete(remove_favorite),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_db(db)).await
}

#[derive(Deserialize)]
struct AdvertisingPath {
    advertising_id: String,
}

#[derive(Deserialize)]
struct AnswerPath {
    question_id: String,
}

#[derive(Deserialize)]
struct FavoritePath {
    favorite_id: String,
}

async fn record(
    db: &Db,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    query: HashMap<String, String>,
    body: Option<Value>,
) -> Option<String> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    let headers = headers
        .iter()
        .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
        .collect();
    db.write().await.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers,
        token: token.clone(),
        body,
    });
    token
}

fn reject(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "ok": false, "message": message })))
}

fn missing_token() -> Reply {
    reject(StatusCode::UNAUTHORIZED, "missing token")
}

async fn home(State(db): State<Db>, method: Method, uri: Uri, headers: HeaderMap) -> Reply {
    record(&db, &method, &uri, &headers, HashMap::new(), None).await;
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "femaleChickens": [{ "id": "p-female-1", "name": "Pintadinha" }],
            "maleChickens": [{ "id": "p-male-1", "name": "Carijó" }],
            "matrixes": [{ "id": "p-matrix-1", "name": "Matriz" }],
            "reproductives": [
                { "id": "p-rep-1", "name": "Índio" },
                { "id": "p-rep-2", "name": "Gigante" }
            ],
        })),
    )
}

fn catalog() -> Vec<Value> {
    vec![
        json!({ "id": "a1", "title": "Galo índio gigante", "price": 300 }),
        json!({ "id": "a2", "title": "Galinha caipira", "price": 80 }),
        json!({ "id": "a3", "title": "Galo carijó", "price": 150 }),
        json!({ "id": "a4", "title": "Matriz caipira", "price": 120 }),
    ]
}

async fn search(
    State(db): State<Db>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    record(&db, &method, &uri, &headers, query.clone(), None).await;

    let keyword = query.get("keyword").map(|k| k.to_lowercase());
    let matches: Vec<Value> = catalog()
        .into_iter()
        .filter(|ad| match &keyword {
            Some(keyword) => ad["title"]
                .as_str()
                .is_some_and(|title| title.to_lowercase().contains(keyword.as_str())),
            None => true,
        })
        .collect();

    let page: usize = match query.get("page").map(|p| p.parse::<usize>()) {
        Some(Ok(page)) => page,
        Some(Err(_)) => return reject(StatusCode::BAD_REQUEST, "invalid page"),
        None => 0,
    };
    let pages = matches.len().div_ceil(PAGE_SIZE);
    let advertisings: Vec<Value> = matches
        .into_iter()
        .skip(page * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "ok": true, "advertisings": advertisings, "pages": pages })),
    )
}

async fn post_question(
    State(db): State<Db>,
    Path(path): Path<AdvertisingPath>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if record(&db, &method, &uri, &headers, HashMap::new(), Some(body.clone()))
        .await
        .is_none()
    {
        return missing_token();
    }
    let Some(mut stored) = body.get("question").filter(|q| q.is_object()).cloned() else {
        return reject(StatusCode::BAD_REQUEST, "question is required");
    };
    let id = Uuid::new_v4().to_string();
    stored["id"] = json!(id.as_str());
    stored["advertisingId"] = json!(path.advertising_id);
    db.write().await.questions.insert(id, stored.clone());
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "message": "question created", "question": stored })),
    )
}

async fn post_answer(
    State(db): State<Db>,
    Path(path): Path<AnswerPath>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if record(&db, &method, &uri, &headers, HashMap::new(), Some(body.clone()))
        .await
        .is_none()
    {
        return missing_token();
    }
    let Some(answer) = body.get("answer").cloned() else {
        return reject(StatusCode::BAD_REQUEST, "answer is required");
    };
    let mut store = db.write().await;
    let Some(question) = store.questions.get_mut(&path.question_id) else {
        return reject(StatusCode::NOT_FOUND, "question not found");
    };
    let answers = question
        .as_object_mut()
        .map(|q| q.entry("answers").or_insert_with(|| json!([])));
    if let Some(Value::Array(answers)) = answers {
        answers.push(answer);
    }
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "message": "answer created" })),
    )
}

async fn post_deal(
    State(db): State<Db>,
    Path(path): Path<AdvertisingPath>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if record(&db, &method, &uri, &headers, HashMap::new(), Some(body.clone()))
        .await
        .is_none()
    {
        return missing_token();
    }
    let Some(mut deal) = body.get("deal").filter(|d| d.is_object()).cloned() else {
        return reject(StatusCode::BAD_REQUEST, "deal is required");
    };
    if !deal["value"].as_f64().is_some_and(|value| value > 0.0) {
        return reject(StatusCode::BAD_REQUEST, "invalid deal value");
    }
    deal["id"] = json!(Uuid::new_v4().to_string());
    deal["advertisingId"] = json!(path.advertising_id);
    db.write().await.deals.push(deal.clone());
    (StatusCode::OK, Json(json!({ "ok": true, "deal": deal })))
}

async fn post_favorite(
    State(db): State<Db>,
    Path(path): Path<AdvertisingPath>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if record(&db, &method, &uri, &headers, HashMap::new(), Some(body))
        .await
        .is_none()
    {
        return missing_token();
    }
    let favorite = Favorite {
        id: Uuid::new_v4().to_string(),
        advertising_id: path.advertising_id,
    };
    db.write()
        .await
        .favorites
        .insert(favorite.id.clone(), favorite.clone());
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "favorite": favorite })),
    )
}

async fn remove_favorite(
    State(db): State<Db>,
    Path(path): Path<FavoritePath>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Reply {
    if record(&db, &method, &uri, &headers, HashMap::new(), None)
        .await
        .is_none()
    {
        return missing_token();
    }
    match db.write().await.favorites.remove(&path.favorite_id) {
        Some(_) => (StatusCode::OK, Json(json!({ "ok": true }))),
        None => reject(StatusCode::NOT_FOUND, "favorite not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_pages_round_up() {
        assert_eq!(catalog().len().div_ceil(PAGE_SIZE), 2);
    }

    #[test]
    fn reject_shapes_the_error_body() {
        let (status, Json(body)) = reject(StatusCode::BAD_REQUEST, "nope");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "ok": false, "message": "nope" }));
    }

    #[test]
    fn favorite_serializes_to_json() {
        let favorite = Favorite {
            id: "f1".to_string(),
            advertising_id: "a1".to_string(),
        };
        let json = serde_json::to_value(&favorite).unwrap();
        assert_eq!(json["id"], "f1");
        assert_eq!(json["advertising_id"], "a1");
    }
}
