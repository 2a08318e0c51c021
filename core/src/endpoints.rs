//! Request builders and response parsers for every BFF operation.
//!
//! # Design
//! Each operation is split into a `build_*` function that produces an
//! `HttpRequest` and a `parse_*` function that consumes an `HttpResponse`.
//! Neither touches the network, so both halves are deterministic and tested
//! here without a server. `MarketplaceBffClient` stitches them together.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{token_headers, HttpMethod, HttpRequest, HttpResponse};
use crate::search::SearchParams;
use crate::types::{
    AdvertisingQuestion, AdvertisingQuestionAnswer, Deal, DealEnvelope, Envelope, HomeFeed,
    SearchResult,
};

/// Identifies one advertising by its owning breeder and poultry.
///
/// Identifiers are opaque and interpolated into paths verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisingRef {
    pub breeder_id: String,
    pub poultry_id: String,
    pub advertising_id: String,
}

impl AdvertisingRef {
    pub fn new(
        breeder_id: impl Into<String>,
        poultry_id: impl Into<String>,
        advertising_id: impl Into<String>,
    ) -> Self {
        Self {
            breeder_id: breeder_id.into(),
            poultry_id: poultry_id.into(),
            advertising_id: advertising_id.into(),
        }
    }

    /// `/v1/breeders/{b}/poultries/{p}/advertisings/{a}`
    pub fn path(&self) -> String {
        format!(
            "/v1/breeders/{}/poultries/{}/advertisings/{}",
            self.breeder_id, self.poultry_id, self.advertising_id
        )
    }
}

pub const HOME_PATH: &str = "/v1/home";
pub const SEARCH_PATH: &str = "/v1/search";

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn build_post_advertising_question(
    advertising: &AdvertisingRef,
    token: &str,
    question: &AdvertisingQuestion,
) -> Result<HttpRequest, ApiError> {
    post_json(
        format!("{}/questions", advertising.path()),
        token,
        wrap("question", question)?,
    )
}

pub fn build_post_advertising_question_answer(
    advertising: &AdvertisingRef,
    question_id: &str,
    token: &str,
    answer: &AdvertisingQuestionAnswer,
) -> Result<HttpRequest, ApiError> {
    post_json(
        format!("{}/questions/{question_id}/answers", advertising.path()),
        token,
        wrap("answer", answer)?,
    )
}

pub fn build_post_deal(
    advertising: &AdvertisingRef,
    token: &str,
    deal: &Deal,
) -> Result<HttpRequest, ApiError> {
    post_json(
        format!("{}/deals", advertising.path()),
        token,
        wrap("deal", deal)?,
    )
}

pub fn build_post_favorite(advertising: &AdvertisingRef, token: &str) -> Result<HttpRequest, ApiError> {
    post_json(
        format!("{}/favorites", advertising.path()),
        token,
        Value::Object(Map::new()),
    )
}

pub fn build_remove_favorite(advertising: &AdvertisingRef, favorite_id: &str, token: &str) -> HttpRequest {
    let mut request = HttpRequest::new(
        HttpMethod::Delete,
        format!("{}/favorites/{favorite_id}", advertising.path()),
    );
    request.headers = token_headers(Some(token));
    request
}

pub fn build_get_home() -> HttpRequest {
    HttpRequest::new(HttpMethod::Get, HOME_PATH.to_string())
}

pub fn build_get_search(params: &SearchParams) -> Result<HttpRequest, ApiError> {
    let mut request = HttpRequest::new(HttpMethod::Get, SEARCH_PATH.to_string());
    request.query = params.to_query()?;
    Ok(request)
}

/// `{ "<name>": payload }`
fn wrap(name: &str, payload: &impl Serialize) -> Result<Value, ApiError> {
    let value = serde_json::to_value(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    let mut body = Map::new();
    body.insert(name.to_string(), value);
    Ok(Value::Object(body))
}

fn post_json(path: String, token: &str, body: Value) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(&body).map_err(|e| ApiError::Serialization(e.to_string()))?;
    let mut request = HttpRequest::new(HttpMethod::Post, path);
    request.headers = token_headers(Some(token));
    request.body = Some(body);
    Ok(request)
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

pub fn parse_post_advertising_question(response: HttpResponse) -> Result<Envelope, ApiError> {
    parse_json(response)
}

pub fn parse_post_advertising_question_answer(response: HttpResponse) -> Result<Envelope, ApiError> {
    parse_json(response)
}

pub fn parse_post_deal(response: HttpResponse) -> Result<Deal, ApiError> {
    parse_json::<DealEnvelope>(response).map(|envelope| envelope.deal)
}

pub fn parse_post_favorite(response: HttpResponse) -> Result<(), ApiError> {
    check_status(response).map(drop)
}

pub fn parse_remove_favorite(response: HttpResponse) -> Result<(), ApiError> {
    check_status(response).map(drop)
}

pub fn parse_get_home(response: HttpResponse) -> Result<HomeFeed, ApiError> {
    parse_json(response)
}

pub fn parse_get_search(response: HttpResponse) -> Result<SearchResult, ApiError> {
    parse_json(response)
}

/// Reject any non-2xx status, handing the response back otherwise.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body,
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let response = check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization {
        status: response.status,
        message: e.to_string(),
        body: response.body,
    })
}
