//! Async client for the marketplace backend-for-frontend (BFF).
//!
//! # Overview
//! Translates typed calls (questions, answers, deals, favorites, home feed,
//! search) into requests against the BFF's versioned REST API and normalizes
//! every failure into a single `BffError`.
//!
//! # Design
//! - `endpoints` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network, so the request shape of every operation is
//!   testable on its own.
//! - `transport` executes requests; `ReqwestTransport` is the default.
//! - `MarketplaceBffClient` composes the two through one error wrapper. It
//!   holds no per-call state and caches nothing.
//! - Auth tokens are supplied per call and only ever travel in the
//!   `X-Cig-Token` header.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod search;
pub mod transport;
pub mod types;

pub use client::MarketplaceBffClient;
pub use endpoints::AdvertisingRef;
pub use error::{ApiError, BffError, ErrorKind, Operation, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use search::{PriceRange, SearchParams, SearchSort};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    AdvertisingQuestion, AdvertisingQuestionAnswer, Deal, Envelope, HomeFeed, SearchResult,
};
