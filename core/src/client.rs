//! Async facade over the marketplace BFF.
//!
//! # Design
//! `MarketplaceBffClient` holds only its transport and carries no mutable
//! state, so one instance can serve any number of concurrent calls. Every
//! operation goes through `call`, which builds, sends and parses a request
//! and converts any failure into a `BffError` tagged with the operation. On
//! success `call` returns the parser's value untouched.

use crate::endpoints::{self, AdvertisingRef};
use crate::error::{ApiError, BffError, Operation, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::search::SearchParams;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    AdvertisingQuestion, AdvertisingQuestionAnswer, Deal, Envelope, HomeFeed, SearchResult,
};

/// Client for the marketplace backend-for-frontend.
#[derive(Debug, Clone)]
pub struct MarketplaceBffClient<T = ReqwestTransport> {
    transport: T,
}

impl MarketplaceBffClient<ReqwestTransport> {
    /// Client bound to `base_url` over a fresh reqwest transport.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self::with_transport(ReqwestTransport::new(base_url)?))
    }
}

impl<T: Transport> MarketplaceBffClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn post_advertising_question(
        &self,
        advertising: &AdvertisingRef,
        token: &str,
        question: &AdvertisingQuestion,
    ) -> Result<Envelope, BffError> {
        self.call(
            Operation::PostAdvertisingQuestion,
            endpoints::build_post_advertising_question(advertising, token, question),
            endpoints::parse_post_advertising_question,
        )
        .await
    }

    pub async fn post_advertising_question_answer(
        &self,
        advertising: &AdvertisingRef,
        question_id: &str,
        token: &str,
        answer: &AdvertisingQuestionAnswer,
    ) -> Result<Envelope, BffError> {
        self.call(
            Operation::PostAdvertisingQuestionAnswer,
            endpoints::build_post_advertising_question_answer(
                advertising,
                question_id,
                token,
                answer,
            ),
            endpoints::parse_post_advertising_question_answer,
        )
        .await
    }

    /// Create a deal and return the created record, not its envelope.
    pub async fn post_deal(
        &self,
        advertising: &AdvertisingRef,
        token: &str,
        deal: &Deal,
    ) -> Result<Deal, BffError> {
        self.call(
            Operation::PostDeal,
            endpoints::build_post_deal(advertising, token, deal),
            endpoints::parse_post_deal,
        )
        .await
    }

    pub async fn post_favorite(&self, advertising: &AdvertisingRef, token: &str) -> Result<(), BffError> {
        self.call(
            Operation::PostFavorite,
            endpoints::build_post_favorite(advertising, token),
            endpoints::parse_post_favorite,
        )
        .await
    }

    pub async fn remove_favorite(
        &self,
        advertising: &AdvertisingRef,
        favorite_id: &str,
        token: &str,
    ) -> Result<(), BffError> {
        self.call(
            Operation::RemoveFavorite,
            Ok(endpoints::build_remove_favorite(advertising, favorite_id, token)),
            endpoints::parse_remove_favorite,
        )
        .await
    }

    pub async fn get_home(&self) -> Result<HomeFeed, BffError> {
        self.call(
            Operation::GetHome,
            Ok(endpoints::build_get_home()),
            endpoints::parse_get_home,
        )
        .await
    }

    pub async fn get_search(&self, params: &SearchParams) -> Result<SearchResult, BffError> {
        self.call(
            Operation::GetSearch,
            endpoints::build_get_search(params),
            endpoints::parse_get_search,
        )
        .await
    }

    /// Send `request`, parse the answer, and normalize any failure.
    async fn call<R>(
        &self,
        operation: Operation,
        request: Result<HttpRequest, ApiError>,
        parse: fn(HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, BffError> {
        let outcome = match request {
            Ok(request) => match self.transport.send(request).await {
                Ok(response) => parse(response),
                Err(err) => Err(err.into()),
            },
            Err(err) => Err(err),
        };
        outcome.map_err(|err| BffError::from_api(operation, err))
    }
}
