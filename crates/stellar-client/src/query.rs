//! `POST /query` over HTTP.

use async_trait::async_trait;
use tracing::debug;

use stellar_contracts::{
    error::TransportError,
    request::QueryRequest,
    wire::{QueryBody, QueryReply},
};
use stellar_core::traits::QueryBackend;

use crate::http::{decode_response, network_error};

/// Sends `{"query": text}` as JSON and returns the reply's `answer`.
pub struct HttpQueryBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpQueryBackend {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QueryBackend for HttpQueryBackend {
    async fn query(&self, request: &QueryRequest) -> Result<String, TransportError> {
        let body = QueryBody {
            query: request.text.clone(),
        };
        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;
        let reply: QueryReply = decode_response(resp).await?;
        debug!(url = %self.url, answer_len = reply.answer.len(), "query answered");
        Ok(reply.answer)
    }
}
