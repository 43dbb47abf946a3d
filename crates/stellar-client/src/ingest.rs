//! `POST /upload_csv` over HTTP, as a multipart form.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use stellar_contracts::{
    error::TransportError,
    request::{UploadCandidate, CSV_MEDIA_TYPE},
    wire::{UploadReply, UPLOAD_FIELD},
};
use stellar_core::traits::IngestBackend;

use crate::http::{decode_response, network_error};

/// Uploads the staged file as the single multipart field `file`.
pub struct HttpIngestBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpIngestBackend {
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

fn file_part(candidate: &UploadCandidate) -> Result<Part, TransportError> {
    let media_type = candidate.media_type.as_deref().unwrap_or(CSV_MEDIA_TYPE);
    Part::bytes(candidate.contents.clone())
        .file_name(candidate.name.clone())
        .mime_str(media_type)
        .map_err(network_error)
}

#[async_trait]
impl IngestBackend for HttpIngestBackend {
    async fn upload(&self, candidate: &UploadCandidate) -> Result<UploadReply, TransportError> {
        let form = Form::new().part(UPLOAD_FIELD, file_part(candidate)?);
        let resp = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        let reply: UploadReply = decode_response(resp).await?;
        debug!(
            url = %self.url,
            file = %candidate.name,
            status = %reply.status,
            "upload acknowledged"
        );
        Ok(reply)
    }
}
