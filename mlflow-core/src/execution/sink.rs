//! Result sinks and success-path decoding.

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{DecodeErrorKind, MlflowError};

/// A value that can be populated from a JSON body.
///
/// Implemented for every `DeserializeOwned` type; the target is only replaced once
/// the whole body decoded successfully.
pub trait JsonTarget: Send {
    fn decode_json(&mut self, body: &[u8]) -> Result<(), serde_json::Error>;
}

impl<T> JsonTarget for T
where
    T: DeserializeOwned + Send,
{
    fn decode_json(&mut self, body: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(body)?;
        Ok(())
    }
}

/// Where a successful response body goes.
pub enum ResponseSink<'a> {
    /// Ignore the body.
    Discard,
    /// Copy the raw body bytes, e.g. artifact content.
    Bytes(&'a mut (dyn AsyncWrite + Send + Unpin)),
    /// Decode the body as JSON into a typed value.
    Json(&'a mut dyn JsonTarget),
}

impl<'a> ResponseSink<'a> {
    pub fn json<T: JsonTarget>(target: &'a mut T) -> Self {
        Self::Json(target)
    }

    pub fn bytes<W: AsyncWrite + Send + Unpin>(writer: &'a mut W) -> Self {
        Self::Bytes(writer)
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Discard => "discard",
            Self::Bytes(_) => "bytes",
            Self::Json(_) => "json",
        }
    }
}

impl std::fmt::Debug for ResponseSink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ResponseSink").field(&self.kind()).finish()
    }
}

impl Default for ResponseSink<'_> {
    fn default() -> Self {
        Self::Discard
    }
}

/// Decode a fully-read body into a JSON target.
///
/// A body that is empty (or whitespace only) is not an error: several write
/// endpoints answer with nothing, and the target keeps its current value.
pub fn decode_json_body(body: &[u8], target: &mut dyn JsonTarget) -> Result<(), MlflowError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        tracing::debug!("empty response body; nothing to decode");
        return Ok(());
    }
    target
        .decode_json(body)
        .map_err(|e| MlflowError::decode(DecodeErrorKind::MalformedBody, e.to_string()))
}

/// Deliver a successful response into its sink. Consumes the response.
pub async fn write_response(resp: reqwest::Response, sink: ResponseSink<'_>) -> Result<(), MlflowError> {
    match sink {
        ResponseSink::Discard => {
            // drain so the connection can be reused; failures here do not matter
            let _ = resp.bytes().await;
            Ok(())
        }
        ResponseSink::Bytes(writer) => copy_body(resp, writer).await,
        ResponseSink::Json(target) => {
            let body = resp.bytes().await?;
            decode_json_body(&body, target)
        }
    }
}

async fn copy_body(
    resp: reqwest::Response,
    writer: &mut (dyn AsyncWrite + Send + Unpin),
) -> Result<(), MlflowError> {
    let copy_failed = |e: &dyn std::fmt::Display| {
        MlflowError::decode(DecodeErrorKind::StreamCopyFailed, e.to_string())
    };

    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| copy_failed(&e))?;
        writer.write_all(&chunk).await.map_err(|e| copy_failed(&e))?;
    }
    writer.flush().await.map_err(|e| copy_failed(&e))
}
