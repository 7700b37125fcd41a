//! Request descriptors.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use serde::Serialize;

use super::encoding::encode_body;
use super::query::QueryParams;
use crate::error::MlflowError;

/// HTTP verbs used by the MLflow REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single API call: verb, path relative to the API root, query and body.
///
/// Like `reqwest::RequestBuilder::json`, a payload that fails to serialize is
/// remembered and reported when the request is executed, before anything is sent.
#[derive(Debug)]
pub struct ApiRequest<'a> {
    method: HttpMethod,
    path: Cow<'a, str>,
    query: QueryParams,
    body: Result<Option<Bytes>, MlflowError>,
}

impl<'a> ApiRequest<'a> {
    pub fn new(method: HttpMethod, path: impl Into<Cow<'a, str>>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: Ok(None),
        }
    }

    pub fn get(path: impl Into<Cow<'a, str>>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<Cow<'a, str>>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn patch(path: impl Into<Cow<'a, str>>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<Cow<'a, str>>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Replace the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Add a single query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(key, value);
        self
    }

    /// Attach a JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Self {
        self.body = encode_body(Some(payload));
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// The encoded body, if any, or the deferred encoding error.
    pub fn body(&self) -> Result<Option<&Bytes>, &MlflowError> {
        self.body.as_ref().map(Option::as_ref)
    }

    pub(crate) fn into_parts(self) -> (HttpMethod, Cow<'a, str>, QueryParams, Result<Option<Bytes>, MlflowError>) {
        (self.method, self.path, self.query, self.body)
    }
}
