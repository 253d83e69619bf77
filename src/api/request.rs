use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// HTTP verbs the client knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// Description of one outbound request.
///
/// Built once per call and never mutated afterwards: the `with_*` methods
/// consume the value and hand back a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestSpec {
    url: String,
    method: HttpMethod,
    body: BTreeMap<String, String>,
    headers: Vec<(String, String)>,
}

impl HttpRequestSpec {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            body: BTreeMap::new(),
            headers: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    /// Adds one body field. The body is sent as a flat JSON object.
    pub fn with_body_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// Appends a header. Order is preserved and duplicates are allowed.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends headers given as `[name, value, name, value, ...]`.
    ///
    /// Fails with [`Error::MalformedRequest`] when the sequence has an odd
    /// length, so a dangling name can never reach the wire.
    pub fn with_flat_headers<I, S>(mut self, flat: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let flat: Vec<String> = flat.into_iter().map(Into::into).collect();
        if flat.len() % 2 != 0 {
            return Err(Error::MalformedRequest(format!(
                "header list must hold name/value pairs, got {} entries",
                flat.len()
            )));
        }

        let mut iter = flat.into_iter();
        while let (Some(name), Some(value)) = (iter.next(), iter.next()) {
            self.headers.push((name, value));
        }
        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> &BTreeMap<String, String> {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// JSON object form of the body; an empty body becomes `{}`.
    pub fn body_json(&self) -> Result<String> {
        serde_json::to_string(&self.body)
            .map_err(|e| Error::MalformedRequest(format!("request body is not serializable: {e}")))
    }
}
