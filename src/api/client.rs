use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tracing::{debug, info};
use url::Url;

use crate::api::request::HttpRequestSpec;
use crate::error::{Error, Result};

/// A request that passed validation and is ready for the wire.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub body: String,
}

/// Status and full body text of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Puts one prepared request on the wire and reads the whole response.
pub trait Transport {
    fn send(&self, request: PreparedRequest) -> Result<ApiResponse>;
}

/// Blocking reqwest transport. The client is reused for every call.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: PreparedRequest) -> Result<ApiResponse> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in request.headers {
            headers.append(name, value);
        }

        let response = self
            .client
            .request(request.method, request.url)
            .headers(headers)
            .body(request.body)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(ApiResponse { status, body })
    }
}

/// Executes [`HttpRequestSpec`]s and hands back the raw body text.
///
/// Non-2xx responses are not errors here; the body is returned as-is and
/// the caller decides what to do with it.
#[derive(Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn new() -> Self {
        debug!("Initializing API client");
        Self {
            transport: ReqwestTransport::new(),
        }
    }
}

impl Default for ApiClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs the request and returns the response body text.
    pub fn call(&self, spec: &HttpRequestSpec) -> Result<String> {
        self.execute(spec).map(|response| response.body)
    }

    /// Performs the request and returns status and body.
    pub fn execute(&self, spec: &HttpRequestSpec) -> Result<ApiResponse> {
        let request = Self::prepare(spec)?;
        debug!("Calling {} {}", request.method, request.url);

        let response = self.transport.send(request)?;
        info!("Response status: {}", response.status);
        Ok(response)
    }

    /// Validates the request without touching the network.
    fn prepare(spec: &HttpRequestSpec) -> Result<PreparedRequest> {
        if spec.url().trim().is_empty() {
            return Err(Error::MalformedRequest("request URL is empty".to_string()));
        }
        let url = Url::parse(spec.url()).map_err(|e| {
            Error::MalformedRequest(format!("invalid request URL '{}': {}", spec.url(), e))
        })?;

        let mut headers = Vec::with_capacity(spec.headers().len());
        for (name, value) in spec.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                Error::MalformedRequest(format!("invalid header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                Error::MalformedRequest(format!("invalid value for header '{}': {}", name, e))
            })?;
            headers.push((header_name, header_value));
        }

        Ok(PreparedRequest {
            method: spec.method().into(),
            url,
            headers,
            body: spec.body_json()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::HttpMethod;
    use std::cell::RefCell;

    struct SpyTransport {
        sent: RefCell<Vec<PreparedRequest>>,
        response: ApiResponse,
    }

    impl SpyTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                response: ApiResponse {
                    status,
                    body: body.to_string(),
                },
            }
        }

        fn calls(&self) -> usize {
            self.sent.borrow().len()
        }
    }

    impl Transport for SpyTransport {
        fn send(&self, request: PreparedRequest) -> Result<ApiResponse> {
            self.sent.borrow_mut().push(request);
            Ok(self.response.clone())
        }
    }

    #[test]
    fn test_call_returns_body_text() {
        let client = ApiClient::with_transport(SpyTransport::replying(200, r#"{"ok":true}"#));
        let body = client
            .call(&HttpRequestSpec::get("https://example.com/search"))
            .unwrap();
        assert_eq!(body, r#"{"ok":true}"#);
        assert_eq!(client.transport().calls(), 1);
    }

    #[test]
    fn test_non_success_status_is_not_an_error() {
        let client = ApiClient::with_transport(SpyTransport::replying(401, "denied"));
        let response = client
            .execute(&HttpRequestSpec::get("https://example.com/search"))
            .unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(response.body, "denied");
    }

    #[test]
    fn test_request_is_forwarded_verbatim() {
        let client = ApiClient::with_transport(SpyTransport::replying(200, ""));
        let spec = HttpRequestSpec::new("https://example.com/items", HttpMethod::Post)
            .with_body_field("name", "value")
            .with_header("X-First", "1")
            .with_header("X-Second", "2")
            .with_header("X-First", "3");
        client.call(&spec).unwrap();

        let sent = client.transport().sent.borrow();
        let request = &sent[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.as_str(), "https://example.com/items");
        assert_eq!(request.body, r#"{"name":"value"}"#);
        let headers: Vec<(&str, &str)> = request
            .headers
            .iter()
            .map(|(n, v)| (n.as_str(), v.to_str().unwrap()))
            .collect();
        assert_eq!(
            headers,
            vec![("x-first", "1"), ("x-second", "2"), ("x-first", "3")]
        );
    }

    #[test]
    fn test_relative_url_is_rejected_before_sending() {
        let client = ApiClient::with_transport(SpyTransport::replying(200, ""));
        let result = client.call(&HttpRequestSpec::get("/search/news.json"));
        assert!(matches!(result, Err(Error::MalformedRequest(_))));
        assert_eq!(client.transport().calls(), 0);
    }

    #[test]
    fn test_empty_url_is_rejected_before_sending() {
        let client = ApiClient::with_transport(SpyTransport::replying(200, ""));
        let result = client.call(&HttpRequestSpec::get("  "));
        assert!(matches!(result, Err(Error::MalformedRequest(_))));
        assert_eq!(client.transport().calls(), 0);
    }

    #[test]
    fn test_invalid_header_is_rejected_before_sending() {
        let client = ApiClient::with_transport(SpyTransport::replying(200, ""));
        let spec = HttpRequestSpec::get("https://example.com").with_header("Bad Header", "x");
        assert!(matches!(client.call(&spec), Err(Error::MalformedRequest(_))));

        let spec = HttpRequestSpec::get("https://example.com").with_header("X-Ok", "line\nbreak");
        assert!(matches!(client.call(&spec), Err(Error::MalformedRequest(_))));
        assert_eq!(client.transport().calls(), 0);
    }

    #[test]
    fn test_connection_failure_surfaces_as_transport_error() {
        let client = ApiClient::new();
        let result = client.call(&HttpRequestSpec::get("http://127.0.0.1:1/"));
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
