use std::fmt;

use tracing::{debug, error, info};

use crate::api::{ApiClient, HttpRequestSpec, ReqwestTransport, Transport};
use crate::config::AppConfig;
use crate::data::{SearchResultItem, SearchResultPage};
use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://openapi.naver.com/v1/search/news.json";
pub const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
pub const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

/// Provider client id and secret. Both are required.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(Error::Configuration(
                "client id or client secret is missing".to_string(),
            ));
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Anything that can turn a keyword into a list of results.
pub trait SearchProvider {
    fn search_by_keyword(&self, keyword: &str) -> Result<Vec<SearchResultItem>>;
}

/// Naver news search.
///
/// Every call goes to the network; results are never cached. The body is
/// decoded whatever the status code, so an error payload from the provider
/// comes back as an empty list rather than an error.
#[derive(Clone)]
pub struct NaverSearchService<T = ReqwestTransport> {
    credentials: Credentials,
    endpoint: String,
    api_client: ApiClient<T>,
}

impl NaverSearchService<ReqwestTransport> {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_api_client(credentials, ApiClient::new())
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.credentials.clone()).with_endpoint(config.endpoint.clone())
    }
}

impl<T: Transport> NaverSearchService<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self::with_api_client(credentials, ApiClient::with_transport(transport))
    }

    pub fn with_api_client(credentials: Credentials, api_client: ApiClient<T>) -> Self {
        info!("SearchService initialized");
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_client,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_client(&self) -> &ApiClient<T> {
        &self.api_client
    }

    /// Authenticated GET for `keyword`. The keyword is percent-encoded.
    pub fn request_for(&self, keyword: &str) -> Result<HttpRequestSpec> {
        if keyword.trim().is_empty() {
            return Err(Error::MalformedRequest(
                "search keyword must not be empty".to_string(),
            ));
        }

        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}query={}",
            self.endpoint,
            separator,
            urlencoding::encode(keyword)
        );

        Ok(HttpRequestSpec::get(url)
            .with_header(CLIENT_ID_HEADER, self.credentials.client_id())
            .with_header(CLIENT_SECRET_HEADER, self.credentials.client_secret()))
    }
}

/// Decode a provider body into a page, keeping the raw text on failure.
pub fn decode_page(body: String) -> Result<SearchResultPage> {
    match SearchResultPage::from_json(&body) {
        Ok(page) => Ok(page),
        Err(source) => {
            error!("Failed to decode search response: {}", source);
            Err(Error::Decode { source, body })
        }
    }
}

impl<T: Transport> SearchProvider for NaverSearchService<T> {
    fn search_by_keyword(&self, keyword: &str) -> Result<Vec<SearchResultItem>> {
        info!("Search by keyword: {}", keyword);
        let request = self.request_for(keyword)?;

        let body = self.api_client.call(&request)?;
        let page = decode_page(body)?;

        debug!(
            "Decoded {} items (lastBuildDate: {})",
            page.items.len(),
            page.last_build_date
        );
        Ok(page.items)
    }
}
