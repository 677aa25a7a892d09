//! URL construction: endpoint descriptors and the request builder that signs them.

use std::collections::BTreeMap;
use std::fmt;

use crate::encode::url_encode;

/// Production base URL for the TraderMade REST API.
pub const DEFAULT_BASE_URL: &str = "https://marketdata.tradermade.com/api/v1";

/// A remote operation: its path fragment plus query parameters.
///
/// Parameters are kept sorted by name so built URLs are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    params: BTreeMap<String, String>,
}

impl Endpoint {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            params: BTreeMap::new(),
        }
    }

    /// Tick-data endpoints carry the symbol and date range in the path.
    /// The date segments are percent-encoded, the symbol and separators are not.
    pub fn tick(prefix: &str, symbol: &str, start_date: &str, end_date: &str) -> Self {
        Self::new(&format!(
            "{}/{}/{}/{}",
            prefix,
            symbol,
            url_encode(start_date),
            url_encode(end_date)
        ))
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds the parameter only when `value` is non-empty.
    pub fn with_optional_param(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.with_param(key, value)
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

/// Joins base URL, endpoint path, API key and parameters into an absolute URL.
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: String,
    api_key: String,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl RequestBuilder {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Builds `<base><path>?api_key=<key>&<k>=<v>...` with every key and value encoded.
    pub fn build(&self, path: &str, params: &BTreeMap<String, String>) -> String {
        let mut url = format!("{}{}?api_key={}", self.base_url, path, url_encode(&self.api_key));
        for (key, value) in params {
            url.push('&');
            url.push_str(&url_encode(key));
            url.push('=');
            url.push_str(&url_encode(value));
        }
        url
    }

    pub fn build_endpoint(&self, endpoint: &Endpoint) -> String {
        self.build(endpoint.path(), endpoint.params())
    }
}
