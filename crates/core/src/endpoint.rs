use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Production base URL of the listing API
pub const DEFAULT_BASE_URL: &str = "https://cariari.agency/api";

/// Base URL of the upstream listing API, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Parse and normalize a base URL.
    pub fn parse(base_url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(base_url)?;
        Ok(Self {
            base: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `<base>/properties`
    pub fn properties(&self) -> String {
        format!("{}/properties", self.base)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
        }
    }
}

// Characters left bare inside a component: alphanumerics plus -_.!~*'()
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single URL component (query key, query value or path segment).
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}
