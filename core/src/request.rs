use bytes::Bytes;
use http::header::HeaderName;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;

use crate::Result;

/// Request descriptor consumed by signers.
///
/// It carries the request exactly as it will be sent. The url is kept as
/// the caller wrote it and only split into host, path and query by the
/// signer, so a malformed url is reported at signing time.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Raw request url, for example `https://example.com/path?a=1`.
    pub url: String,
    /// Extra headers of the request.
    ///
    /// `host` and `x-amz-date` are computed by the signer, values stored
    /// here for those names don't take part in signing.
    pub headers: HeaderMap,
    /// Body bytes that will be transmitted.
    pub body: Bytes,
}

impl SigningRequest {
    /// Create a new request descriptor with empty headers and body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Create a new request descriptor from a method name like `GET`.
    pub fn try_new(method: &str, url: impl Into<String>) -> Result<Self> {
        let method = Method::from_bytes(method.as_bytes())?;
        Ok(Self::new(method, url))
    }

    /// Build a request descriptor from http::request::Parts and its body.
    ///
    /// The parts are left untouched.
    pub fn from_parts(parts: &http::request::Parts, body: impl Into<Bytes>) -> Self {
        Self {
            method: parts.method.clone(),
            url: parts.uri.to_string(),
            headers: parts.headers.clone(),
            body: body.into(),
        }
    }

    /// Set the body of this request.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a header to this request.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.append(name, value);
        Ok(self)
    }
}
