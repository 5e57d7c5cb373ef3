use crate::constants::{AWS4_HMAC_SHA256, AWS4_REQUEST, SIGNED_HEADERS, X_AMZ_DATE};
use crate::Credential;
use bytes::Bytes;
use http::request::Parts;
use http::uri::PathAndQuery;
use http::{header, HeaderMap, HeaderValue, Uri};
use log::debug;
use sigv4kit_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use sigv4kit_core::time::{format_date, format_iso8601, now, DateTime};
use sigv4kit_core::utils::Redact;
use sigv4kit_core::{Error, Result, SigningRequest};
use std::fmt::{Debug, Formatter, Write};
use std::str::FromStr;

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Only `host` and `x-amz-date` are signed and the body is always hashed
/// in full. Query parameters are sorted as raw `key=value` tokens and the
/// path is used as written, without percent normalisation. Both match
/// strict SigV4 for plain ascii paths and distinct query keys, and may
/// diverge for repeated keys or reserved characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer that signs with the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// Requests should be signed with the current time, pinning it is
    /// meant for reproducible signatures in tests.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request, returning the headers the caller must add to it.
    ///
    /// Fails with `CredentialMissing` if any credential field is empty and
    /// with `UrlInvalid` if the url has no scheme or host. Both checks run
    /// before any hashing.
    pub fn sign(&self, req: &SigningRequest, cred: &Credential) -> Result<SignedHeaders> {
        cred.check()?;
        let url = CanonicalUrl::parse(&req.url)?;

        let ctx = SigningContext::new(self.time.unwrap_or_else(now));

        // build canonical request and string to sign.
        let creq = canonical_request_string(req, &url, &ctx)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/{}",
            ctx.date_stamp, cred.region, cred.service, AWS4_REQUEST
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{AWS4_HMAC_SHA256}")?;
            writeln!(f, "{}", ctx.amz_date)?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &cred.secret_access_key,
            &ctx.date_stamp,
            &cred.region,
            &cred.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let authorization = format!(
            "{AWS4_HMAC_SHA256} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            cred.access_key_id,
        );

        Ok(SignedHeaders {
            x_amz_date: ctx.amz_date,
            authorization,
        })
    }

    /// Sign an `http` request in place.
    ///
    /// The query of the uri is rewritten into the sorted order that was
    /// signed, then `x-amz-date` and `Authorization` are inserted,
    /// replacing any existing values.
    pub fn sign_parts(
        &self,
        parts: &mut Parts,
        body: impl Into<Bytes>,
        cred: &Credential,
    ) -> Result<()> {
        let req = SigningRequest::from_parts(parts, body);
        let signed = self.sign(&req, cred)?;

        let mut uri_parts = parts.uri.clone().into_parts();
        if let Some(paq) = &uri_parts.path_and_query {
            if let Some(query) = paq.query() {
                let canonical = canonical_query_string(query);
                if canonical != query {
                    let paq = PathAndQuery::from_str(&format!("{}?{canonical}", paq.path()))?;
                    uri_parts.path_and_query = Some(paq);
                }
            }
        }
        parts.uri = Uri::from_parts(uri_parts)?;

        signed.apply(&mut parts.headers)
    }
}

/// Sign the request with the current time.
///
/// Shortcut for `RequestSigner::new().sign(req, cred)`.
pub fn sign(req: &SigningRequest, cred: &Credential) -> Result<SignedHeaders> {
    RequestSigner::new().sign(req, cred)
}

/// Headers produced by signing, to be merged into the outgoing request.
///
/// They must not be overwritten after merging.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value of the `x-amz-date` header: `20220313T072004Z`.
    pub x_amz_date: String,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

impl SignedHeaders {
    /// Insert both headers into the header map, replacing existing values.
    ///
    /// The `Authorization` value is marked as sensitive.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(X_AMZ_DATE, HeaderValue::from_str(&self.x_amz_date)?);

        let mut authorization = HeaderValue::from_str(&self.authorization)?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);

        Ok(())
    }

    /// Header name and value pairs for clients that don't use `http` types.
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [
            (X_AMZ_DATE, &self.x_amz_date),
            ("Authorization", &self.authorization),
        ]
    }
}

impl Debug for SignedHeaders {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("x_amz_date", &self.x_amz_date)
            .field("authorization", &Redact::from(&self.authorization))
            .finish()
    }
}

/// Timestamps of one signing call, both taken from the same instant so
/// they can't disagree around midnight.
struct SigningContext {
    amz_date: String,
    date_stamp: String,
}

impl SigningContext {
    fn new(t: DateTime) -> Self {
        Self {
            amz_date: format_iso8601(t),
            date_stamp: format_date(t),
        }
    }
}

/// Url split into the parts that take part in signing.
#[derive(Debug)]
struct CanonicalUrl {
    /// Authority as written, port included.
    host: String,
    path: String,
    query: String,
}

impl CanonicalUrl {
    fn parse(url: &str) -> Result<Self> {
        let uri = Uri::from_str(url)
            .map_err(|e| Error::url_invalid("failed to parse url").with_source(e))?;

        if uri.scheme().is_none() {
            return Err(Error::url_invalid("url must contain a scheme"));
        }
        let authority = match uri.authority() {
            Some(v) if !v.host().is_empty() => v,
            _ => return Err(Error::url_invalid("url must contain a host")),
        };

        Ok(Self {
            host: authority.as_str().to_string(),
            path: uri.path().to_string(),
            query: canonical_query_string(uri.query().unwrap_or_default()),
        })
    }
}

/// Sort the raw `key=value` tokens of a query string.
///
/// Tokens are compared as undecoded strings, so `a=10` sorts before `a=2`
/// and `%20` sorts before letters.
fn canonical_query_string(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut params = query.split('&').collect::<Vec<_>>();
    params.sort_unstable();
    params.join("&")
}

fn canonical_request_string(
    req: &SigningRequest,
    url: &CanonicalUrl,
    ctx: &SigningContext,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", req.method)?;
    // Insert path, used as written.
    writeln!(f, "{}", url.path)?;
    // Insert query
    writeln!(f, "{}", url.query)?;
    // Insert signed headers, the block ends with an empty line.
    writeln!(f, "host:{}", url.host)?;
    writeln!(f, "{X_AMZ_DATE}:{}", ctx.amz_date)?;
    writeln!(f)?;
    writeln!(f, "{SIGNED_HEADERS}")?;
    // Insert payload hash
    write!(f, "{}", hex_sha256(&req.body))?;

    Ok(f)
}

fn generate_signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}
