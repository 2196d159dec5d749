//! HTTP client for the social API templates, with safe logging, optional
//! retries and the auth strategies social providers use.
//!
//! - Request options: headers, `Auth`, query params, form body, timeout, retries
//! - OAuth 1.0a request signing and the `Authorization: OAuth <token>` scheme
//! - Redacts sensitive query/form params and never logs secret values
//! - Error responses keep the full body so provider translators can inspect it
//! - Optional *raw* request/response logging via `SOCIAL_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), social_http::HttpError> {
//! let client = social_http::HttpClient::new("https://api.twitter.com/1/")?;
//! let got: serde_json::Value = client
//!     .get_json("statuses/public_timeline.json", social_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Retries: 429/5xx and transport failures are retried with exponential
//! backoff (honouring `Retry-After`) only when a retry budget is set. The
//! client defaults to no retries.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

pub mod oauth1;

pub use oauth1::OAuth1Credentials;
pub use reqwest::{Method, StatusCode};

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "SOCIAL_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a curl command for repro/debug. Query and form values of secret
/// parameters are replaced, and auth headers only show their scheme.
fn make_curl(
    method: &Method,
    url: &Url,
    headers: &[(String, String)],
    form: &[(String, String)],
) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in headers {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    for (k, v) in form {
        parts.push(format!("--data-urlencode '{}={}'", k, v.replace('\'', r"'\''")));
    }
    let mut shown = url.clone();
    shown.set_query(None);
    let query = redact_pairs(url.query_pairs());
    if !query.is_empty() {
        let joined = query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        shown.set_query(Some(&joined));
    }
    parts.push(format!("'{}'", shown.as_str()));
    parts.join(" ")
}

fn redact_auth_value(value: &str) -> String {
    match value.split_once(' ') {
        Some((scheme, _)) => format!("{scheme} <redacted>"),
        None => "<redacted>".into(),
    }
}

fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let raw = v.to_str().unwrap_or("");
            let val = if key.eq_ignore_ascii_case("authorization") {
                redact_auth_value(raw)
            } else {
                raw.to_string()
            };
            (key, val)
        })
        .collect()
}

fn is_secret_param(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "access_token"
            | "authorization"
            | "auth"
            | "key"
            | "api_key"
            | "token"
            | "secret"
            | "client_secret"
            | "oauth_token"
            | "bearer"
    )
}

fn redact_pairs<K, V, I>(pairs: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(k, v)| {
            let k = k.as_ref();
            let v = if is_secret_param(k) {
                "<redacted>".to_string()
            } else {
                v.as_ref().to_string()
            };
            (k.to_string(), v)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("request signing failed: {0}")]
    Signing(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    /// Non-2xx response. `body` is the full payload (lossy UTF-8).
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
        body: String,
    },
}

// ==============================
// Auth & Request Options
// ==============================

/// Authentication strategies supported by the HTTP client helpers.
///
/// ```
/// use social_http::Auth;
///
/// let facebook = Auth::OAuth2("token");
/// match facebook {
///     Auth::OAuth2(value) => assert_eq!(value, "token"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    /// Authorization: OAuth <token> (Facebook Graph API)
    OAuth2(&'a str),
    /// OAuth 1.0a HMAC-SHA1 signed Authorization header (Twitter)
    OAuth1(&'a OAuth1Credentials),
    /// Custom header
    Header {
        name: HeaderName,
        value: HeaderValue,
    },
    /// Auth via query param
    Query {
        name: &'a str,
        value: Cow<'a, str>,
    },
    None,
}

impl Auth<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Auth::Bearer(_) => "bearer",
            Auth::OAuth2(_) => "oauth2",
            Auth::OAuth1(_) => "oauth1",
            Auth::Header { .. } => "header",
            Auth::Query { .. } => "query",
            Auth::None => "none",
        }
    }
}

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use social_http::{Auth, RequestOpts};
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     auth: Some(Auth::OAuth2("token")),
///     form: Some(vec![("message", "Hello".into())]),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(opts.query.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>, // e.g. [("q", "term".into())]
    /// Sent as an `application/x-www-form-urlencoded` body, in order.
    pub form: Option<Vec<(&'a str, Cow<'a, str>)>>,
    /// If true and `path` is an absolute URL, use it as-is (ignore base).
    pub allow_absolute: bool,
}

/// A successful response with its body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

// ==============================
// Client
// ==============================

#[derive(Clone, Debug)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL. A trailing `/` is added to
    /// the base path so relative paths extend it instead of replacing its
    /// last segment.
    ///
    /// ```
    /// use social_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.twitter.com/1")?;
    /// assert_eq!(client.base().as_str(), "https://api.twitter.com/1/");
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// assert_eq!(client.max_retries, 0);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let mut base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 0,
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Override the default retry budget returned by [`HttpClient::new`].
    ///
    /// ```no_run
    /// use social_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new("https://graph.facebook.com/")?.with_retries(2);
    /// assert_eq!(client.max_retries, 2);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// GET and decode a JSON body.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let resp = self.execute(Method::GET, path, opts).await?;
        decode_json(&resp.body)
    }

    /// POST `opts.form` as a form body and decode the JSON reply.
    pub async fn post_form_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let resp = self.execute(Method::POST, path, opts).await?;
        decode_json(&resp.body)
    }

    /// GET raw bytes (images). Redirects are followed.
    pub async fn get_bytes(&self, path: &str, opts: RequestOpts<'_>) -> Result<Vec<u8>, HttpError> {
        Ok(self.execute(Method::GET, path, opts).await?.body)
    }

    // ==============================
    // Core request implementation
    // ==============================

    fn resolve(&self, path: &str, allow_absolute: bool) -> Result<Url, HttpError> {
        if allow_absolute {
            if let Ok(abs) = Url::parse(path) {
                return Ok(abs);
            }
        }
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;
        // Relative paths stay on the base origin and under the base path.
        if url.origin() != self.base.origin() || !url.path().starts_with(self.base.path()) {
            return Err(HttpError::Url(format!(
                "path `{path}` resolves outside {}",
                self.base
            )));
        }
        Ok(url)
    }

    /// Send a request and return the response when its status is 2xx.
    ///
    /// Non-2xx statuses become [`HttpError::Api`] once the retry budget is spent.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        opts: RequestOpts<'_>,
    ) -> Result<RawResponse, HttpError> {
        let url = self.resolve(path, opts.allow_absolute)?;

        let mut query: Vec<(&str, Cow<'_, str>)> = opts.query.clone().unwrap_or_default();
        if let Some(Auth::Query { name, value }) = &opts.auth {
            query.push((*name, value.clone()));
        }
        let form: Vec<(&str, Cow<'_, str>)> = opts.form.clone().unwrap_or_default();

        // OAuth 1.0a signs the bare URL plus every query and form parameter.
        let mut signing_url = url.clone();
        signing_url.set_query(None);
        signing_url.set_fragment(None);
        let url_params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let auth_kind = opts.auth.as_ref().map(Auth::kind).unwrap_or("none");
        let redacted_q = redact_pairs(query.iter().map(|(k, v)| (*k, v.as_ref())));
        let redacted_form = redact_pairs(form.iter().map(|(k, v)| (*k, v.as_ref())));
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let max_retries = opts.retries.unwrap_or(self.max_retries);
        let req_id = uuid::Uuid::new_v4().simple().to_string();

        let mut attempt = 0usize;

        loop {
            // ----- Build request -----
            let mut rb = self
                .inner
                .request(method.clone(), url.clone())
                .timeout(timeout);

            if !query.is_empty() {
                let pairs: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_ref())).collect();
                rb = rb.query(&pairs);
            }

            if !form.is_empty() || method == Method::POST {
                let pairs: Vec<(&str, &str)> = form.iter().map(|(k, v)| (*k, v.as_ref())).collect();
                rb = rb.form(&pairs);
            }

            if let Some(hdrs) = &opts.headers {
                rb = rb.headers(hdrs.clone());
            }

            match &opts.auth {
                Some(Auth::Bearer(tok)) => {
                    let tok = sanitize_token(tok)?;
                    rb = rb.bearer_auth(tok);
                }
                Some(Auth::OAuth2(tok)) => {
                    let tok = sanitize_token(tok)?;
                    rb = rb.header(AUTHORIZATION, format!("OAuth {tok}"));
                }
                Some(Auth::OAuth1(creds)) => {
                    let params: Vec<(&str, &str)> = url_params
                        .iter()
                        .map(|(k, v)| (k.as_str(), v.as_str()))
                        .chain(query.iter().chain(form.iter()).map(|(k, v)| (*k, v.as_ref())))
                        .collect();
                    let header = creds.authorization_header(
                        method.as_str(),
                        signing_url.as_str(),
                        &params,
                    )?;
                    let value = HeaderValue::from_str(&header)
                        .map_err(|e| HttpError::Build(format!("invalid OAuth header: {e}")))?;
                    rb = rb.header(AUTHORIZATION, value);
                }
                Some(Auth::Header { name, value }) => {
                    rb = rb.header(name, value);
                }
                Some(Auth::Query { .. }) | Some(Auth::None) | None => {}
            }

            // ----- Safe request logging (pre-send) -----
            let attempt0 = attempt + 1;
            tracing::debug!(
                req_id=%req_id,
                attempt=attempt0,
                max_retries,
                method=%method,
                host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
                query=?redacted_q,
                form=?redacted_form,
                timeout_ms=timeout.as_millis() as u64,
                auth_kind,
                "http.request.start"
            );

            if raw_enabled() {
                let mut shown = opts
                    .headers
                    .as_ref()
                    .map(redact_headers)
                    .unwrap_or_default();
                if auth_kind != "none" && auth_kind != "query" {
                    shown.push(("Authorization".into(), format!("{auth_kind} <redacted>")));
                }
                let mut full = url.clone();
                if !query.is_empty() {
                    full.query_pairs_mut()
                        .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_ref())));
                }
                let curl = make_curl(&method, &full, &shown, &redacted_form);
                tracing::debug!(target: "http.raw", %req_id, %curl, "request");
            }

            // ----- Send and read the whole body -----
            let t0 = std::time::Instant::now();
            let read = async {
                let resp = rb.send().await?;
                let status = resp.status();
                let headers = resp.headers().clone();
                let body = resp.bytes().await?;
                Ok::<_, reqwest::Error>((status, headers, body.to_vec()))
            };
            let (status, headers, bytes) = match read.await {
                Ok(parts) => parts,
                Err(err) => {
                    let message = err.to_string();
                    let stage = if err.is_body() || err.is_decode() { "body" } else { "send" };
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            req_id=%req_id,
                            attempt,
                            max_retries,
                            stage,
                            backoff_ms=delay.as_millis() as u64,
                            message=%message,
                            "http.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(
                        req_id=%req_id,
                        attempt,
                        stage,
                        timed_out = err.is_timeout(),
                        message=%message,
                        "http.network_error"
                    );
                    return Err(HttpError::Network(message));
                }
            };
            let dur_ms = t0.elapsed().as_millis() as u64;

            let req_hdr_id = headers
                .get("x-request-id")
                .or_else(|| headers.get("x-fb-trace-id"))
                .or_else(|| headers.get("x-transaction"))
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            let remain = headers
                .get("x-ratelimit-remaining")
                .or_else(|| headers.get("x-rate-limit-remaining"))
                .and_then(|v| v.to_str().ok());
            let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

            tracing::debug!(
                req_id=%req_id,
                %status,
                duration_ms=dur_ms,
                body_len=bytes.len(),
                x_request_id=%req_hdr_id,
                rate_limit.remaining=?remain,
                content_type=?content_type,
                "http.response.headers"
            );

            if raw_enabled() {
                let hdrs = redact_headers(&headers);
                let truncated = bytes.len() > RAW_MAX_BODY;
                let text = String::from_utf8_lossy(&bytes[..bytes.len().min(RAW_MAX_BODY)]);
                tracing::info!(
                    target:"http.raw",
                    %req_id,
                    status=%status,
                    duration_ms=dur_ms,
                    headers=?hdrs,
                    body=%text,
                    truncated
                );
            }

            let snippet = snip_body(&bytes);
            tracing::trace!(
                req_id=%req_id,
                body_snippet=%snippet,
                "http.response.body_snippet"
            );

            // ----- Success path -----
            if status.is_success() {
                return Ok(RawResponse {
                    status,
                    headers,
                    body: bytes,
                });
            }

            // ----- Non-success: maybe retry -----
            let message = error_message(&bytes).unwrap_or_else(|| snippet.clone());
            let request_id = req_hdr_id.to_string();

            let is_429 = status == StatusCode::TOO_MANY_REQUESTS;
            let is_5xx = status.is_server_error();

            if (is_429 || is_5xx) && attempt < max_retries {
                attempt += 1;
                let delay = match retry_after_delay_secs(&headers) {
                    Some(secs) => Duration::from_secs(secs),
                    None if is_429 => backoff(attempt).max(Duration::from_millis(1100)),
                    None => backoff(attempt),
                };
                tracing::warn!(
                    req_id=%req_id,
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms=delay.as_millis() as u64,
                    message=%message,
                    body_snippet=%snippet,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(
                req_id=%req_id,
                %status,
                message=%message,
                x_request_id=%request_id,
                body_snippet=%snippet,
                "http.error"
            );
            return Err(HttpError::Api {
                status,
                message,
                request_id,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
    }
}

// ==============================
// Helpers
// ==============================

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HttpError> {
    serde_json::from_slice::<T>(bytes).map_err(|e| {
        let snippet = snip_body(bytes);
        tracing::warn!(
            serde_line=%e.line(),
            serde_col=%e.column(),
            serde_err=%e.to_string(),
            body_snippet=%snippet,
            "http.response.decode_error"
        );
        HttpError::Decode(e.to_string(), snippet)
    })
}

fn backoff(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt.saturating_sub(1)).min(16)))
}

/// Percent-encode a value for use as a single URL path segment.
///
/// Ids and screen names go through this before they are formatted into a
/// path, so `/`, `?`, `#` and `:` in a value cannot change the request target.
///
/// ```
/// assert_eq!(social_http::path_segment("a/b?c"), "a%2Fb%3Fc");
/// assert_eq!(social_http::path_segment("habuma"), "habuma");
/// ```
pub fn path_segment(value: &str) -> String {
    oauth1::percent_encode(value)
}

/// Pull a human-readable message out of a provider error payload.
///
/// Understands `{"error": "..."}`, `{"error": {"message": "..."}}`,
/// `{"errors": [{"message": "..."}]}`, `{"errors": "..."}` and a top-level
/// `message`/`detail`. Returns `None` for anything else, including non-JSON.
///
/// ```
/// use social_http::error_message;
///
/// let body = br#"{"error":{"type":"OAuthException","message":"(#803) Bad alias"}}"#;
/// assert_eq!(error_message(body).as_deref(), Some("(#803) Bad alias"));
/// assert_eq!(error_message(b"<html>"), None);
/// ```
pub fn error_message(body: &[u8]) -> Option<String> {
    use serde_json::Value;

    let v: Value = serde_json::from_slice(body).ok()?;
    let non_empty = |v: &Value| {
        v.as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    match v.get("error") {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Object(obj)) => {
            if let Some(m) = obj.get("message").and_then(non_empty) {
                return Some(m);
            }
        }
        _ => {}
    }
    match v.get("errors") {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let found = items.first().and_then(|first| {
                ["message", "detail", "title"]
                    .iter()
                    .find_map(|k| first.get(*k).and_then(non_empty))
            });
            if found.is_some() {
                return found;
            }
        }
        _ => {}
    }
    ["message", "detail"]
        .iter()
        .find_map(|k| v.get(*k).and_then(non_empty))
}

fn retry_after_delay_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

fn sanitize_token(raw: &str) -> Result<String, HttpError> {
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();

    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("token contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build("token contains control characters".into()));
    }

    HeaderValue::from_str(&format!("OAuth {}", s))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}
