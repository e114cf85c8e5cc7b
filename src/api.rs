//! Synchronous client for the **FRED REST API**.
//!
//! Covers three endpoints: `series` (metadata), `series/observations` and
//! `series/search`. Every call issues blocking GET requests and returns the decoded
//! JSON; mapping into typed values is left to [`crate::models`].
//!
//! ### Notes
//! - Default parameters (`api_key`, `file_type=json`) are captured from [`Config`] when the
//!   client is built and sent with every request. Per-call parameters with the same key win.
//! - No retries: any non-success status or undecodable body is returned as a
//!   [`TransportError`] and aborts the operation.
//! - Network timeouts come from [`Config`] (30s total, 10s connect by default).
//!
//! Typical usage:
//! ```no_run
//! # use fred_rs::{Client, Config, ObservationQuery, Series};
//! let client = Client::new(Config::from_env())?;
//! let raw = client.fetch_series("GDP", &ObservationQuery::new().limit(8).to_params())?;
//! let series = Series::from_api_response(&raw);
//! # Ok::<(), fred_rs::TransportError>(())
//! ```
use crate::config::Config;
use crate::error::{Result, TransportError, redact};
use crate::models::{SeriesInfo, Series, search_results};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use thiserror::Error;

/// Empty extra-parameter list, for calls that need none.
pub const NO_PARAMS: &[(&str, &str)] = &[];

/// Why a metadata and an observations response could not be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("series metadata is not a json object")]
    MetadataNotObject,
    #[error("observations response has no `observations` key")]
    MissingObservations,
}

/// Combine a `series` response with a `series/observations` response.
///
/// Every key of `info` is kept as-is except `observations`, which always comes from
/// `observations_response` (replacing any value `info` carried).
pub fn merge_series_response(
    info: Value,
    observations_response: Value,
) -> std::result::Result<Value, ShapeError> {
    let Value::Object(mut combined) = info else {
        return Err(ShapeError::MetadataNotObject);
    };
    let observations = match observations_response {
        Value::Object(mut m) => m
            .remove("observations")
            .ok_or(ShapeError::MissingObservations)?,
        _ => return Err(ShapeError::MissingObservations),
    };
    combined.insert("observations".to_string(), observations);
    Ok(Value::Object(combined))
}

/// Lay `layer` over `base`: a key already present takes the new value in place,
/// new keys are appended in order.
fn overlay<K, V>(base: &mut Vec<(String, String)>, layer: &[(K, V)])
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (k, v) in layer {
        let (k, v) = (k.as_ref(), v.as_ref());
        match base.iter_mut().find(|(bk, _)| bk == k) {
            Some(slot) => slot.1 = v.to_string(),
            None => base.push((k.to_string(), v.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    params: Vec<(String, String)>,
    http: HttpClient,
}

impl Client {
    pub fn new(config: Config) -> Result<Self> {
        if config.api_key.is_none() {
            log::warn!(
                "no FRED api key configured (set {}); requests will likely be rejected",
                crate::config::API_KEY_VAR
            );
        }
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(Policy::limited(5))
            .user_agent(concat!("fred_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self {
            params: config.default_params(),
            base_url: config.base_url,
            http,
        })
    }

    /// Shorthand for `Client::new(Config::from_env())`.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env())
    }

    /// Root URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default query parameters sent with every request.
    pub fn default_params(&self) -> &[(String, String)] {
        &self.params
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get_json(&self, path: &str, call: &[(String, String)]) -> Result<Value> {
        let endpoint = self.endpoint(path);
        let mut params = self.params.clone();
        overlay(&mut params, call);

        let request = self
            .http
            .get(&endpoint)
            .query(&params)
            .build()
            .map_err(|source| TransportError::Request {
                url: endpoint.clone(),
                source: source.without_url(),
            })?;
        let url = redact(request.url().as_str());
        log::debug!("GET {}", url);

        let resp = self
            .http
            .execute(request)
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source: source.without_url(),
            })?;
        let status = resp.status();
        log::debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            return Err(TransportError::Status { url, status });
        }

        let body = resp.text().map_err(|source| TransportError::Request {
            url: url.clone(),
            source: source.without_url(),
        })?;
        serde_json::from_str(&body).map_err(|source| TransportError::Decode { url, source })
    }

    /// Fetch metadata for one series (`GET {base}/series?series_id=...`).
    ///
    /// ### Errors
    /// - Network error
    /// - Non-success HTTP status
    /// - Body is not valid JSON
    pub fn fetch_series_info(&self, series_id: &str) -> Result<Value> {
        let call = vec![("series_id".to_string(), series_id.to_string())];
        self.get_json("series", &call)
    }

    /// Fetch metadata, then observations, and combine them with [`merge_series_response`].
    ///
    /// The two requests run strictly in order; a failure of either aborts the call with no
    /// partial result. `extra` is passed to the observations request only.
    pub fn fetch_series<K, V>(&self, series_id: &str, extra: &[(K, V)]) -> Result<Value>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let info = self.fetch_series_info(series_id)?;

        let mut call = vec![("series_id".to_string(), series_id.to_string())];
        overlay(&mut call, extra);
        let observations = self.get_json("series/observations", &call)?;

        merge_series_response(info, observations).map_err(|reason| TransportError::Shape {
            url: self.endpoint("series/observations"),
            reason: reason.to_string(),
        })
    }

    /// Search series by free text (`GET {base}/series/search?search_text=...`).
    /// The response is returned unchanged.
    pub fn search_series<K, V>(&self, search_text: &str, extra: &[(K, V)]) -> Result<Value>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut call = vec![("search_text".to_string(), search_text.to_string())];
        overlay(&mut call, extra);
        self.get_json("series/search", &call)
    }

    /// [`Client::fetch_series`] followed by [`Series::from_api_response`].
    pub fn get_series<K, V>(&self, series_id: &str, extra: &[(K, V)]) -> Result<Series>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw = self.fetch_series(series_id, extra)?;
        Ok(Series::from_api_response(&raw))
    }

    /// [`Client::search_series`] followed by [`search_results`].
    pub fn search<K, V>(&self, search_text: &str, extra: &[(K, V)]) -> Result<Vec<SeriesInfo>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw = self.search_series(search_text, extra)?;
        Ok(search_results(&raw))
    }
}
