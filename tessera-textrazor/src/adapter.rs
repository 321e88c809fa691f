use async_trait::async_trait;
use serde::Deserialize;
use tessera_core::{ExtractionResponse, RawEntity, RazorConfig, TesseraError};
use url::Url;

use crate::NAME;

/// Transport seam for the TextRazor analyze call.
///
/// The connector only ever talks to this trait, so tests can swap the HTTP
/// round trip for a closure (see `from_fn` under the `test-adapters` feature).
#[async_trait]
pub trait RazorApi: Send + Sync {
    /// Submit `text` for analysis and return the entity records found.
    async fn analyze(&self, text: &str) -> Result<ExtractionResponse, TesseraError>;
}

/// Production adapter backed by a `reqwest` client.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    extractors: String,
}

impl std::fmt::Debug for RealAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealAdapter")
            .field("endpoint", &self.endpoint.as_str())
            .field("extractors", &self.extractors)
            .finish_non_exhaustive()
    }
}

impl RealAdapter {
    /// Build an adapter with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns `Config` if the key is blank, the endpoint is not a valid
    /// absolute URL, or the HTTP client cannot be constructed.
    pub fn new(cfg: &RazorConfig) -> Result<Self, TesseraError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TesseraError::Config(format!("http client: {e}")))?;
        Self::with_client(http, cfg)
    }

    /// Build an adapter around an existing HTTP client.
    ///
    /// # Errors
    /// Same as [`new`](Self::new), minus client construction.
    pub fn with_client(http: reqwest::Client, cfg: &RazorConfig) -> Result<Self, TesseraError> {
        if cfg.api_key.trim().is_empty() {
            return Err(TesseraError::Config("TextRazor API key is empty".into()));
        }
        let endpoint = Url::parse(&cfg.endpoint)
            .map_err(|e| TesseraError::Config(format!("invalid endpoint {:?}: {e}", cfg.endpoint)))?;
        Ok(Self {
            http,
            endpoint,
            api_key: cfg.api_key.clone(),
            extractors: cfg.extractors.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    response: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    entities: Vec<RawEntity>,
}

/// Decode a TextRazor response body.
///
/// A body without a `response` object yields an empty entity list unless the
/// service flagged the request with `ok: false`.
pub(crate) fn decode_body(body: &str) -> Result<ExtractionResponse, TesseraError> {
    let env: Envelope = serde_json::from_str(body)?;
    if env.ok == Some(false) {
        let msg = env.error.unwrap_or_else(|| "request rejected".to_string());
        return Err(TesseraError::extraction(NAME, msg));
    }
    let entities = env.response.map(|p| p.entities).unwrap_or_default();
    Ok(ExtractionResponse::new(entities))
}

fn map_http_err(e: &reqwest::Error) -> TesseraError {
    if e.is_timeout() {
        TesseraError::extraction(NAME, format!("request timed out: {e}"))
    } else if e.is_connect() {
        TesseraError::extraction(NAME, format!("connection failed: {e}"))
    } else {
        TesseraError::extraction(NAME, e.to_string())
    }
}

#[async_trait]
impl RazorApi for RealAdapter {
    async fn analyze(&self, text: &str) -> Result<ExtractionResponse, TesseraError> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("x-textrazor-key", &self.api_key)
            .form(&[("extractors", self.extractors.as_str()), ("text", text)])
            .send()
            .await
            .map_err(|e| map_http_err(&e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| map_http_err(&e))?;
        if !status.is_success() {
            let detail = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|env| env.error)
                .unwrap_or(body);
            return Err(TesseraError::extraction(
                NAME,
                format!("status {}: {detail}", status.as_u16()),
            ));
        }
        decode_body(&body)
    }
}

#[cfg(feature = "test-adapters")]
impl dyn RazorApi {
    /// Test helper that builds a `RazorApi` from a closure over the submitted text.
    pub fn from_fn<F>(f: F) -> std::sync::Arc<dyn RazorApi>
    where
        F: Send + Sync + 'static + Fn(&str) -> Result<ExtractionResponse, TesseraError>,
    {
        struct FnApi<F>(F);

        #[async_trait]
        impl<F> RazorApi for FnApi<F>
        where
            F: Send + Sync + 'static + Fn(&str) -> Result<ExtractionResponse, TesseraError>,
        {
            async fn analyze(&self, text: &str) -> Result<ExtractionResponse, TesseraError> {
                (self.0)(text)
            }
        }

        std::sync::Arc::new(FnApi(f))
    }
}
