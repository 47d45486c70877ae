use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::color::normalize;
use crate::error::{ColorError, Result};
use crate::record::ColorRecord;

/// Public color information service queried by default.
pub const DEFAULT_BASE_URL: &str = "https://www.thecolorapi.com";

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One GET round trip. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpReply>;
}

/// [`Transport`] over `reqwest`, with the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpReply> {
        let resp = self.client.get(url).query(query).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(HttpReply { status, body })
    }
}

#[derive(Debug, Deserialize)]
struct Field {
    value: String,
}

/// The parts of the service's `/id` response that end up in a record.
#[derive(Debug, Deserialize)]
struct IdResponse {
    hex: Field,
    name: Option<Field>,
    rgb: Option<Field>,
    hsl: Option<Field>,
    cmyk: Option<Field>,
    contrast: Option<Field>,
}

/// Looks colors up on a remote color information service.
///
/// Every call is an independent single round trip; nothing is shared between
/// in-flight lookups.
pub struct RemoteColorLookup<T> {
    transport: T,
    base_url: String,
}

impl RemoteColorLookup<HttpTransport> {
    /// Lookup over HTTP against `base_url` (e.g. [`DEFAULT_BASE_URL`]).
    pub fn http(base_url: &str) -> Self {
        Self::new(HttpTransport::new(), base_url)
    }
}

impl<T: Transport> RemoteColorLookup<T> {
    pub fn new(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the service for `token` (hex, with or without `#`).
    ///
    /// Any transport failure, non-2xx status or unusable body is reported as
    /// [`ColorError::ColorNotFound`] carrying the searched term.
    pub async fn lookup(&self, token: &str) -> Result<ColorRecord> {
        let searched = token.trim();
        let query = searched.strip_prefix('#').unwrap_or(searched);
        let not_found = || ColorError::ColorNotFound(searched.to_string());
        if query.is_empty() {
            return Err(not_found());
        }

        let url = format!("{}/id", self.base_url);
        let reply = match self.transport.get(&url, &[("hex", query)]).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(%url, term = searched, error = %e, "color lookup failed");
                return Err(not_found());
            }
        };
        if !reply.is_success() {
            warn!(%url, term = searched, status = reply.status, "color lookup rejected");
            return Err(not_found());
        }

        let parsed: IdResponse = serde_json::from_str(&reply.body).map_err(|e| {
            warn!(term = searched, error = %e, "unexpected color lookup body");
            not_found()
        })?;
        let hex = normalize(&parsed.hex.value).map_err(|_| not_found())?;

        let value = |field: Option<Field>| field.map(|f| f.value);
        let mut record = ColorRecord::new(hex);
        record.name = value(parsed.name);
        record.rgb = value(parsed.rgb);
        record.hsl = value(parsed.hsl);
        record.cmyk = value(parsed.cmyk);
        record.contrast = value(parsed.contrast);
        record.searched = Some(searched.to_string());
        debug!(term = searched, hex = %record.hex, "color lookup succeeded");
        Ok(record)
    }
}
