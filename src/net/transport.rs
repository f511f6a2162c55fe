//! HTTP transport seam for the auth client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth client's failure policy (offline fallback vs. hard failure)
//! depends on *how* a request failed, so the transport reports a reply or a
//! pre-status failure and nothing else. Production uses `gloo-net`; native
//! tests drive the client with scripted fakes.

/// A completed HTTP exchange: the status line and raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    /// Whether the status is in the 2xx success range.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A failure that happened before any HTTP status existed (DNS, refused
/// connection, aborted fetch). Carries the transport's own message, which
/// the error taxonomy classifies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
}

/// POST-with-JSON transport used by the auth client.
#[allow(async_fn_in_trait)]
pub trait AuthTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpReply, FetchFailure>;
}

/// Browser transport over `gloo-net`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "csr")]
impl AuthTransport for GlooTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpReply, FetchFailure> {
        let request = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| FetchFailure { message: e.to_string() })?;
        let response = request
            .send()
            .await
            .map_err(|e| FetchFailure { message: e.to_string() })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure { message: e.to_string() })?;
        Ok(HttpReply { status, body })
    }
}
