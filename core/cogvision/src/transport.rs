use async_trait::async_trait;

use crate::error::BoxError;
use crate::request::AnalysisRequest;

/// Raw reply of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Response body, possibly empty.
    pub body: Vec<u8>,
}

impl Reply {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Pluggable HTTP backend.
///
/// Implement this trait to route requests through a different HTTP stack or
/// a test double, and pass it to a client's `with_transport`. An
/// implementation performs exactly one exchange per call and never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and wait for its reply.
    async fn execute(&self, request: AnalysisRequest) -> Result<Reply, BoxError>;
}

/// Transport backed by a shared `reqwest` client with its default timeout.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing `reqwest` client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: AnalysisRequest) -> Result<Reply, BoxError> {
        let AnalysisRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let response = self
            .http
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(Reply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let reply = |status| Reply {
            status,
            body: Vec::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(199).is_success());
        assert!(!reply(401).is_success());
        assert!(!reply(500).is_success());
    }
}
