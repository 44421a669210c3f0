use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;

use crate::emotion::EmotionResult;
use crate::encode::encode_for_upload;
use crate::error::{CognitiveError, Result};
use crate::normalize::{normalize_emotions, normalize_tags};
use crate::request::AnalysisRequest;
use crate::tags::Tag;
use crate::transport::{ReqwestTransport, Transport};
use crate::ServiceConfig;

/// Client for the emotion recognition service.
///
/// Cheap to clone; clones share the transport. Every call is one independent
/// exchange with no retries and no caching.
#[derive(Clone)]
pub struct EmotionClient {
    inner: Exchange,
}

impl EmotionClient {
    /// Create a client using the default `reqwest` transport.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(config: ServiceConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Exchange { config, transport },
        })
    }

    /// Detect faces in `image` and return the dominant emotion of each.
    ///
    /// `image` may be any format the `image` crate decodes; it is re-encoded
    /// as JPEG before upload. Results follow the order of the service reply.
    pub async fn analyze(&self, image: &[u8]) -> Result<Vec<EmotionResult>> {
        let endpoint = self.inner.config.emotion_endpoint.clone();
        let reply = self.inner.round_trip(&endpoint, image).await?;
        let results = normalize_emotions(&reply);
        tracing::debug!(faces = results.len(), "emotion analysis finished");
        Ok(results)
    }

    /// Run [`analyze`](Self::analyze) on the tokio runtime and hand the
    /// outcome to `completion`, which is called exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_analyze<F>(&self, image: Vec<u8>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<EmotionResult>>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let outcome = client.analyze(&image).await;
            completion(outcome);
        })
    }
}

/// Client for the vision analysis service's image tagging.
#[derive(Clone)]
pub struct TagClient {
    inner: Exchange,
}

impl TagClient {
    /// Create a client using the default `reqwest` transport.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(config: ServiceConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Exchange { config, transport },
        })
    }

    /// Describe `image` with tags, in the order the service ranked them.
    pub async fn analyze(&self, image: &[u8]) -> Result<Vec<Tag>> {
        let endpoint = self.inner.config.vision_endpoint.clone();
        let reply = self.inner.round_trip(&endpoint, image).await?;
        let tags = normalize_tags(&reply);
        tracing::debug!(tags = tags.len(), "tag analysis finished");
        Ok(tags)
    }

    /// Run [`analyze`](Self::analyze) on the tokio runtime and hand the
    /// outcome to `completion`, which is called exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_analyze<F>(&self, image: Vec<u8>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<Tag>>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let outcome = client.analyze(&image).await;
            completion(outcome);
        })
    }
}

#[derive(Clone)]
struct Exchange {
    config: ServiceConfig,
    transport: Arc<dyn Transport>,
}

impl Exchange {
    /// Encode, send once, and decode the reply body as JSON.
    async fn round_trip(&self, endpoint: &str, image: &[u8]) -> Result<Value> {
        let quality = self.config.jpeg_quality;
        let input = image.to_vec();
        let upload = tokio::task::spawn_blocking(move || encode_for_upload(&input, quality))
            .await
            .map_err(|e| CognitiveError::Encode(e.to_string()))??;

        let request = AnalysisRequest::build(upload, &self.config.subscription_key, endpoint)?;
        tracing::debug!(url = %request.url, bytes = request.body.len(), "sending analysis request");

        let reply = self
            .transport
            .execute(request)
            .await
            .map_err(CognitiveError::Transport)?;

        if !reply.is_success() {
            tracing::warn!(status = reply.status, "analysis service reported a failure");
        }
        if reply.body.is_empty() {
            return Err(CognitiveError::EmptyResponse);
        }

        serde_json::from_slice(&reply.body).map_err(|source| CognitiveError::Parse {
            source,
            status: (!reply.is_success()).then_some(reply.status),
        })
    }
}
