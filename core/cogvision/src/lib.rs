//! Cloud photo analysis: find faces and their dominant emotion, or describe a
//! photo with tags.
//!
//! # Example
//!
//! ```no_run
//! use cogvision::{EmotionClient, ServiceConfig};
//!
//! # async fn run() -> cogvision::Result<()> {
//! let photo = std::fs::read("party.png").unwrap();
//! let client = EmotionClient::new(ServiceConfig::from_env()?)?;
//! for face in client.analyze(&photo).await? {
//!     println!("{:?}: {} {}", face.rect, face.emotion, face.emotion.emojis()[0]);
//! }
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

mod client;
mod emotion;
mod encode;
mod error;
pub mod normalize;
mod request;
mod tags;
/// HTTP transport trait and the default `reqwest` backend.
pub mod transport;

pub use client::{EmotionClient, TagClient};
pub use emotion::{Emotion, EmotionResult, Rectangle};
pub use encode::{encode_for_upload, MAX_UPLOAD_BYTES};
pub use error::{BoxError, CognitiveError, Result};
pub use request::{AnalysisRequest, OCTET_STREAM, SUBSCRIPTION_KEY_HEADER};
pub use tags::{hashtags, Tag};
pub use transport::{Reply, ReqwestTransport, Transport};

/// Emotion recognition endpoint used unless overridden.
pub const DEFAULT_EMOTION_ENDPOINT: &str = "https://api.projectoxford.ai/emotion/v1.0/recognize";

/// Vision analysis endpoint, restricted to tags, used unless overridden.
pub const DEFAULT_VISION_ENDPOINT: &str =
    "https://api.projectoxford.ai/vision/v1.0/analyze?visualFeatures=Tags";

/// Environment variable read by [`ServiceConfig::from_env`].
pub const SUBSCRIPTION_KEY_ENV: &str = "COGNITIVE_SERVICES_KEY";

/// JPEG quality used for uploads unless overridden.
const DEFAULT_JPEG_QUALITY: f32 = 0.9;

/// Connection settings shared by [`EmotionClient`] and [`TagClient`].
///
/// Setters consume and return the config; values are checked when a client
/// is built from it.
///
/// ```
/// use cogvision::ServiceConfig;
///
/// let config = ServiceConfig::new("my-key")
///     .emotion_endpoint("http://127.0.0.1:8080/recognize")
///     .jpeg_quality(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct ServiceConfig {
    pub(crate) subscription_key: String,
    pub(crate) emotion_endpoint: String,
    pub(crate) vision_endpoint: String,
    pub(crate) jpeg_quality: f32,
}

impl ServiceConfig {
    /// Create a config for `subscription_key` with the default endpoints.
    pub fn new(subscription_key: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            emotion_endpoint: DEFAULT_EMOTION_ENDPOINT.to_string(),
            vision_endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Read the subscription key from `COGNITIVE_SERVICES_KEY`.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(SUBSCRIPTION_KEY_ENV).map_err(|e| {
            CognitiveError::Configuration(format!("{SUBSCRIPTION_KEY_ENV}: {e}"))
        })?;
        Ok(Self::new(key))
    }

    /// Override the emotion recognition endpoint.
    pub fn emotion_endpoint(mut self, url: impl Into<String>) -> Self {
        self.emotion_endpoint = url.into();
        self
    }

    /// Override the vision analysis endpoint.
    pub fn vision_endpoint(mut self, url: impl Into<String>) -> Self {
        self.vision_endpoint = url.into();
        self
    }

    /// Set the upload JPEG quality from 0.0 (lowest) to 1.0 (highest).
    /// Default: 0.9.
    pub fn jpeg_quality(mut self, quality: f32) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Check every setting without touching the network.
    pub fn validate(&self) -> Result<()> {
        if self.subscription_key.is_empty() {
            return Err(CognitiveError::Configuration(
                "subscription key must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.jpeg_quality) {
            return Err(CognitiveError::Configuration(format!(
                "jpeg quality must be between 0.0 and 1.0, got {}",
                self.jpeg_quality
            )));
        }
        // A throwaway request catches bad endpoints and non-header-safe keys.
        for endpoint in [&self.emotion_endpoint, &self.vision_endpoint] {
            AnalysisRequest::build(Vec::new(), &self.subscription_key, endpoint)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("subscription_key", &"<redacted>")
            .field("emotion_endpoint", &self.emotion_endpoint)
            .field("vision_endpoint", &self.vision_endpoint)
            .field("jpeg_quality", &self.jpeg_quality)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServiceConfig::new("key");
        assert_eq!(config.emotion_endpoint, DEFAULT_EMOTION_ENDPOINT);
        assert_eq!(config.vision_endpoint, DEFAULT_VISION_ENDPOINT);
        assert!((config.jpeg_quality - 0.9).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_key_is_invalid() {
        assert!(matches!(
            ServiceConfig::new("").validate(),
            Err(CognitiveError::Configuration(_))
        ));
    }

    #[test]
    fn quality_out_of_range_is_invalid() {
        assert!(ServiceConfig::new("key").jpeg_quality(1.5).validate().is_err());
        assert!(ServiceConfig::new("key").jpeg_quality(-0.1).validate().is_err());
    }

    #[test]
    fn bad_endpoint_is_invalid() {
        let config = ServiceConfig::new("key").vision_endpoint("::not a url::");
        assert!(matches!(
            config.validate(),
            Err(CognitiveError::Configuration(_))
        ));
    }

    #[test]
    fn debug_hides_key() {
        let rendered = format!("{:?}", ServiceConfig::new("top-secret"));
        assert!(!rendered.contains("top-secret"));
    }
}
