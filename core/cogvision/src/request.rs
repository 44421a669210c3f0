use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};

use crate::error::CognitiveError;

/// Header carrying the service subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Content type of a raw binary image body.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A fully described outbound analysis request.
///
/// Built without side effects; a [`crate::Transport`] performs it.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Always `POST`.
    pub method: Method,
    /// Service endpoint.
    pub url: Url,
    /// Subscription key and content type.
    pub headers: HeaderMap,
    /// Encoded image bytes.
    pub body: Vec<u8>,
}

impl AnalysisRequest {
    /// Describe a POST of `image` to `endpoint`, authenticated with `subscription_key`.
    pub fn build(
        image: Vec<u8>,
        subscription_key: &str,
        endpoint: &str,
    ) -> Result<Self, CognitiveError> {
        if subscription_key.is_empty() {
            return Err(CognitiveError::Configuration(
                "subscription key must not be empty".to_string(),
            ));
        }

        let url = Url::parse(endpoint).map_err(|e| {
            CognitiveError::Configuration(format!("invalid endpoint {endpoint:?}: {e}"))
        })?;

        let mut key = HeaderValue::from_str(subscription_key).map_err(|_| {
            CognitiveError::Configuration(
                "subscription key is not a valid header value".to_string(),
            )
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("ocp-apim-subscription-key"), key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM));

        Ok(Self {
            method: Method::POST,
            url,
            headers,
            body: image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://api.projectoxford.ai/emotion/v1.0/recognize";

    #[test]
    fn builds_octet_stream_post() {
        let request = AnalysisRequest::build(vec![1, 2, 3], "secret", ENDPOINT).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.as_str(), ENDPOINT);
        assert_eq!(request.headers[SUBSCRIPTION_KEY_HEADER], "secret");
        assert_eq!(request.headers[CONTENT_TYPE], OCTET_STREAM);
        assert_eq!(request.body, vec![1, 2, 3]);
    }

    #[test]
    fn key_header_is_sensitive() {
        let request = AnalysisRequest::build(Vec::new(), "secret", ENDPOINT).unwrap();
        assert!(request.headers[SUBSCRIPTION_KEY_HEADER].is_sensitive());
    }

    #[test]
    fn empty_key_fails_fast() {
        let err = AnalysisRequest::build(vec![1], "", ENDPOINT).unwrap_err();
        assert!(matches!(err, CognitiveError::Configuration(_)));
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let err = AnalysisRequest::build(vec![1], "abc\ndef", ENDPOINT).unwrap_err();
        assert!(matches!(err, CognitiveError::Configuration(_)));
    }

    #[test]
    fn malformed_endpoint_is_rejected() {
        let err = AnalysisRequest::build(vec![1], "secret", "not a url").unwrap_err();
        assert!(matches!(err, CognitiveError::Configuration(_)));
    }
}
