//! X REST API client.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    config::{RateLimitInfo, TwitterConfig},
    error::{TwitterError, TwitterResult},
    oauth::OAuthSigner,
    types::{ApiErrorBody, CreateTweetRequest, CreateTweetResponse},
};

/// X REST API client.
///
/// Requests are sent once. Failures are returned to the caller without retry.
#[derive(Debug)]
pub struct TwitterApiClient {
    client: Client,
    base_url: String,
    oauth_signer: OAuthSigner,
}

impl TwitterApiClient {
    /// Create a new API client from configuration.
    pub fn new(config: &TwitterConfig) -> TwitterResult<Self> {
        let parsed = Url::parse(&config.api_url).map_err(|e| {
            TwitterError::Config(format!("invalid API URL {:?}: {e}", config.api_url))
        })?;
        if !matches!(parsed.scheme(), "https" | "http") {
            return Err(TwitterError::Config(format!(
                "API URL must be http(s): {:?}",
                config.api_url
            )));
        }
        let base_url = parsed.as_str().trim_end_matches('/').to_string();

        let mut builder = Client::builder().user_agent(format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            oauth_signer: OAuthSigner::new(config),
        })
    }

    /// Make an authenticated POST request with a JSON body using OAuth 1.0a.
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> TwitterResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let auth_header = self.oauth_signer.sign("POST", &url, &[])?;

        debug!(endpoint, "Making X API request");
        let response = self
            .client
            .post(&url)
            .header("Authorization", &auth_header)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> TwitterResult<T> {
        let status = response.status();

        let rate_limit = RateLimitInfo::from_headers(response.headers());
        if rate_limit.is_exhausted() {
            debug!(
                limit = ?rate_limit.limit,
                reset = ?rate_limit.reset,
                "Posting window exhausted"
            );
        }

        let bytes = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(TwitterError::from);
        }

        let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or_else(|_| ApiErrorBody {
            detail: Some(String::from_utf8_lossy(&bytes).into_owned()).filter(|s| !s.is_empty()),
            ..Default::default()
        });

        let message = body
            .detail
            .or(body.title)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").into());

        // 429 covers both the per-window limit and the monthly usage cap
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TwitterError::RateLimited {
                message,
                error_type: body.error_type,
                reset: rate_limit.reset,
            });
        }

        Err(TwitterError::Api {
            status: status.as_u16(),
            message,
            error_type: body.error_type,
        })
    }

    /// Create a new post.
    pub async fn create_tweet(
        &self,
        request: &CreateTweetRequest,
    ) -> TwitterResult<CreateTweetResponse> {
        self.post("/2/tweets", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header_exists, method, path},
    };

    /// Create a test config pointing to the mock server.
    fn test_config(mock_server: &MockServer) -> TwitterConfig {
        TwitterConfig {
            consumer_key: "test_consumer_key".into(),
            consumer_secret: "test_consumer_secret".into(),
            access_token: "test_access_token".into(),
            access_token_secret: "test_access_token_secret".into(),
            bearer_token: Some("test_bearer_token".into()),
            api_url: mock_server.uri(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_tweet_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(header_exists("Authorization"))
            .and(body_json(serde_json::json!({ "text": "Hello, X!" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {
                    "id": "1234567890",
                    "text": "Hello, X!"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TwitterApiClient::new(&test_config(&mock_server)).unwrap();

        let response = client
            .create_tweet(&CreateTweetRequest::text("Hello, X!"))
            .await
            .unwrap();
        assert_eq!(response.data.id, "1234567890");
        assert_eq!(response.data.text, "Hello, X!");
    }

    #[tokio::test]
    async fn test_authorization_is_oauth1() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": { "id": "1", "text": "x" }
            })))
            .mount(&mock_server)
            .await;

        let client = TwitterApiClient::new(&test_config(&mock_server)).unwrap();
        client
            .create_tweet(&CreateTweetRequest::text("x"))
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let auth = requests[0]
            .headers
            .get("authorization")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(auth.starts_with("OAuth "));
        assert!(auth.contains(r#"oauth_consumer_key="test_consumer_key""#));
        assert!(!auth.contains("test_bearer_token"));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("x-rate-limit-remaining", "0")
                    .insert_header("x-rate-limit-reset", "1700000000")
                    .set_body_json(serde_json::json!({
                        "title": "Too Many Requests",
                        "detail": "Too Many Requests",
                        "type": "about:blank",
                        "status": 429
                    })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TwitterApiClient::new(&test_config(&mock_server)).unwrap();

        let err = client
            .create_tweet(&CreateTweetRequest::text("hi"))
            .await
            .unwrap_err();
        match err {
            TwitterError::RateLimited {
                message,
                error_type,
                reset,
            } => {
                assert_eq!(message, "Too Many Requests");
                assert_eq!(error_type.as_deref(), Some("about:blank"));
                assert_eq!(reset, Some(1_700_000_000));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_usage_cap_keeps_provider_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "title": "UsageCapExceeded",
                "detail": "Usage cap exceeded: Monthly product cap",
                "type": "https://api.twitter.com/2/problems/usage-capped",
                "status": 429
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TwitterApiClient::new(&test_config(&mock_server)).unwrap();

        let err = client
            .create_tweet(&CreateTweetRequest::text("hi"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("Usage cap exceeded: Monthly product cap"));
        assert!(matches!(
            err,
            TwitterError::RateLimited {
                reset: None,
                error_type: Some(ref t),
                ..
            } if t.ends_with("usage-capped")
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let config = TwitterConfig {
            api_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        };
        let client = TwitterApiClient::new(&config).unwrap();

        let err = client
            .create_tweet(&CreateTweetRequest::text("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, TwitterError::Http(_)));
        assert_eq!(err.status(), None);
        assert!(!err.is_auth_failure());
    }

    #[tokio::test]
    async fn test_error_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "title": "Unauthorized",
                "detail": "Unauthorized",
                "type": "about:blank",
                "status": 401
            })))
            .mount(&mock_server)
            .await;

        let client = TwitterApiClient::new(&test_config(&mock_server)).unwrap();

        let err = client
            .create_tweet(&CreateTweetRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
        assert!(matches!(err, TwitterError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_error_plain_text_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        let client = TwitterApiClient::new(&test_config(&mock_server)).unwrap();

        let err = client
            .create_tweet(&CreateTweetRequest::text("hi"))
            .await
            .unwrap_err();
        match err {
            TwitterError::Api {
                status, message, ..
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = TwitterApiClient::new(&test_config(&mock_server)).unwrap();

        let err = client
            .create_tweet(&CreateTweetRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, TwitterError::Json(_)));
    }

    #[test]
    fn test_rejects_non_http_url() {
        for api_url in ["ftp://example.com", "http://", "not a url", ""] {
            let config = TwitterConfig {
                api_url: api_url.into(),
                ..Default::default()
            };
            assert!(
                matches!(TwitterApiClient::new(&config), Err(TwitterError::Config(_))),
                "accepted {api_url:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_accepts_uppercase_scheme() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": { "id": "7", "text": "hi" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = TwitterConfig {
            api_url: format!("{}/", mock_server.uri().replacen("http", "HTTP", 1)),
            ..test_config(&mock_server)
        };
        let client = TwitterApiClient::new(&config).unwrap();

        let response = client
            .create_tweet(&CreateTweetRequest::text("hi"))
            .await
            .unwrap();
        assert_eq!(response.data.id, "7");
    }
}
