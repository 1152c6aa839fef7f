use crate::config::LineConfig;
use crate::datasources::REQUEST_TIMEOUT;
use crate::error::{Result, WeatherPushError};
use serde::Serialize;

const API_BASE_URL: &str = "https://api.line.me";
const PUSH_PATH: &str = "/v2/bot/message/push";
const SERVICE: &str = "line push";

/// LINE Messaging API push client for a single recipient
pub struct LineClient {
    client: reqwest::Client,
    base_url: String,
    config: LineConfig,
}

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

impl LineClient {
    pub fn new(config: LineConfig) -> Result<Self> {
        Self::with_base_url(config, API_BASE_URL)
    }

    pub fn with_base_url(config: LineConfig, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WeatherPushError::network(SERVICE))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Push one text message to the configured user.
    pub async fn push(&self, text: &str) -> Result<()> {
        let body = PushRequest {
            to: &self.config.user_id,
            messages: [TextMessage { kind: "text", text }],
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, PUSH_PATH))
            .bearer_auth(&self.config.channel_access_token)
            .json(&body)
            .send()
            .await
            .map_err(WeatherPushError::network(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %detail, "LINE rejected push");
            return Err(WeatherPushError::HttpStatus {
                service: SERVICE,
                code: status.as_u16(),
            });
        }

        tracing::info!(chars = text.chars().count(), "pushed message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_config() -> LineConfig {
        LineConfig {
            channel_access_token: "test_token".to_string(),
            user_id: "U1234".to_string(),
        }
    }

    #[tokio::test]
    async fn push_posts_text_message_with_bearer_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/push"))
            .and(header("Authorization", "Bearer test_token"))
            .and(body_json(serde_json::json!({
                "to": "U1234",
                "messages": [{"type": "text", "text": "【テスト】\n・晴れ"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LineClient::with_base_url(sample_config(), &mock_server.uri()).unwrap();
        client.push("【テスト】\n・晴れ").await.unwrap();
    }

    #[tokio::test]
    async fn rejected_push_is_http_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Authentication failed"})),
            )
            .mount(&mock_server)
            .await;

        let client = LineClient::with_base_url(sample_config(), &mock_server.uri()).unwrap();
        let err = client.push("hello").await.unwrap_err();
        assert!(
            matches!(err, WeatherPushError::HttpStatus { code: 401, .. }),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let client = LineClient::with_base_url(sample_config(), "http://127.0.0.1:1").unwrap();
        let err = client.push("hello").await.unwrap_err();
        assert!(matches!(err, WeatherPushError::Network { .. }), "{err:?}");
    }
}
