#![allow(dead_code)]

use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock::matchers::*;
use serde_json::json;
use gemini_relay::RelayConfig;

pub const TEST_KEY: &str = "test-api-key";

/// Mock Gemini upstream
pub struct GeminiMockServer
{   pub server: MockServer
}

impl GeminiMockServer
{   pub async fn new() -> Self
    {   GeminiMockServer
        {   server: MockServer::start().await
        }
    }

    pub fn uri(&self) -> String
    {   self.server.uri()
    }

    fn model_path(model: &str) -> String
    {   format!("/v1/models/{}:generateContent", model)
    }

    async fn mount(
      &self
    , model: &str
    , response: ResponseTemplate
    , calls: u64
    )
    {   Mock::given(method("POST"))
          .and(path(Self::model_path(model)))
          .and(query_param("key", TEST_KEY))
          .respond_with(response)
          .expect(calls)
          .mount(&self.server)
          .await;
    }

    /// 200 with one candidate holding `text`
    pub async fn mock_reply(&self, model: &str, text: &str, calls: u64)
    {   self.mount(
          model,
          ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
              "content": { "role": "model", "parts": [{ "text": text }] },
              "finishReason": "STOP"
            }]
          })),
          calls
        ).await;
    }

    /// 200 with no candidates at all
    pub async fn mock_no_candidates(&self, model: &str, calls: u64)
    {   self.mount(
          model,
          ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "OTHER" }
          })),
          calls
        ).await;
    }

    pub async fn mock_status(&self, model: &str, status: u16, calls: u64)
    {   self.mount(
          model,
          ResponseTemplate::new(status).set_body_json(json!({
            "error": { "code": status, "status": "ERROR" }
          })),
          calls
        ).await;
    }

    pub async fn mock_raw(
      &self
    , model: &str
    , status: u16
    , body: &str
    , calls: u64
    )
    {   self.mount(
          model,
          ResponseTemplate::new(status).set_body_string(body),
          calls
        ).await;
    }

    /// 200 after `secs`, to trip the client timeout
    pub async fn mock_delayed(&self, model: &str, secs: u64)
    {   Mock::given(method("POST"))
          .and(path(Self::model_path(model)))
          .respond_with(
            ResponseTemplate::new(200)
              .set_delay(std::time::Duration::from_secs(secs))
          )
          .mount(&self.server)
          .await;
    }

    /// Models requested so far, in order
    pub async fn requested_models(&self) -> Vec<String>
    {   self.server
          .received_requests()
          .await
          .unwrap_or_default()
          .iter()
          .map(|r| {
            r.url.path()
              .trim_start_matches("/v1/models/")
              .trim_end_matches(":generateContent")
              .to_string()
          })
          .collect()
    }
}

/// Config pointing at `base` with a key set
pub fn config_for(base: &str, model: &str, fallbacks: &[&str]) -> RelayConfig
{   RelayConfig
    {   api_key: Some(TEST_KEY.to_string())
      , model: model.to_string()
      , api_base: base.to_string()
      , fallback_models: fallbacks.iter().map(|m| m.to_string()).collect()
      , ..RelayConfig::default()
    }
}
