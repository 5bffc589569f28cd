use log::{debug, info, warn};
use crate::config::RelayConfig;
use crate::failover::{candidate_models, FailoverSequence, Step};
use crate::providers::gemini::GeminiClient;
use crate::ReplyOutcome;

/// Turns a prompt into reply text. Never fails: every upstream
/// problem is folded into a readable message.
///
/// Holds no per-call state, so one instance is shared across
/// concurrent requests.
pub struct ReplyResolver
{   model: String
  , fallback_models: Vec<String>
  , /// `None` when no api key is configured
    client: Option<GeminiClient>
}

impl ReplyResolver
{   pub fn new(
      config: &RelayConfig
    ) -> Result<Self, crate::error::Error>
    {   let client = match &config.api_key
        {   Some(key) => Some(GeminiClient::new(key.clone(), config)?)
          , None => {
              warn!("GEMINI_API_KEY not set; replies will be a notice");
              None
            }
        };
        Ok(ReplyResolver
        {   model: config.model.clone()
          , fallback_models: config.fallback_models.clone()
          , client
        })
    }

    pub fn is_configured(&self) -> bool
    {   self.client.is_some()
    }

    /// Reply text for `prompt`
    pub async fn resolve(&self, prompt: &str) -> String
    {   self.resolve_outcome(prompt).await.into_reply()
    }

    pub async fn resolve_outcome(&self, prompt: &str) -> ReplyOutcome
    {   let client = match &self.client
        {   Some(client) => client
          , None => {
              return ReplyOutcome::Text(
                crate::UNCONFIGURED_MESSAGE.to_string()
              );
            }
        };

        let models = candidate_models(&self.model, &self.fallback_models);
        let mut sequence = FailoverSequence::new();

        for model in &models
        {   let attempt = client.generate_content(model, prompt).await;
            match sequence.advance(model, attempt)
            {   Step::Continue => continue
              , Step::ReturnSuccess(text) => {
                  info!("Reply from {} ({} chars)", model, text.len());
                  return ReplyOutcome::Text(text);
                }
              , Step::ReturnError(msg) => {
                  debug!("Stopping at {}: {}", model, msg);
                  return ReplyOutcome::ErrorMessage(msg);
                }
            }
        }

        sequence.exhausted()
    }
}
