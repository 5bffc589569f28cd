//! Failover logic across candidate model names

use log::{debug, warn};
use crate::error::Error;
use crate::{ReplyOutcome, UpstreamResult, NO_REPLY_MESSAGE};

/// Primary model first (trimmed, defaulted when blank), then each
/// fallback in order, skipping names already present
pub fn candidate_models(
  primary: &str
, fallbacks: &[String]
) -> Vec<String>
{   let primary = match primary.trim()
    {   "" => crate::config::DEFAULT_MODEL
      , name => name
    };
    let mut models = vec![primary.to_string()];
    for fallback in fallbacks
    {   if !models.iter().any(|m| m == fallback)
        {   models.push(fallback.clone());
        }
    }
    debug!("Candidate models: {:?}", models);
    models
}

/// What to do after one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step
{   Continue
  , ReturnSuccess(String)
  , ReturnError(String)
}

/// Most recent retryable failure
#[derive(Debug, Clone, PartialEq)]
pub enum LastFailure
{   Response
    {   status: u16
      , body: serde_json::Value
    }
  , Transport(Error)
}

impl LastFailure
{   pub fn describe(&self) -> String
    {   match self
        {   LastFailure::Response { status, body } => {
              crate::format_upstream_error(*status, body)
            }
          , LastFailure::Transport(e) => {
              format!("Gemini error: {}", e)
            }
        }
    }
}

/// Walk state over the candidate list
#[derive(Debug, Clone, Default)]
pub struct FailoverSequence
{   pub attempts: usize
  , pub last_failure: Option<LastFailure>
}

impl FailoverSequence
{   pub fn new() -> Self
    {   FailoverSequence::default()
    }

    /// Classify one attempt against `model`
    pub fn advance(
      &mut self
    , model: &str
    , attempt: Result<UpstreamResult, Error>
    ) -> Step
    {   self.attempts += 1;
        match attempt
        {   Err(e) => {
              warn!("Model {} failed in transport: {}", model, e);
              self.last_failure = Some(LastFailure::Transport(e));
              Step::Continue
            }
          , Ok(UpstreamResult::NoCandidates) => {
              // nominal success with nothing usable; last failure kept
              debug!("Model {} returned no candidates", model);
              Step::Continue
            }
          , Ok(UpstreamResult::Success(text)) => {
              if text.is_empty()
              {   warn!("Model {} returned empty text", model);
                  Step::ReturnError(NO_REPLY_MESSAGE.to_string())
              } else
              {   Step::ReturnSuccess(text)
              }
            }
          , Ok(UpstreamResult::NotFound(body)) => {
              warn!("Model {} not found, trying next", model);
              self.last_failure = Some(LastFailure::Response
              {   status: 404
                , body
              });
              Step::Continue
            }
          , Ok(UpstreamResult::OtherError { status, body }) => {
              warn!("Model {} failed with status {}", model, status);
              Step::ReturnError(
                crate::format_upstream_error(status, &body)
              )
            }
        }
    }

    /// Outcome once every candidate has been tried
    pub fn exhausted(self) -> ReplyOutcome
    {   debug!("Failover exhausted after {} attempts", self.attempts);
        match self.last_failure
        {   Some(failure) => ReplyOutcome::ErrorMessage(failure.describe())
          , None => ReplyOutcome::ErrorMessage(
              NO_REPLY_MESSAGE.to_string()
            )
        }
    }
}
