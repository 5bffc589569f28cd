use serde::{Deserialize, Deserializer, Serialize};
use log::{debug, trace, error};
use std::time::Duration;
use crate::error::Error;
use crate::UpstreamResult;

// ===== Message Types =====

#[derive(Debug, Clone, Serialize)]
pub struct Part
{   pub text: String
}

#[derive(Debug, Clone, Serialize)]
pub struct Content
{   pub parts: Vec<Part>
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest
{   pub contents: Vec<Content>
}

impl GenerateContentRequest
{   /// A single content block holding the prompt text
    pub fn from_prompt(prompt: &str) -> Self
    {   GenerateContentRequest
        {   contents: vec![
              Content
              {   parts: vec![Part { text: prompt.to_string() }]
              }
            ]
        }
    }
}

/// Absent field -> `None`, explicit `null` -> `Some(None)`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where D: Deserializer<'de>
    , T: Deserialize<'de>
{   Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse
{   #[serde(default)]
    pub candidates: Option<Vec<Candidate>>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate
{   #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<CandidateContent>>
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent
{   #[serde(default, deserialize_with = "present")]
    pub parts: Option<Option<Vec<CandidatePart>>>
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart
{   #[serde(default, deserialize_with = "present")]
    pub text: Option<Option<String>>
}

impl GenerateContentResponse
{   /// Concatenated text of the first candidate, `Ok(None)` if there
    /// is no candidate at all. Missing content, parts or text count
    /// as empty; an explicit `null` in their place is malformed.
    pub fn first_candidate_text(&self) -> Result<Option<String>, Error>
    {   let candidate = match self.candidates.as_ref().and_then(|c| c.first())
        {   Some(candidate) => candidate
          , None => return Ok(None)
        };
        let content = match &candidate.content
        {   None => return Ok(Some(String::new()))
          , Some(None) => {
              return Err(Error::ParseError(
                "candidate content is null".to_string()
              ));
            }
          , Some(Some(content)) => content
        };
        let parts = match &content.parts
        {   None => return Ok(Some(String::new()))
          , Some(None) => {
              return Err(Error::ParseError(
                "candidate parts is null".to_string()
              ));
            }
          , Some(Some(parts)) => parts
        };

        let mut text = String::new();
        for part in parts
        {   match &part.text
            {   None => {}
              , Some(None) => {
                  return Err(Error::ParseError(
                    "candidate part text is null".to_string()
                  ));
                }
              , Some(Some(fragment)) => text.push_str(fragment)
            }
        }
        Ok(Some(text))
    }
}

/// Error bodies are kept as JSON; raw text is wrapped as
/// `{"error": text}`
pub fn error_body(raw: &str) -> serde_json::Value
{   serde_json::from_str(raw)
      .unwrap_or_else(|_| serde_json::json!({ "error": raw }))
}

// ===== Gemini Client =====

/// Client for the generateContent endpoint of one api version
pub struct GeminiClient
{   api_key: String
  , api_base: String
  , api_version: String
  , http_client: reqwest::Client
}

impl GeminiClient
{   pub fn new(
      api_key: String
    , config: &crate::config::RelayConfig
    ) -> Result<Self, Error>
    {   debug!(
          "Creating GeminiClient for {} ({})",
          config.api_base,
          config.api_version
        );
        let http_client = reqwest::Client::builder()
          .timeout(Duration::from_secs(config.timeout_secs))
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            Error::from(e)
          })?;

        Ok(GeminiClient
        {   api_key
          , api_base: config.api_base.trim_end_matches('/').to_string()
          , api_version: config.api_version.clone()
          , http_client
        })
    }

    pub fn endpoint_for_model(&self, model: &str) -> String
    {   format!(
          "{}/{}/models/{}:generateContent",
          self.api_base,
          self.api_version,
          model
        )
    }

    /// One POST for one model. `Err` is a transport failure or an
    /// unreadable 200 body; every HTTP response is an `Ok`.
    pub async fn generate_content(
      &self
    , model: &str
    , prompt: &str
    ) -> Result<UpstreamResult, Error>
    {   debug!("generateContent for model: {}", model);

        let request = GenerateContentRequest::from_prompt(prompt);
        trace!("Gemini request: {:?}", request);

        let response = self.http_client
          .post(self.endpoint_for_model(model))
          .query(&[("key", self.api_key.as_str())])
          .header("Content-Type", "application/json")
          .json(&request)
          .send()
          .await
          .map_err(|e| {
            let e = Error::from(e);
            error!("Transport error for {}: {}", model, e);
            e
          })?;

        let status = response.status().as_u16();
        trace!("Gemini response status: {}", status);

        let raw = response.text().await.map_err(|e| {
          let e = Error::from(e);
          error!("Failed to read body for {}: {}", model, e);
          e
        })?;

        match status
        {   200 => {
              let parsed: GenerateContentResponse
                = serde_json::from_str(&raw).map_err(|e| {
                  error!("Parse error for {}: {}", model, e);
                  Error::from(e)
                })?;
              let text = parsed.first_candidate_text().map_err(|e| {
                error!("Malformed candidate from {}: {}", model, e);
                e
              })?;
              match text
              {   Some(text) => Ok(UpstreamResult::Success(text))
                , None => {
                    debug!("No candidates from {}", model);
                    Ok(UpstreamResult::NoCandidates)
                  }
              }
            }
          , 404 => Ok(UpstreamResult::NotFound(error_body(&raw)))
          , _ => Ok(UpstreamResult::OtherError
            {   status
              , body: error_body(&raw)
            })
        }
    }
}
