//! Inbound and outbound JSON bodies of the relay's HTTP surface

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::Error;

fn json_kind(value: &Value) -> &'static str
{   match value
    {   Value::Null => "null"
      , Value::Bool(_) => "boolean"
      , Value::Number(_) => "number"
      , Value::String(_) => "string"
      , Value::Array(_) => "array"
      , Value::Object(_) => "object"
    }
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptRequest
{   /// The user's chat message
    #[serde(default)]
    pub message: String
}

impl PromptRequest
{   /// Parse a chat body regardless of content type. `null`, or an
    /// object with `message` absent or null, is an empty request;
    /// undecodable JSON, other shapes and non-string messages are
    /// errors.
    pub fn from_slice(body: &[u8]) -> Result<Self, Error>
    {   let value: Value = serde_json::from_slice(body)?;
        match value
        {   Value::Null => Ok(PromptRequest::default())
          , Value::Object(mut fields) => match fields.remove("message")
            {   None | Some(Value::Null) => Ok(PromptRequest::default())
              , Some(Value::String(message)) => Ok(PromptRequest { message })
              , Some(other) => Err(Error::InvalidRequest(format!(
                  "'message' must be a string, got {}", json_kind(&other)
                )))
            }
          , other => Err(Error::InvalidRequest(format!(
              "body must be a JSON object, got {}", json_kind(&other)
            )))
        }
    }

    /// The message trimmed of surrounding whitespace
    pub fn prompt(&self) -> Result<&str, Error>
    {   let trimmed = self.message.trim();
        if trimmed.is_empty()
        {   return Err(Error::MissingMessage);
        }
        Ok(trimmed)
    }
}

/// Body of a successful `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply
{   pub reply: String
}

/// Body of every non-200 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply
{   pub error: String
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReply
{   pub ok: bool
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn trims_message()
    {   let req = PromptRequest::from_slice(br#"{"message":"  hi there \n"}"#)
          .unwrap();
        assert_eq!(req.prompt(), Ok("hi there"));
    }

    #[test]
    fn blank_or_missing_message_is_rejected()
    {   for body in [
          &br#"{"message":"   "}"#[..]
        , br#"{"message":""}"#
        , br#"{}"#
        , br#"{"message":null}"#
        , b"null"
        ]
        {   assert_eq!(
              PromptRequest::from_slice(body).unwrap().prompt(),
              Err(Error::MissingMessage)
            );
        }
    }

    #[test]
    fn undecodable_body_is_a_parse_error()
    {   for body in [&b"not json"[..], b""]
        {   assert!(matches!(
              PromptRequest::from_slice(body),
              Err(Error::ParseError(_))
            ));
        }
    }

    #[test]
    fn wrong_shapes_are_invalid()
    {   for body in [
          &br#"[1]"#[..]
        , br#""hello""#
        , br#"{"message":42}"#
        , br#"{"message":["hi"]}"#
        ]
        {   assert!(matches!(
              PromptRequest::from_slice(body),
              Err(Error::InvalidRequest(_))
            ));
        }
    }
}
