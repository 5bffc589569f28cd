pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod failover;
pub mod resolver;
pub mod server;

/*

gemini-relay: a small async backend that relays one chat message
to the Gemini generateContent api and hands the reply text back,
falling over to other model names when the primary answers 404.

gemini-relay/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Shared reply types and fixed messages
│   ├── main.rs         # Binary: env, logging, serve
│   ├── error.rs        # Error type and conversions
│   ├── config.rs       # RelayConfig, read once from the environment
│   ├── providers/
│   │   ├── mod.rs
│   │   └── gemini.rs   # generateContent client + wire types
│   ├── request.rs      # Inbound/outbound JSON bodies
│   ├── failover.rs     # Candidate list + per-attempt state machine
│   ├── resolver.rs     # ReplyResolver: prompt in, text out
│   └── server.rs       # axum routes, CORS, static pages
└── tests/

*/

pub use config::RelayConfig;
pub use error::Error;
pub use resolver::ReplyResolver;

/// Reply when no api key is configured. No network call is made.
pub const UNCONFIGURED_MESSAGE: &str
  = "Gemini API key is not set. Please set GEMINI_API_KEY.";

/// Reply when the upstream produced nothing usable.
pub const NO_REPLY_MESSAGE: &str
  = "I couldn't generate a response right now. Please try again.";

/// Classified outcome of a single generateContent call that
/// reached the upstream and got an HTTP response back.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResult
{   /// HTTP 200 with at least one candidate; concatenated text
    /// of the first candidate's parts (may be empty)
    Success(String)
  , /// HTTP 200 without any candidate
    NoCandidates
  , /// HTTP 404: the model name is unknown upstream
    NotFound(serde_json::Value)
  , /// Any other status; body parsed as JSON or wrapped as
    /// `{"error": text}`
    OtherError
    {   status: u16
      , body: serde_json::Value
    }
}

/// What the resolver hands back. Both cases flatten to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome
{   Text(String)
  , ErrorMessage(String)
}

impl ReplyOutcome
{   pub fn is_error(&self) -> bool
    {   matches!(self, ReplyOutcome::ErrorMessage(_))
    }

    pub fn into_reply(self) -> String
    {   match self
        {   ReplyOutcome::Text(text) => text
          , ReplyOutcome::ErrorMessage(msg) => msg
        }
    }
}

/// Format an upstream error response the way it is shown to users
pub fn format_upstream_error(
  status: u16
, body: &serde_json::Value
) -> String
{   format!("Gemini error ({}): {}", status, body)
}
