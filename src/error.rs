use std::fmt;

/// Custom error type for relay operations
/// Implements Clone so attempts can be kept as the last failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Transport-level HTTP failure (connect, send, read)
    HttpError(String)
  , /// Failed to parse an upstream response
    ParseError(String)
  , /// Upstream request exceeded its timeout
    Timeout
  , /// Invalid configuration value
    InvalidConfiguration(String)
  , /// Chat request without a usable message
    MissingMessage
  , /// Chat request body of the wrong shape
    InvalidRequest(String)
  , /// Local I/O failure (bind, accept)
    Io(String)
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::MissingMessage => {
              write!(f, "Missing 'message'")
            }
          , Error::InvalidRequest(msg) => {
              write!(f, "Invalid request: {}", msg)
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   return Error::Timeout;
        }
        // the URL carries the api key as a query parameter
        let e = e.without_url();
        if e.is_decode()
        {   Error::ParseError(e.to_string())
        } else
        {   Error::HttpError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::ParseError(e.to_string())
    }
}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
