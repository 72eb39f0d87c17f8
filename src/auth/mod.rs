/// OAuth protected-resource support
///
/// When authorization is configured, every POST to the MCP endpoint must
/// carry a bearer token whose audience is the server URL. Clients that fail
/// the check are pointed at the protected-resource metadata document.

pub mod gate;
pub mod token;

pub use gate::*;
pub use token::*;

use thiserror::Error;

/// Reasons a request fails the authorization check
///
/// All of them produce the same 401 response; the variant is only logged.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Authorization header is not a Bearer credential")]
    NotBearer,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Token has no string audience claim")]
    MissingAudience,

    #[error("Token audience '{actual}' does not match '{expected}'")]
    AudienceMismatch { expected: String, actual: String },
}
