//! Authentication configuration descriptor.

use serde::Deserialize;

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Whether authentication is enabled. Any protected access policy
    /// requires this to be true.
    #[serde(default)]
    pub enabled: bool,

    /// Authentication provider.
    #[serde(default)]
    pub provider: Option<AuthProvider>,
}

/// Supported authentication providers. Unknown spellings are preserved for
/// the validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AuthProvider {
    Jwt,
    Session,
    Oauth,
    Unknown(String),
}

impl From<String> for AuthProvider {
    fn from(s: String) -> Self {
        match s.as_str() {
            "jwt" => Self::Jwt,
            "session" => Self::Session,
            "oauth" => Self::Oauth,
            _ => Self::Unknown(s),
        }
    }
}

impl AuthProvider {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static [&'static str] = &["jwt", "session", "oauth"];

    /// True when the provider is in the closed enumeration.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}
