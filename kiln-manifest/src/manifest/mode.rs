//! Generation mode descriptor.

use serde::Deserialize;

/// Generation mode: selects which artifact categories a run produces.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeConfig {
    /// Mode kind.
    #[serde(rename = "type", default)]
    pub kind: ModeKind,

    /// Category include-list. Only consulted under `headless`; categories
    /// without a known mapping stay included (fail-open).
    #[serde(default)]
    pub include: Option<Vec<String>>,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            kind: ModeKind::Full,
            include: None,
        }
    }
}

/// Mode kinds. Unknown spellings are preserved for the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ModeKind {
    #[default]
    Full,
    Headless,
    ApiOnly,
    Unknown(String),
}

impl From<String> for ModeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "full" => Self::Full,
            "headless" => Self::Headless,
            "api-only" => Self::ApiOnly,
            _ => Self::Unknown(s),
        }
    }
}

impl ModeKind {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static [&'static str] = &["full", "headless", "api-only"];

    /// True when the kind is in the closed enumeration.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}
