//! Database configuration descriptor.

use serde::Deserialize;

/// Database configuration. Mandatory iff the generation mode is `full`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database engine.
    #[serde(rename = "type")]
    pub kind: DatabaseKind,

    /// Database file path. Required for sqlite.
    #[serde(default)]
    pub file: Option<String>,

    /// Connection URL. Required for postgres and mysql.
    #[serde(default)]
    pub url: Option<String>,
}

/// Supported database engines. Unknown spellings are preserved for the
/// validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
    Mysql,
    Unknown(String),
}

impl From<String> for DatabaseKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "sqlite" => Self::Sqlite,
            "postgres" => Self::Postgres,
            "mysql" => Self::Mysql,
            _ => Self::Unknown(s),
        }
    }
}

impl DatabaseKind {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static [&'static str] = &["sqlite", "postgres", "mysql"];

    /// True when the kind is in the closed enumeration.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}
