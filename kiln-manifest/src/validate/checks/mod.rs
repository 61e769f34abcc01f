//! Built-in validation checks.

mod auth;
mod database;
mod external;
mod mode;
mod naming;
mod structure;

pub use auth::AuthCoupling;
pub use database::DatabaseCoupling;
pub use external::ExternalSources;
pub use mode::ModeShape;
pub use naming::NamingShape;
pub use structure::Structure;

/// Artifact categories with a known mode mapping. Include-list entries
/// outside this set are warned about; the generators they would select stay
/// included (fail-open).
pub const KNOWN_CATEGORIES: &[&str] = &["schema", "validation", "api", "services", "client"];
