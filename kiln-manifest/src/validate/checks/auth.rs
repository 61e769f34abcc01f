//! Auth coupling checks.

use crate::{
    Check, ErrorCode, ManifestDescriptor, ValidationError, ValidationReport,
    manifest::{AuthProvider, ProtectedPolicy},
};

/// Checks the auth block and every entity's access policy against it. A
/// protecting policy without enabled auth is an error, never silently
/// ignored.
pub struct AuthCoupling;

impl Check for AuthCoupling {
    fn name(&self) -> &'static str {
        "auth-coupling"
    }

    fn run(&self, manifest: &ManifestDescriptor, report: &mut ValidationReport) {
        if let Some(auth) = &manifest.auth
            && let Some(AuthProvider::Unknown(provider)) = &auth.provider
        {
            report.error(ValidationError::new(
                ErrorCode::InvalidProvider,
                "auth.provider",
                format!(
                    "unknown auth provider '{provider}'; valid providers are: {}",
                    AuthProvider::VALID.join(", ")
                ),
            ));
        }

        for entity in &manifest.entities {
            let Some(policy) = &entity.protected else {
                continue;
            };
            let path = format!("entities.{}.protected", entity.name);

            if let ProtectedPolicy::Unknown(value) = policy {
                report.error(ValidationError::new(
                    ErrorCode::InvalidProtectedValue,
                    path,
                    format!(
                        "unknown protected value '{value}'; valid values are: {}",
                        ProtectedPolicy::VALID.join(", ")
                    ),
                ));
            } else if policy.requires_auth() && !manifest.auth_enabled() {
                report.error(
                    ValidationError::new(
                        ErrorCode::AuthRequiredForProtected,
                        path,
                        format!(
                            "entity '{}' is protected but auth is not enabled",
                            entity.name
                        ),
                    )
                    .with_suggestion("set auth.enabled = true"),
                );
            }
        }
    }
}
