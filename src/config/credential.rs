// Shared credential module
// Reads the page password once at startup and compares submissions against it

use std::fmt;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use super::types::{AuthConfig, MissingCredentialPolicy};
use super::ConfigError;

/// Password used when `auth.on_missing = "default"` and the variable is unset
pub const DEFAULT_PASSWORD: &str = "changeme";

/// The shared page password. Immutable once loaded and never printed.
#[derive(Clone)]
pub struct Credential(Arc<str>);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::from(secret.into()))
    }

    /// Compare a submitted password in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where the active credential came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    DocumentedDefault,
}

/// Read the credential from the environment variable named in `auth`
pub fn load_credential(auth: &AuthConfig) -> Result<(Credential, CredentialSource), ConfigError> {
    let value = std::env::var(&auth.password_env).ok();
    resolve_credential(value, auth)
}

/// Apply the missing-credential policy to an optional raw value
///
/// An empty string counts as missing.
pub fn resolve_credential(
    value: Option<String>,
    auth: &AuthConfig,
) -> Result<(Credential, CredentialSource), ConfigError> {
    match value.filter(|v| !v.is_empty()) {
        Some(secret) => Ok((Credential::new(secret), CredentialSource::Environment)),
        None => match auth.on_missing {
            MissingCredentialPolicy::Refuse => {
                Err(ConfigError::MissingCredential(auth.password_env.clone()))
            }
            MissingCredentialPolicy::Default => Ok((
                Credential::new(DEFAULT_PASSWORD),
                CredentialSource::DocumentedDefault,
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(on_missing: MissingCredentialPolicy) -> AuthConfig {
        AuthConfig {
            password_env: "PAGE_PASSWORD".to_string(),
            on_missing,
        }
    }

    #[test]
    fn test_matches_exact_only() {
        let credential = Credential::new("hunter2");
        assert!(credential.matches("hunter2"));
        assert!(!credential.matches("hunter"));
        assert!(!credential.matches("hunter22"));
        assert!(!credential.matches("HUNTER2"));
        assert!(!credential.matches(""));
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("hunter2");
        let printed = format!("{credential:?}");
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_present_value_wins() {
        let (credential, source) =
            resolve_credential(Some("s3cret".to_string()), &auth(MissingCredentialPolicy::Refuse))
                .unwrap();
        assert!(credential.matches("s3cret"));
        assert_eq!(source, CredentialSource::Environment);
    }

    #[test]
    fn test_missing_refuses() {
        let result = resolve_credential(None, &auth(MissingCredentialPolicy::Refuse));
        assert!(matches!(result, Err(ConfigError::MissingCredential(name)) if name == "PAGE_PASSWORD"));

        let result = resolve_credential(Some(String::new()), &auth(MissingCredentialPolicy::Refuse));
        assert!(matches!(result, Err(ConfigError::MissingCredential(_))));
    }

    #[test]
    fn test_missing_uses_default() {
        let (credential, source) =
            resolve_credential(None, &auth(MissingCredentialPolicy::Default)).unwrap();
        assert!(credential.matches(DEFAULT_PASSWORD));
        assert_eq!(source, CredentialSource::DocumentedDefault);
    }
}
