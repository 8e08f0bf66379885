//! Secure credential handling for judge clients.
//!
//! API keys are wrapped so they cannot appear in `Debug` output or logs,
//! and are zeroed on drop. Exposure is explicit via [`ApiCredential::expose`].

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use super::ClientError;

/// A securely-stored API credential.
pub struct ApiCredential {
    value: SecretString,
    /// Human-readable name for error messages, e.g. "Anthropic API key".
    name: &'static str,
}

impl ApiCredential {
    /// Wrap a credential value. After this point it cannot be accidentally
    /// logged or printed.
    pub fn new(value: impl Into<String>, name: &'static str) -> Self {
        Self {
            value: SecretString::from(value.into()),
            name,
        }
    }

    /// Load a credential from an environment variable.
    pub fn from_env(env_var: &str, name: &'static str) -> Result<Self, ClientError> {
        std::env::var(env_var)
            .map(|v| Self::new(v, name))
            .map_err(|_| {
                ClientError::NotConfigured(format!(
                    "{} not set: configure '{}' environment variable",
                    name, env_var
                ))
            })
    }

    /// Expose the credential value. Call only at the point of use.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_value() {
        let cred = ApiCredential::new("sk-super-secret-12345", "test key");
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("sk-super-secret-12345"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn expose_returns_the_value() {
        let cred = ApiCredential::new("sk-super-secret-12345", "test key");
        assert_eq!(cred.expose(), "sk-super-secret-12345");
        assert!(!cred.is_empty());
    }

    #[test]
    fn missing_env_var_is_not_configured() {
        let result = ApiCredential::from_env("VOUCH_TEST_MISSING_KEY", "test key");
        assert!(matches!(result, Err(ClientError::NotConfigured(_))));
    }
}
