use crate::{ConfigError, ConfigErrorResult, DEFAULT_ADMIN_EMAIL};

use serde::Deserialize;

/// Seed account created at startup when the users table is empty. The
/// password is intended to be rotated through the admin surface afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub admin_email: String,
    pub admin_password: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_email: String::from(DEFAULT_ADMIN_EMAIL),
            admin_password: None,
        }
    }
}

impl BootstrapConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.admin_email.trim().is_empty() || !self.admin_email.contains('@') {
            return Err(ConfigError::bootstrap(format!(
                "bootstrap.admin_email must be an email address, got '{}'",
                self.admin_email
            )));
        }

        if let Some(ref password) = self.admin_password {
            if password.is_empty() {
                return Err(ConfigError::bootstrap(
                    "bootstrap.admin_password must not be empty when set",
                ));
            }
        }

        Ok(())
    }
}
