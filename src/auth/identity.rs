//! Immutable account identity used to sign in on demand.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Login + secret pair the client signs in with whenever its cached credential is stale.
///
/// The identity is validated once at construction and never changes for the lifetime of the
/// client that owns it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountIdentity {
	login: String,
	secret: Secret,
}
impl AccountIdentity {
	/// Creates a new identity, rejecting empty logins or secrets.
	pub fn new(login: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
		let login = login.into();
		let secret = Secret::new(secret);

		if login.trim().is_empty() {
			return Err(ConfigError::EmptyLogin);
		}
		if secret.is_empty() {
			return Err(ConfigError::EmptySecret);
		}

		Ok(Self { login, secret })
	}

	/// Account login (the e-mail address registered with the service).
	pub fn login(&self) -> &str {
		&self.login
	}

	/// Account secret.
	pub fn secret(&self) -> &Secret {
		&self.secret
	}
}
impl Debug for AccountIdentity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccountIdentity")
			.field("login", &self.login)
			.field("secret", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identity_rejects_blank_fields() {
		assert!(matches!(AccountIdentity::new("  ", "secret"), Err(ConfigError::EmptyLogin)));
		assert!(matches!(
			AccountIdentity::new("owner@example.com", ""),
			Err(ConfigError::EmptySecret)
		));
	}

	#[test]
	fn identity_debug_redacts_secret() {
		let identity = AccountIdentity::new("owner@example.com", "hunter2")
			.expect("Identity fixture should be valid.");
		let rendered = format!("{identity:?}");

		assert!(rendered.contains("owner@example.com"));
		assert!(!rendered.contains("hunter2"));
	}
}
