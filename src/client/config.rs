//! Validated client configuration and its builder.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::AccountIdentity, error::ConfigError};

/// Service address used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "https://xprinter.96101210.com";
/// Per-exchange transport timeout used when none is configured.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);
/// Smallest accepted transport timeout.
pub const MIN_TIMEOUT: StdDuration = StdDuration::from_secs(1);
/// Largest accepted transport timeout.
pub const MAX_TIMEOUT: StdDuration = StdDuration::from_secs(300);

/// Validated client configuration; build it with [`ClientConfig::builder`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Base address every endpoint path is appended to. Must be an `http(s)` base URL.
	pub server_url: Url,
	/// Account used to sign in lazily; required only by authorized operations.
	pub identity: Option<AccountIdentity>,
	/// Per-exchange deadline applied by the default transport (1 s ..= 300 s).
	pub timeout: StdDuration,
	/// Logs each request URL, serialized request, and raw response body when `true`.
	pub verbose: bool,
	/// Lets concurrent callers share one in-flight sign-in instead of each signing in.
	pub coalesce_sign_in: bool,
}
impl ClientConfig {
	/// Returns a builder seeded with the defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Appends `path` to the server address.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let base = self.server_url.as_str().trim_end_matches('/');

		Url::parse(&format!("{base}{path}"))
			.map_err(|source| ConfigError::InvalidServerUrl { source })
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	server_url: Option<Url>,
	identity: Option<AccountIdentity>,
	timeout: Option<StdDuration>,
	verbose: bool,
	coalesce_sign_in: bool,
}
impl ClientConfigBuilder {
	/// Overrides the service address (defaults to [`DEFAULT_SERVER_URL`]).
	pub fn server_url(mut self, url: Url) -> Self {
		self.server_url = Some(url);

		self
	}

	/// Sets the account used for sign-in.
	pub fn identity(mut self, identity: AccountIdentity) -> Self {
		self.identity = Some(identity);

		self
	}

	/// Validates and sets the account used for sign-in.
	pub fn credentials(
		self,
		login: impl Into<String>,
		secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(self.identity(AccountIdentity::new(login, secret)?))
	}

	/// Overrides the transport timeout (defaults to [`DEFAULT_TIMEOUT`]).
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Enables verbose exchange logging.
	pub fn verbose(mut self, verbose: bool) -> Self {
		self.verbose = verbose;

		self
	}

	/// Enables single-flight sign-in.
	pub fn coalesce_sign_in(mut self, coalesce: bool) -> Self {
		self.coalesce_sign_in = coalesce;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let server_url = match self.server_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_SERVER_URL)
				.map_err(|source| ConfigError::InvalidServerUrl { source })?,
		};

		validate_server_url(&server_url)?;

		let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

		validate_timeout(timeout)?;

		Ok(ClientConfig {
			server_url,
			identity: self.identity,
			timeout,
			verbose: self.verbose,
			coalesce_sign_in: self.coalesce_sign_in,
		})
	}
}

fn validate_server_url(url: &Url) -> Result<(), ConfigError> {
	if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() {
		Ok(())
	} else {
		Err(ConfigError::UnsupportedScheme { url: url.to_string() })
	}
}

fn validate_timeout(timeout: StdDuration) -> Result<(), ConfigError> {
	if (MIN_TIMEOUT..=MAX_TIMEOUT).contains(&timeout) {
		Ok(())
	} else {
		Err(ConfigError::TimeoutOutOfRange { value: timeout, min: MIN_TIMEOUT, max: MAX_TIMEOUT })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_are_applied() {
		let config = ClientConfig::builder().build().expect("Default config should build.");

		assert_eq!(config.server_url.as_str(), "https://xprinter.96101210.com/");
		assert_eq!(config.timeout, DEFAULT_TIMEOUT);
		assert!(config.identity.is_none());
		assert!(!config.verbose);
		assert!(!config.coalesce_sign_in);
	}

	#[test]
	fn rejects_non_http_urls() {
		let err = ClientConfig::builder()
			.server_url(Url::parse("ftp://printer.example.com").expect("Failed to parse URL."))
			.build()
			.expect_err("Non-http schemes should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));

		let err = ClientConfig::builder()
			.server_url(Url::parse("mailto:owner@example.com").expect("Failed to parse URL."))
			.build()
			.expect_err("Non-base URLs should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
	}

	#[test]
	fn rejects_timeouts_outside_range() {
		for timeout in [StdDuration::from_millis(500), StdDuration::from_secs(301)] {
			let err = ClientConfig::builder()
				.timeout(timeout)
				.build()
				.expect_err("Out-of-range timeouts should be rejected.");

			assert!(matches!(err, ConfigError::TimeoutOutOfRange { .. }));
		}
	}

	#[test]
	fn credentials_are_validated_eagerly() {
		let err = ClientConfig::builder()
			.credentials("", "secret")
			.expect_err("Empty logins should be rejected.");

		assert!(matches!(err, ConfigError::EmptyLogin));
	}

	#[test]
	fn endpoint_appends_path_to_base() {
		let config = ClientConfig::builder()
			.server_url(Url::parse("https://printer.example.com/gateway/").expect("Failed to parse URL."))
			.build()
			.expect("Config should build.");
		let url = config.endpoint("/v1/api/printer/list").expect("Endpoint should join.");

		assert_eq!(url.as_str(), "https://printer.example.com/gateway/v1/api/printer/list");
	}
}
