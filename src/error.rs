//! Client-level error types shared across the engine, transport, codec, and stores.

// std
use std::io::ErrorKind;
// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential persistence failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request body could not be encoded or the response body could not be decoded.
	#[error(transparent)]
	Codec(#[from] crate::codec::CodecError),

	/// Every dispatch attempt finished without yielding a response.
	#[error("Service returned an invalid response.")]
	InvalidResponse,
	/// The service decoded the request but answered with a non-zero status code.
	#[error("Service rejected the request with code {code}: {message}")]
	Service {
		/// Status code carried by the response envelope.
		code: i64,
		/// Server-provided message; the only trustworthy diagnostic on failure.
		message: String,
	},
	/// Signing in to obtain a fresh credential failed.
	#[error("Sign-in failed: {0}")]
	Authentication(#[source] Box<Error>),
}
impl Error {
	/// Returns `true` when the error came from a retryable transport failure.
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::Transport(err) if err.is_transient())
	}

	/// Returns the server message when the error is a [`Error::Service`] rejection.
	pub fn service_message(&self) -> Option<&str> {
		match self {
			Self::Service { message, .. } => Some(message),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Server URL cannot be parsed or joined with an endpoint path.
	#[error("Server URL is invalid.")]
	InvalidServerUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Server URL must be an absolute `http` or `https` base URL.
	#[error("Server URL must be an http(s) base URL: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Account login is empty.
	#[error("Account login cannot be empty.")]
	EmptyLogin,
	/// Account secret is empty.
	#[error("Account secret cannot be empty.")]
	EmptySecret,
	/// Authorized operations need an account identity to sign in with.
	#[error("No account identity is configured for authorized operations.")]
	MissingIdentity,
	/// Transport timeout is outside the accepted range.
	#[error("Timeout must be between {min:?} and {max:?}, got {value:?}.")]
	TimeoutOutOfRange {
		/// Rejected timeout.
		value: std::time::Duration,
		/// Smallest accepted timeout.
		min: std::time::Duration,
		/// Largest accepted timeout.
		max: std::time::Duration,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO), classified by retry eligibility.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Network failure that is safe to retry (timeouts, refused or reset connections).
	#[error("Transient network error occurred while calling the service.")]
	Transient {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Network failure that must not be retried.
	#[error("Network error occurred while calling the service.")]
	Fatal {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a retryable transport-specific error.
	pub fn transient(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transient { source: Box::new(src) }
	}

	/// Wraps a non-retryable transport-specific error.
	pub fn fatal(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Fatal { source: Box::new(src) }
	}

	/// Returns `true` if the request may be dispatched again.
	pub fn is_transient(&self) -> bool {
		match self {
			Self::Transient { .. } => true,
			Self::Fatal { .. } => false,
			Self::Io(err) => matches!(
				err.kind(),
				ErrorKind::TimedOut
					| ErrorKind::ConnectionRefused
					| ErrorKind::ConnectionReset
					| ErrorKind::ConnectionAborted
					| ErrorKind::BrokenPipe
					| ErrorKind::Interrupted
			),
		}
	}
}
