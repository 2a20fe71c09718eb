//! Transport primitives for service exchanges.
//!
//! The module exposes [`PrinterTransport`] alongside [`TransportRequest`] and
//! [`TransportResponse`] so downstream crates can plug in custom HTTP stacks. Implementations
//! perform exactly one exchange per [`PrinterTransport::send`] call and classify failures via
//! [`TransportError::transient`] or [`TransportError::fatal`]; the client owns the retry loop.

// self
use crate::{_prelude::*, auth::Secret, error::TransportError};

/// Boxed future returned by [`PrinterTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing one service exchange.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by every
/// clone of a client and by concurrent calls. Any per-request deadline belongs to the
/// transport; the client threads no cancellation of its own.
pub trait PrinterTransport
where
	Self: 'static + Send + Sync,
{
	/// Dispatches `request` once and reads the full response body.
	///
	/// Errors worth retrying (timeouts, refused or reset connections) must be reported as
	/// [`TransportError::Transient`]; anything else as [`TransportError::Fatal`].
	fn send<'a>(&'a self, request: &'a TransportRequest) -> TransportFuture<'a>;
}

/// HTTP methods used by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
}
impl Method {
	/// Returns the canonical method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully prepared request; reused verbatim across retry attempts.
#[derive(Clone, Debug)]
pub struct TransportRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// Bearer token sent as `Authorization: Bearer <token>`, when the call is authorized.
	pub bearer: Option<Secret>,
	/// `Content-Type` header value; omitted when `None`.
	pub content_type: Option<&'static str>,
	/// Encoded request body.
	pub body: Vec<u8>,
}
impl TransportRequest {
	/// Renders the `Authorization` header value, if a bearer token is attached.
	pub fn authorization(&self) -> Option<String> {
		self.bearer.as_ref().map(|token| format!("Bearer {}", token.expose()))
	}
}

/// Status and full body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Complete response body.
	pub body: Vec<u8>,
}

/// Thin wrapper around [`reqwest::Client`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub reqwest::Client);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest client.
	pub fn with_client(client: reqwest::Client) -> Self {
		Self(client)
	}

	/// Builds a reqwest client that enforces `timeout` on every exchange.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<reqwest::Client> for ReqwestTransport {
	fn as_ref(&self) -> &reqwest::Client {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl PrinterTransport for ReqwestTransport {
	fn send<'a>(&'a self, request: &'a TransportRequest) -> TransportFuture<'a> {
		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
			};
			let mut builder = self.0.request(method, request.url.clone()).body(request.body.clone());

			if let Some(content_type) = request.content_type {
				builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
			}
			if let Some(value) = request.authorization() {
				builder = builder.header(reqwest::header::AUTHORIZATION, value);
			}

			let response = builder.send().await.map_err(map_reqwest_error)?;
			let status = response.status().as_u16();
			// A failure while draining the body is never retried.
			let body = response.bytes().await.map_err(TransportError::fatal)?.to_vec();

			Ok(TransportResponse { status, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> TransportError {
	if err.is_builder() || err.is_redirect() {
		return TransportError::fatal(err);
	}
	if err.is_timeout() || err.is_connect() || err.is_request() {
		return TransportError::transient(err);
	}

	TransportError::fatal(err)
}
