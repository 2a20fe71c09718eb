// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{TransportRequest, TransportResponse},
	obs::OperationKind,
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation kind + stage.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("cloud_printer.operation", operation = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Placeholder logged instead of a withheld request body.
pub const REDACTED_BODY: &str = "<redacted>";

/// Dumps one exchange (URL, serialized request, raw response) for verbose clients.
///
/// With `redact_request_body` set, the request body is replaced by [`REDACTED_BODY`].
pub fn record_exchange(
	request: &TransportRequest,
	response: &TransportResponse,
	redact_request_body: bool,
) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(
			target: "cloud_printer::transport",
			method = request.method.as_str(),
			request_url = %request.url,
			request_body = %loggable_body(&request.body, redact_request_body),
			status = response.status,
			response_body = %String::from_utf8_lossy(&response.body),
			"Service exchange completed."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (request, response, redact_request_body);
	}
}

#[cfg(feature = "tracing")]
fn loggable_body(body: &[u8], redact: bool) -> std::borrow::Cow<'_, str> {
	if redact { REDACTED_BODY.into() } else { String::from_utf8_lossy(body) }
}

/// Notes a transient transport failure that is about to be retried (or exhausted).
pub fn record_transient_failure(request: &TransportRequest, attempt: u32, err: &TransportError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			target: "cloud_printer::transport",
			request_url = %request.url,
			attempt,
			error = %err,
			source = ?StdError::source(err).map(ToString::to_string),
			"Transient transport failure."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (request, attempt, err);
	}
}

/// Notes whether an authorized call reused the cached credential or signed in.
pub fn record_credential_resolution(reused: bool) {
	#[cfg(feature = "tracing")]
	{
		if reused {
			tracing::debug!(target: "cloud_printer::session", "Reusing cached credential.");
		} else {
			tracing::debug!(target: "cloud_printer::session", "Cached credential is stale or absent; signing in.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = reused;
	}
}
