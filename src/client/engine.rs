//! Authenticated-request engine shared by every remote operation.
//!
//! [`Client::execute`] resolves a bearer token when the operation needs one, encodes the body,
//! dispatches it with a bounded retry on transient transport failures, and decodes the
//! response envelope into the caller's result type. Failures abort the call outright; only the
//! verbose exchange dump is best-effort.

// self
use crate::{
	_prelude::*,
	auth::Secret,
	client::Client,
	codec::{self, RequestBody},
	http::{Method, PrinterTransport, TransportRequest, TransportResponse},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
};

/// Total dispatch attempts per call, including the first one.
pub const MAX_ATTEMPTS: u32 = 3;

/// Per-call operation descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operation<'a> {
	/// Label used for spans and metrics.
	pub kind: OperationKind,
	/// HTTP method.
	pub method: Method,
	/// Path appended to the server address.
	pub path: &'a str,
	/// Whether a bearer credential must be attached.
	pub requires_authorization: bool,
	/// Whether the request body is withheld from the verbose exchange dump.
	pub redacts_request_body: bool,
}
impl<'a> Operation<'a> {
	/// Describes an unauthenticated `POST` to `path`.
	pub const fn post(kind: OperationKind, path: &'a str) -> Self {
		Self {
			kind,
			method: Method::Post,
			path,
			requires_authorization: false,
			redacts_request_body: false,
		}
	}

	/// Marks the operation as requiring a bearer credential.
	pub const fn authorized(mut self) -> Self {
		self.requires_authorization = true;

		self
	}

	/// Keeps the request body out of the verbose exchange dump.
	pub const fn redacted(mut self) -> Self {
		self.redacts_request_body = true;

		self
	}
}

impl<T> Client<T>
where
	T: ?Sized + PrinterTransport,
{
	/// Executes `operation` with `body` and decodes the envelope payload into `R`.
	///
	/// When the operation is authorized, a cached credential younger than two hours is reused;
	/// otherwise the client signs in first and the call fails with
	/// [`Error::Authentication`] if that sign-in fails.
	pub async fn execute<R>(&self, operation: &Operation<'_>, body: RequestBody) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let kind = operation.kind;
		let span = OperationSpan::new(kind, "execute");

		obs::record_operation_outcome(kind, OperationOutcome::Attempt);

		let result = span
			.instrument(async move {
				let started_at = OffsetDateTime::now_utc();
				let url = self.config.endpoint(operation.path)?;
				let bearer = if operation.requires_authorization {
					Some(self.resolve_token(started_at).await?)
				} else {
					None
				};

				self.exchange(operation, url, bearer, &body).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_operation_outcome(kind, OperationOutcome::Success),
			Err(_) => obs::record_operation_outcome(kind, OperationOutcome::Failure),
		}

		result
	}

	/// Encodes, dispatches, and decodes one request; never signs in.
	pub(crate) async fn exchange<R>(
		&self,
		operation: &Operation<'_>,
		url: Url,
		bearer: Option<Secret>,
		body: &RequestBody,
	) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let request = TransportRequest {
			method: operation.method,
			url,
			bearer,
			content_type: body.content_type(),
			body: body.encode()?,
		};
		let response = self.dispatch(&request).await?;

		if self.config.verbose {
			obs::record_exchange(&request, &response, operation.redacts_request_body);
		}

		codec::decode_envelope(&response.body)?.into_payload()
	}

	async fn dispatch(&self, request: &TransportRequest) -> Result<TransportResponse> {
		let mut last_transient = None;

		for attempt in 1..=MAX_ATTEMPTS {
			match self.transport.send(request).await {
				Ok(response) => return Ok(response),
				Err(err) if err.is_transient() => {
					obs::record_transient_failure(request, attempt, &err);

					last_transient = Some(err);
				},
				Err(err) => return Err(err.into()),
			}
		}

		Err(last_transient.map_or(Error::InvalidResponse, Error::from))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{ScriptedReply, build_scripted_client},
		codec::CodecError,
		error::TransportError,
	};

	const ECHO: Operation<'static> = Operation::post(OperationKind::Custom, "/v1/test/echo");

	#[derive(Debug, PartialEq, Deserialize)]
	struct Echo {
		value: String,
	}

	#[tokio::test]
	async fn unauthorized_call_sends_raw_body_without_bearer() {
		let (client, transport, _store) = build_scripted_client("https://printer.example.com");

		transport.push(ScriptedReply::Body(r#"{"code":0,"msg":"","data":{"value":"x"}}"#.into()));

		let echo: Echo = client
			.execute(&ECHO, RequestBody::from("raw payload"))
			.await
			.expect("Echo call should succeed.");
		let requests = transport.requests();

		assert_eq!(echo, Echo { value: "x".into() });
		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].body, b"raw payload");
		assert_eq!(requests[0].content_type, None);
		assert!(requests[0].bearer.is_none());
		assert_eq!(requests[0].url.as_str(), "https://printer.example.com/v1/test/echo");
		assert_eq!(transport.sign_in_calls(), 0);
	}

	#[tokio::test]
	async fn transient_failures_are_retried_until_success() {
		let (client, transport, _store) = build_scripted_client("https://printer.example.com");

		transport
			.push(ScriptedReply::Transient("connection reset"))
			.push(ScriptedReply::Transient("timed out"))
			.push(ScriptedReply::Body(r#"{"code":0,"msg":"","data":{"value":"third"}}"#.into()));

		let echo: Echo = client
			.execute(&ECHO, RequestBody::from("retry me"))
			.await
			.expect("Third attempt should succeed.");

		assert_eq!(echo.value, "third");
		assert_eq!(transport.calls(), 3);
		assert!(transport.requests().iter().all(|request| request.body == b"retry me"));
	}

	#[tokio::test]
	async fn exhausted_attempts_surface_last_transient_error() {
		let (client, transport, _store) = build_scripted_client("https://printer.example.com");

		transport
			.push(ScriptedReply::Transient("first"))
			.push(ScriptedReply::Transient("second"))
			.push(ScriptedReply::Transient("third"))
			.push(ScriptedReply::Body(r#"{"code":0,"msg":"","data":{"value":"late"}}"#.into()));

		let err = client
			.execute::<Echo>(&ECHO, RequestBody::from("doomed"))
			.await
			.expect_err("All attempts failing should fail the call.");

		assert_eq!(transport.calls(), 3);

		match err {
			Error::Transport(TransportError::Transient { source }) =>
				assert!(source.to_string().contains("third")),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[tokio::test]
	async fn fatal_failure_is_not_retried() {
		let (client, transport, _store) = build_scripted_client("https://printer.example.com");

		transport
			.push(ScriptedReply::Fatal("tls handshake rejected"))
			.push(ScriptedReply::Body(r#"{"code":0,"msg":"","data":{"value":"never"}}"#.into()));

		let err = client
			.execute::<Echo>(&ECHO, RequestBody::from("once"))
			.await
			.expect_err("Fatal transport errors should fail immediately.");

		assert!(matches!(err, Error::Transport(TransportError::Fatal { .. })));
		assert_eq!(transport.calls(), 1);
	}

	#[tokio::test]
	async fn service_error_is_not_retried() {
		let (client, transport, _store) = build_scripted_client("https://printer.example.com");

		transport.push(ScriptedReply::Body(r#"{"code":500,"msg":"busy","data":null}"#.into()));

		let err = client
			.execute::<Echo>(&ECHO, RequestBody::from("busy"))
			.await
			.expect_err("Non-zero codes should fail the call.");

		assert_eq!(err.service_message(), Some("busy"));
		assert_eq!(transport.calls(), 1);
	}

	#[tokio::test]
	async fn malformed_body_is_a_decode_error() {
		let (client, transport, _store) = build_scripted_client("https://printer.example.com");

		transport.push(ScriptedReply::Body("502 Bad Gateway".into()));

		let err = client
			.execute::<Echo>(&ECHO, RequestBody::from("decode"))
			.await
			.expect_err("Malformed bodies should fail the call.");

		assert!(matches!(err, Error::Codec(CodecError::Envelope { .. })));
		assert_eq!(transport.calls(), 1);
	}
}
