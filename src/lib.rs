//! Async client for the cloud printer service—cached sign-in credentials, a retrying transport,
//! and typed envelope decoding for printer binding, listing, and printing.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod codec;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::{
		collections::VecDeque,
		task::{Context, Poll},
	};
	// self
	use crate::{
		auth::AccountIdentity,
		client::{Client, ClientConfig},
		error::TransportError,
		http::{PrinterTransport, TransportFuture, TransportRequest, TransportResponse},
		store::{CredentialStore, MemoryStore},
	};

	/// Login used by test identities.
	pub const TEST_LOGIN: &str = "printer-owner@example.com";
	/// Secret used by test identities.
	pub const TEST_SECRET: &str = "printer-owner-secret";

	/// Scripted outcome replayed by [`ScriptedTransport`].
	#[derive(Debug)]
	pub enum ScriptedReply {
		/// Respond with HTTP 200 and the given body.
		Body(String),
		/// Fail with a retryable transport error.
		Transient(&'static str),
		/// Fail with a non-retryable transport error.
		Fatal(&'static str),
	}

	/// In-process transport that replays scripted replies and records every request it sees.
	///
	/// Requests whose path ends with `/signin` are answered from a separate sign-in script so
	/// tests can count sign-ins independently of the operation under test.
	#[derive(Debug, Default)]
	pub struct ScriptedTransport {
		replies: Mutex<VecDeque<ScriptedReply>>,
		sign_in_replies: Mutex<VecDeque<ScriptedReply>>,
		requests: Mutex<Vec<TransportRequest>>,
		sign_in_requests: Mutex<Vec<TransportRequest>>,
	}
	impl ScriptedTransport {
		/// Queues a reply for non-sign-in requests.
		pub fn push(&self, reply: ScriptedReply) -> &Self {
			self.replies.lock().push_back(reply);

			self
		}

		/// Queues a reply for sign-in requests.
		pub fn push_sign_in(&self, reply: ScriptedReply) -> &Self {
			self.sign_in_replies.lock().push_back(reply);

			self
		}

		/// Queues a successful sign-in returning `token`.
		pub fn push_token(&self, token: &str) -> &Self {
			self.push_sign_in(ScriptedReply::Body(format!(
				"{{\"code\":0,\"msg\":\"ok\",\"data\":{{\"token_value\":\"{token}\",\"token_type\":\"Bearer\"}}}}"
			)))
		}

		/// Returns every non-sign-in request dispatched so far.
		pub fn requests(&self) -> Vec<TransportRequest> {
			self.requests.lock().clone()
		}

		/// Number of non-sign-in dispatch attempts.
		pub fn calls(&self) -> usize {
			self.requests.lock().len()
		}

		/// Returns every sign-in request dispatched so far.
		pub fn sign_in_requests(&self) -> Vec<TransportRequest> {
			self.sign_in_requests.lock().clone()
		}

		/// Number of sign-in dispatch attempts.
		pub fn sign_in_calls(&self) -> usize {
			self.sign_in_requests.lock().len()
		}
	}
	impl PrinterTransport for ScriptedTransport {
		fn send<'a>(&'a self, request: &'a TransportRequest) -> TransportFuture<'a> {
			Box::pin(async move {
				let reply = if request.url.path().ends_with("/signin") {
					self.sign_in_requests.lock().push(request.clone());

					self.sign_in_replies.lock().pop_front()
				} else {
					self.requests.lock().push(request.clone());

					self.replies.lock().pop_front()
				};

				YieldOnce::default().await;

				match reply {
					Some(ScriptedReply::Body(body)) =>
						Ok(TransportResponse { status: 200, body: body.into_bytes() }),
					Some(ScriptedReply::Transient(reason)) =>
						Err(TransportError::transient(ScriptedError(reason))),
					Some(ScriptedReply::Fatal(reason)) =>
						Err(TransportError::fatal(ScriptedError(reason))),
					None => Err(TransportError::fatal(ScriptedError("script exhausted"))),
				}
			})
		}
	}

	/// Suspends the current task exactly once so concurrent callers interleave.
	#[derive(Debug, Default)]
	struct YieldOnce {
		yielded: bool,
	}
	impl Future for YieldOnce {
		type Output = ();

		fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
			if self.yielded {
				return Poll::Ready(());
			}

			self.yielded = true;
			cx.waker().wake_by_ref();

			Poll::Pending
		}
	}

	/// Error type emitted by [`ScriptedTransport`].
	#[derive(Debug, ThisError)]
	#[error("Scripted transport failure: {0}.")]
	pub struct ScriptedError(pub &'static str);

	/// Builds the identity used across tests.
	pub fn test_identity() -> AccountIdentity {
		AccountIdentity::new(TEST_LOGIN, TEST_SECRET).expect("Test identity should be valid.")
	}

	/// Builds a client over a [`ScriptedTransport`] and an in-memory store.
	pub fn build_scripted_client(
		server_url: &str,
	) -> (Client<ScriptedTransport>, Arc<ScriptedTransport>, Arc<MemoryStore>) {
		let config = ClientConfig::builder()
			.server_url(Url::parse(server_url).expect("Test server URL should parse."))
			.identity(test_identity())
			.build()
			.expect("Test client config should build.");
		let transport = Arc::new(ScriptedTransport::default());
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let client: Client<ScriptedTransport> =
			Client::with_transport(config, transport.clone()).with_store(store);

		(client, transport, store_backend)
	}

	#[cfg(feature = "reqwest")]
	/// Builds a reqwest-backed client pointed at `server_url` with an in-memory store.
	pub fn build_reqwest_test_client(
		server_url: &str,
	) -> (crate::client::ReqwestClient, Arc<MemoryStore>) {
		let config = ClientConfig::builder()
			.server_url(Url::parse(server_url).expect("Mock server URL should parse."))
			.identity(test_identity())
			.verbose(true)
			.build()
			.expect("Test client config should build.");
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let client = Client::new(config)
			.expect("Reqwest-backed test client should build.")
			.with_store(store);

		(client, store_backend)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")] pub use reqwest::Error as ReqwestError;
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
