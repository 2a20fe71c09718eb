//! Service client, its configuration, and the authenticated-request engine.

pub mod config;
pub mod session;

mod engine;
mod operations;

pub use config::*;
pub use engine::*;
pub use operations::*;
pub use session::SessionMetrics;

// self
use crate::{
	_prelude::*,
	http::PrinterTransport,
	store::{CredentialStore, MemoryStore},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestClient = Client<ReqwestTransport>;

/// Issues signed requests against a single cloud printer account.
///
/// The client owns the transport, the credential store, and the immutable configuration
/// (server address, account identity, verbosity). Clones share all of them, so a clone can be
/// handed to every task that needs to talk to the service; the credential store is the only
/// state the clones mutate.
pub struct Client<T>
where
	T: ?Sized + PrinterTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Store holding the cached credential.
	pub store: Arc<dyn CredentialStore>,
	/// Counters for credential reuse and sign-in outcomes.
	pub session_metrics: Arc<SessionMetrics>,
	config: Arc<ClientConfig>,
	sign_in_guard: Arc<AsyncMutex<()>>,
}
impl<T> Client<T>
where
	T: ?Sized + PrinterTransport,
{
	/// Creates a client that reuses the caller-provided transport and an in-memory store.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<T>>) -> Self {
		Self {
			transport: transport.into(),
			store: Arc::new(MemoryStore::default()),
			session_metrics: Default::default(),
			config: Arc::new(config),
			sign_in_guard: Default::default(),
		}
	}

	/// Replaces the credential store.
	pub fn with_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
		self.store = store;

		self
	}

	/// Returns the validated configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Drops the cached credential; the next authorized call signs in unconditionally.
	///
	/// Call this after learning that access was revoked or the account identity changed.
	pub fn invalidate_credential(&self) -> Result<()> {
		self.store.invalidate()?;

		Ok(())
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client backed by a reqwest transport honoring [`ClientConfig::timeout`].
	pub fn new(config: ClientConfig) -> Result<Self> {
		let transport = ReqwestTransport::with_timeout(config.timeout)?;

		Ok(Self::with_transport(config, transport))
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + PrinterTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: Arc::clone(&self.transport),
			store: Arc::clone(&self.store),
			session_metrics: Arc::clone(&self.session_metrics),
			config: Arc::clone(&self.config),
			sign_in_guard: Arc::clone(&self.sign_in_guard),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + PrinterTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("credential_cached", &self.store.load().is_some())
			.finish()
	}
}
