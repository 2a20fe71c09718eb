//! Credential store contract and built-in store implementations.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::Credential};

/// Holder of the client's single cached credential.
///
/// All three operations must be atomic with respect to each other. Callers always replace the
/// whole credential, so no compare-and-swap primitive is needed.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Returns the cached credential, if any.
	fn load(&self) -> Option<Credential>;

	/// Replaces the cached credential.
	fn store(&self, credential: Credential) -> Result<(), StoreError>;

	/// Clears the cached credential so the next authorized call signs in again.
	fn invalidate(&self) -> Result<(), StoreError>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
