//! Thread-safe in-memory [`CredentialStore`], the default for new clients.

// self
use crate::{
	_prelude::*,
	auth::Credential,
	store::{CredentialStore, StoreError},
};

/// Keeps the credential in-process behind a single lock.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<Option<Credential>>>);
impl MemoryStore {
	/// Creates a store pre-seeded with `credential`.
	pub fn with_credential(credential: Credential) -> Self {
		Self(Arc::new(RwLock::new(Some(credential))))
	}
}
impl CredentialStore for MemoryStore {
	fn load(&self) -> Option<Credential> {
		self.0.read().clone()
	}

	fn store(&self, credential: Credential) -> Result<(), StoreError> {
		*self.0.write() = Some(credential);

		Ok(())
	}

	fn invalidate(&self) -> Result<(), StoreError> {
		*self.0.write() = None;

		Ok(())
	}
}
