// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for credential resolution.
#[derive(Debug, Default)]
pub struct SessionMetrics {
	reuses: AtomicU64,
	sign_ins: AtomicU64,
	failures: AtomicU64,
}
impl SessionMetrics {
	/// Returns how many authorized calls reused the cached credential.
	pub fn reuses(&self) -> u64 {
		self.reuses.load(Ordering::Relaxed)
	}

	/// Returns how many sign-ins completed and stored a credential.
	pub fn sign_ins(&self) -> u64 {
		self.sign_ins.load(Ordering::Relaxed)
	}

	/// Returns how many sign-ins failed.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	pub(crate) fn record_reuse(&self) {
		self.reuses.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_sign_in(&self) {
		self.sign_ins.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}
}
