//! Cached bearer credential and the freshness rule that decides whether it can be reused.

// self
use crate::{_prelude::*, auth::Secret};

/// How long a credential is trusted after it was obtained.
pub const CREDENTIAL_FRESHNESS: Duration = Duration::hours(2);

/// Bearer token plus the instant it was obtained.
///
/// Credentials are replaced as a whole; stores never patch individual fields.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
	/// Bearer token; callers must avoid logging it.
	pub token: Secret,
	/// Instant the credential was obtained, persisted as Unix seconds.
	#[serde(with = "time::serde::timestamp")]
	pub issued_at: OffsetDateTime,
}
impl Credential {
	/// Builds a credential stamped with `issued_at`.
	pub fn new(token: impl Into<String>, issued_at: OffsetDateTime) -> Self {
		Self { token: Secret::new(token), issued_at }
	}

	/// Whole-second Unix timestamp of the issue instant.
	pub fn issued_at_unix(&self) -> i64 {
		self.issued_at.unix_timestamp()
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.finish()
	}
}

/// Decides whether a credential issued at `last_issued_unix` may be reused at `now`.
///
/// `last_issued_unix` is `0` when no credential is cached. The comparison is deliberately
/// one-sided: a credential is reusable only while the boundary `now - 2h` is non-zero and
/// strictly earlier than the issue time.
pub fn is_reusable(now: OffsetDateTime, last_issued_unix: i64) -> bool {
	let boundary = (now - CREDENTIAL_FRESHNESS).unix_timestamp();

	boundary != 0 && boundary < last_issued_unix
}
