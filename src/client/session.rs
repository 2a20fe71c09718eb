//! Credential resolution for authorized calls.
//!
//! Before every authorized call the client decides whether its cached credential can be
//! reused. A credential is trusted for two hours after the call that obtained it started;
//! past that boundary, or when nothing is cached, the client signs in synchronously with its
//! account identity and stores the new token stamped with the current call's start instant.
//! There is no background refresh: staleness is only noticed by the next authorized call.
//!
//! Concurrent callers that all observe a stale credential each sign in and overwrite one
//! another's result unless [`ClientConfig::coalesce_sign_in`] is set, in which case they queue
//! on a per-client guard and re-check the store once they acquire it.
//!
//! [`ClientConfig::coalesce_sign_in`]: crate::client::ClientConfig::coalesce_sign_in

mod metrics;

pub use metrics::SessionMetrics;

// self
use crate::{
	_prelude::*,
	auth::{Credential, Secret, credential},
	client::{Client, operations},
	codec::RequestBody,
	error::ConfigError,
	http::PrinterTransport,
	model::{SignInRequest, SignInResponse},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
};

impl<T> Client<T>
where
	T: ?Sized + PrinterTransport,
{
	/// Returns a bearer token for a call that started at `started_at`, signing in if needed.
	pub(crate) async fn resolve_token(&self, started_at: OffsetDateTime) -> Result<Secret> {
		if let Some(token) = self.cached_token(started_at) {
			return Ok(token);
		}
		if self.config.coalesce_sign_in {
			let _singleflight = self.sign_in_guard.lock().await;

			// Another caller may have stored a credential while this one waited.
			if let Some(token) = self.cached_token(OffsetDateTime::now_utc()) {
				return Ok(token);
			}

			return self.authenticate(started_at).await;
		}

		self.authenticate(started_at).await
	}

	fn cached_token(&self, now: OffsetDateTime) -> Option<Secret> {
		let last_issued = self.store.load().map_or(0, |cached| cached.issued_at_unix());

		if !credential::is_reusable(now, last_issued) {
			obs::record_credential_resolution(false);

			return None;
		}

		// Re-read: an invalidation may have landed after the freshness check.
		let token = self.store.load().map(|cached| cached.token)?;

		obs::record_credential_resolution(true);
		self.session_metrics.record_reuse();

		Some(token)
	}

	/// Signs in with the configured identity and stores the credential on success.
	async fn authenticate(&self, started_at: OffsetDateTime) -> Result<Secret> {
		const KIND: OperationKind = OperationKind::SignIn;

		let identity = self.config.identity.as_ref().ok_or(ConfigError::MissingIdentity)?;
		let span = OperationSpan::new(KIND, "authenticate");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.endpoint(operations::SIGN_IN.path)?;
				let body = RequestBody::structured(&SignInRequest {
					email: identity.login().to_owned(),
					password: identity.secret().expose().to_owned(),
				})?;
				let response: SignInResponse =
					self.exchange(&operations::SIGN_IN, url, None, &body).await?;

				Ok(response.token_value)
			})
			.await;
		let token_value = match result {
			Ok(token_value) => token_value,
			Err(err) => {
				obs::record_operation_outcome(KIND, OperationOutcome::Failure);
				self.session_metrics.record_failure();

				return Err(Error::Authentication(Box::new(err)));
			},
		};
		let credential = Credential::new(token_value, started_at);
		let token = credential.token.clone();

		self.store.store(credential)?;
		self.session_metrics.record_sign_in();
		obs::record_operation_outcome(KIND, OperationOutcome::Success);

		Ok(token)
	}
}
