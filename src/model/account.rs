//! Account endpoints: verification codes, registration, and sign-in.

// self
use crate::{_prelude::*, codec::Empty};

/// Requests a verification code for `email`; required before [`SignUpRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
	/// Address the code is sent to.
	pub email: String,
}

/// Verification code issued by the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
	/// Code to pass back in [`SignUpRequest::verify_code`].
	pub verify_code: String,
}

/// Registers a new account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
	/// Account e-mail address.
	pub email: String,
	/// Account password.
	pub password: String,
	/// Code obtained through the verify endpoint.
	pub verify_code: String,
}
impl Debug for SignUpRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignUpRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("verify_code", &self.verify_code)
			.finish()
	}
}

/// Registration carries no payload.
pub type SignUpResponse = Empty;

/// Exchanges account credentials for a bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
	/// Account e-mail address.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl Debug for SignInRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignInRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Token issued by a successful sign-in.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
	/// Bearer token value.
	pub token_value: String,
	/// Token scheme reported by the service (always sent as `Bearer`).
	#[serde(default)]
	pub token_type: String,
}
impl Debug for SignInResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignInResponse")
			.field("token_value", &"<redacted>")
			.field("token_type", &self.token_type)
			.finish()
	}
}
