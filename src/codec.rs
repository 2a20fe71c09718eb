//! Request body encoding and the uniform `{code, msg, data}` response envelope.
//!
//! Every service response is wrapped in the same envelope. Decoding happens in two steps so a
//! rejected call never has its payload interpreted: [`decode_envelope`] validates the wrapper,
//! then [`Envelope::into_payload`] checks the status code and only afterwards decodes `data`
//! into the caller's result type.

// crates.io
use serde::de::IgnoredAny;
use serde_json::Value;
// self
use crate::_prelude::*;

/// Status code the service uses to signal success.
pub const SUCCESS_CODE: i64 = 0;
/// Media type of structured request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Encoding and decoding failures.
#[derive(Debug, ThisError)]
pub enum CodecError {
	/// Structured request value could not be serialized.
	#[error("Request body could not be serialized.")]
	Encode(#[source] serde_json::Error),
	/// Response body is not a valid envelope.
	#[error("Response body is not a valid envelope.")]
	Envelope {
		/// Structured parsing failure including the offending JSON path.
		#[source]
		source: JsonPathError,
	},
	/// Response body continues past the envelope.
	#[error("Response body has trailing data after the envelope.")]
	Trailing(#[source] serde_json::Error),
	/// Envelope payload does not match the expected result shape.
	#[error("Response payload does not match the expected shape at `{path}`.")]
	Payload {
		/// JSON path of the first mismatch.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
}

/// Outbound request value.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
	/// Raw text sent verbatim.
	Text(String),
	/// Raw bytes sent verbatim.
	Bytes(Vec<u8>),
	/// Structured value serialized as JSON.
	Structured(Value),
}
impl RequestBody {
	/// Captures a serializable value as a structured body.
	pub fn structured<T>(value: &T) -> Result<Self, CodecError>
	where
		T: ?Sized + Serialize,
	{
		serde_json::to_value(value).map(Self::Structured).map_err(CodecError::Encode)
	}

	/// Media type announced for the body; raw bodies carry none.
	pub fn content_type(&self) -> Option<&'static str> {
		match self {
			Self::Structured(_) => Some(JSON_CONTENT_TYPE),
			Self::Text(_) | Self::Bytes(_) => None,
		}
	}

	/// Produces the bytes placed on the wire.
	///
	/// Raw bodies pass through untouched; structured bodies serialize as compact JSON.
	pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
		match self {
			Self::Text(text) => Ok(text.as_bytes().to_vec()),
			Self::Bytes(bytes) => Ok(bytes.clone()),
			Self::Structured(value) => serde_json::to_vec(value).map_err(CodecError::Encode),
		}
	}
}
impl From<String> for RequestBody {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<&str> for RequestBody {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<Vec<u8>> for RequestBody {
	fn from(value: Vec<u8>) -> Self {
		Self::Bytes(value)
	}
}
impl From<&[u8]> for RequestBody {
	fn from(value: &[u8]) -> Self {
		Self::Bytes(value.to_vec())
	}
}

/// Decoded response wrapper; `data` stays undecoded until the status code is known.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope {
	/// `0` on success, anything else is a service-side rejection.
	pub code: i64,
	/// Human-readable message, authoritative when `code` is non-zero; `null` reads as empty.
	#[serde(default, deserialize_with = "null_as_default")]
	pub msg: String,
	/// Operation-specific payload; `null` when absent.
	#[serde(default)]
	pub data: Value,
}
impl Envelope {
	/// Returns `true` when the service reported success.
	pub fn is_success(&self) -> bool {
		self.code == SUCCESS_CODE
	}

	/// Maps the envelope into the caller's result type.
	///
	/// A non-zero code becomes [`Error::Service`] without touching `data`; otherwise `data` is
	/// decoded into `T`, and a shape mismatch becomes [`CodecError::Payload`].
	pub fn into_payload<T>(self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		if !self.is_success() {
			return Err(Error::Service { code: self.code, message: self.msg });
		}

		serde_path_to_error::deserialize(self.data).map_err(|source| {
			let path = source.path().to_string();

			CodecError::Payload { path, source }.into()
		})
	}
}

/// Parses the three-field envelope out of a raw response body.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope, CodecError> {
	let mut de = serde_json::Deserializer::from_slice(bytes);
	let envelope = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| CodecError::Envelope { source })?;

	de.end().map_err(CodecError::Trailing)?;

	Ok(envelope)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result shape for operations whose payload carries nothing of interest.
///
/// Accepts `null`, an empty object, or any other payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}
impl<'de> Deserialize<'de> for Empty {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		IgnoredAny::deserialize(deserializer)?;

		Ok(Self {})
	}
}
