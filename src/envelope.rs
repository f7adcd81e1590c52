//! Decoder for the `{ status, data, pagination }` wrapper every OneLogin response uses.
//!
//! Each response kind has its own decode function returning a typed result. Missing or
//! malformed `status`/`data` blocks collapse to "no result" (`None`, `false`, empty) instead of
//! an error, because the API omits them freely. The only hard failure is a session-token
//! response whose status message has no known meaning.

// std
use std::slice;
// crates.io
use ::http::StatusCode;
// self
use crate::{
	_prelude::*,
	auth::TokenSet,
	error::DecodeError,
	model::{Mfa, SamlEndpointResponse, SamlOutcome, SessionToken},
};

/// Status message announcing a completed authentication.
pub const SUCCESS_MESSAGE: &str = "Success";
/// Status message announcing that a second factor is required.
pub const MFA_REQUIRED_MESSAGE: &str = "MFA is required for this user";
/// `status.type` value of a successful write.
pub const SUCCESS_TYPE: &str = "success";

/// `status` block of an envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
	/// `status.type` (`"success"`, `"error"`, ...).
	pub kind: Option<String>,
	/// `status.message`; non-string messages are kept as their JSON text.
	pub message: Option<String>,
	/// `status.code`, when it fits an HTTP-style code.
	pub code: Option<u16>,
}
impl Status {
	fn from_value(value: &Value) -> Option<Self> {
		let object = value.as_object()?;
		let kind = object.get("type").and_then(Value::as_str).map(str::to_owned);
		let message = match object.get("message") {
			None | Some(Value::Null) => None,
			Some(Value::String(message)) => Some(message.clone()),
			Some(other) => Some(other.to_string()),
		};
		let code = object.get("code").and_then(Value::as_u64).and_then(|c| u16::try_from(c).ok());

		Some(Self { kind, message, code })
	}
}

/// `pagination` block of an envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
	/// Cursor for the previous page.
	pub before_cursor: Option<String>,
	/// Cursor for the next page.
	pub after_cursor: Option<String>,
	/// Link to the previous page, when the API provides one.
	pub previous_link: Option<String>,
	/// Link to the next page, when the API provides one.
	pub next_link: Option<String>,
}
impl Pagination {
	fn from_value(value: &Value) -> Option<Self> {
		let object = value.as_object()?;
		let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_owned);

		Some(Self {
			before_cursor: text("before_cursor"),
			after_cursor: text("after_cursor"),
			previous_link: text("previous_link"),
			next_link: text("next_link"),
		})
	}
}

/// One decoded response body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Envelope {
	/// `status` block, if present and an object.
	pub status: Option<Status>,
	/// Raw `data` payload; JSON `null` is treated as absent.
	pub data: Option<Value>,
	/// `pagination` block, if present and an object.
	pub pagination: Option<Pagination>,
}
impl Envelope {
	/// Parses a response body.
	///
	/// Fails only when the body is not a JSON object; every inner block is optional.
	pub fn parse(body: &[u8]) -> Result<Self, DecodeError> {
		let mut de = serde_json::Deserializer::from_slice(body);
		let object: Map<String, Value> = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| DecodeError::Envelope { source })?;

		Ok(Self::from_object(object))
	}

	fn from_object(mut object: Map<String, Value>) -> Self {
		let status = object.get("status").and_then(Status::from_value);
		let pagination = object.get("pagination").and_then(Pagination::from_value);
		let data = object.remove("data").filter(|data| !data.is_null());

		Self { status, data, pagination }
	}

	/// `status.message`, if any.
	pub fn status_message(&self) -> Option<&str> {
		self.status.as_ref()?.message.as_deref()
	}

	/// `status.type`, if any.
	pub fn status_type(&self) -> Option<&str> {
		self.status.as_ref()?.kind.as_deref()
	}

	/// Records carried in `data`.
	///
	/// An array yields its elements; a single object or scalar yields itself; no data yields
	/// an empty slice.
	pub fn records(&self) -> &[Value] {
		match &self.data {
			Some(Value::Array(items)) => items,
			Some(value) => slice::from_ref(value),
			None => &[],
		}
	}

	/// First record in `data`, if any.
	pub fn first_record(&self) -> Option<&Value> {
		self.records().first()
	}

	/// Hydrates every record into `T`.
	pub fn decode_records<T>(&self) -> Result<Vec<T>, DecodeError>
	where
		T: DeserializeOwned,
	{
		self.records().iter().map(hydrate::<T>).collect()
	}

	/// Hydrates the first record into `T`; `None` when `data` is absent or empty.
	pub fn decode_first<T>(&self) -> Result<Option<T>, DecodeError>
	where
		T: DeserializeOwned,
	{
		self.first_record().map(hydrate::<T>).transpose()
	}

	/// Write-operation outcome: `true` only when `status.type == "success"`.
	pub fn operation_succeeded(&self) -> bool {
		self.status_type() == Some(SUCCESS_TYPE)
	}

	/// Forward cursor; empty strings count as absent.
	pub fn after_cursor(&self) -> Option<&str> {
		self.pagination.as_ref()?.after_cursor.as_deref().filter(|cursor| !cursor.is_empty())
	}

	/// Backward cursor; empty strings count as absent.
	pub fn before_cursor(&self) -> Option<&str> {
		self.pagination.as_ref()?.before_cursor.as_deref().filter(|cursor| !cursor.is_empty())
	}

	/// Token response: the first `data` record as a [`TokenSet`], or `None` without data.
	pub fn decode_token(&self) -> Result<Option<TokenSet>, DecodeError> {
		self.decode_first()
	}

	/// Session-token response.
	///
	/// Needs both `status.message` and a first `data` record, otherwise `None`. The message
	/// selects the variant; an unknown message is [`DecodeError::UnrecognizedStatus`].
	pub fn decode_session_token(&self) -> Result<Option<SessionToken>, DecodeError> {
		let (Some(message), Some(record)) = (self.status_message(), self.first_record()) else {
			return Ok(None);
		};

		match message {
			SUCCESS_MESSAGE => Ok(Some(SessionToken::Authenticated(hydrate(record)?))),
			MFA_REQUIRED_MESSAGE => Ok(Some(SessionToken::MfaRequired(hydrate(record)?))),
			other => Err(DecodeError::UnrecognizedStatus { message: other.to_owned() }),
		}
	}

	/// SAML-endpoint response.
	///
	/// Needs `status.message`, `status.type`, and `data`, otherwise `None`. `"Success"` carries
	/// the SAML document in `data`; any other message carries an MFA challenge in `data[0]`.
	pub fn decode_saml_endpoint(&self) -> Result<Option<SamlEndpointResponse>, DecodeError> {
		let (Some(kind), Some(message), Some(data)) =
			(self.status_type(), self.status_message(), self.data.as_ref())
		else {
			return Ok(None);
		};
		let outcome = if message == SUCCESS_MESSAGE {
			let document = match data {
				Value::String(document) => document.clone(),
				Value::Array(items) => match items.first() {
					Some(Value::String(document)) => document.clone(),
					_ => data.to_string(),
				},
				other => other.to_string(),
			};

			SamlOutcome::Assertion(document)
		} else {
			let Some(record) = self.first_record() else {
				return Ok(None);
			};

			SamlOutcome::MfaRequired(hydrate::<Mfa>(record)?)
		};

		Ok(Some(SamlEndpointResponse {
			status_type: kind.to_owned(),
			message: message.to_owned(),
			outcome,
		}))
	}
}

/// Hydrates one raw record, naming the failing field path on error.
pub fn hydrate<T>(record: &Value) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(record)
		.map_err(|source| DecodeError::Record { target: std::any::type_name::<T>(), source })
}

/// Message recorded for a failed response.
///
/// Prefers `status.message`, then `status.type`, then the canonical reason phrase of the HTTP
/// status.
pub fn error_message(body: &[u8], status: StatusCode) -> String {
	let status_block = Envelope::parse(body).ok().and_then(|envelope| envelope.status);

	status_block
		.and_then(|block| block.message.or(block.kind))
		.or_else(|| status.canonical_reason().map(str::to_owned))
		.unwrap_or_default()
}
