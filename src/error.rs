//! Client-level error types and the last-error projection exposed by the façade.

// self
use crate::{_prelude::*, config::SettingsError, endpoint::Endpoint};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Generic failure code recorded for anything that is not an HTTP 4xx rejection.
pub const GENERIC_FAILURE_CODE: u16 = 500;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token acquisition, refresh, or revocation failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Response body did not match the expected envelope shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// API rejected the request with a 4xx status.
	#[error("API rejected the request with HTTP {status}: {message}.")]
	Client {
		/// HTTP status code.
		status: u16,
		/// Message extracted from the response envelope.
		message: String,
	},
	/// API answered with a status outside the 2xx/4xx ranges.
	#[error("API returned an unexpected HTTP {status} response: {message}.")]
	Server {
		/// HTTP status code.
		status: u16,
		/// Message extracted from the response envelope.
		message: String,
	},
}
impl Error {
	/// Numeric code recorded in the last-error slot.
	///
	/// HTTP 4xx rejections keep their status; everything else collapses to
	/// [`GENERIC_FAILURE_CODE`].
	pub fn code(&self) -> u16 {
		match self {
			Self::Client { status, .. } | Self::Auth(AuthError::Rejected { status, .. }) => *status,
			_ => GENERIC_FAILURE_CODE,
		}
	}

	/// Human-readable description recorded in the last-error slot.
	pub fn description(&self) -> String {
		match self {
			Self::Client { message, .. } | Self::Auth(AuthError::Rejected { message, .. }) =>
				message.clone(),
			other => other.to_string(),
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] ::http::Error),
	/// Settings failed validation.
	#[error(transparent)]
	Settings(#[from] SettingsError),
	/// Settings document could not be parsed.
	#[error("Settings document is malformed.")]
	SettingsParse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
	/// Endpoint URL could not be built from the configured base.
	#[error("URL for the {endpoint:?} endpoint is invalid.")]
	InvalidEndpoint {
		/// Endpoint that failed to resolve.
		endpoint: Endpoint,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint requires a resource identifier that was not supplied.
	#[error("The {endpoint:?} endpoint requires a resource identifier.")]
	MissingPathParameter {
		/// Endpoint that failed to resolve.
		endpoint: Endpoint,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody {
		/// Serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token lifecycle failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// No access token is held, so nothing can be revoked.
	#[error("Access token not provided.")]
	MissingAccessToken,
	/// Refresh needs both the access and refresh token.
	#[error("Access token or refresh token not provided.")]
	MissingRefreshToken,
	/// Identity endpoint rejected the request.
	#[error("Token endpoint rejected the request with HTTP {status}: {message}.")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Message extracted from the response envelope.
		message: String,
	},
	/// Token endpoint answered without a `data` block.
	#[error("Token endpoint response did not contain a token.")]
	EmptyTokenResponse,
	/// Token lifetime does not yield a representable expiry instant.
	#[error("Token endpoint returned an unusable lifetime of {expires_in} seconds.")]
	InvalidLifetime {
		/// `expires_in` as reported by the server.
		expires_in: i64,
	},
}

/// Envelope decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body is not a JSON envelope.
	#[error("Response body is not a valid JSON envelope.")]
	Envelope {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
	/// A `data` record could not be hydrated into the target type.
	#[error("Response record could not be decoded into {target}.")]
	Record {
		/// Target type name.
		target: &'static str,
		/// Structured parsing failure naming the offending field.
		#[source]
		source: JsonPathError,
	},
	/// Session-token endpoint returned a status message with no known meaning.
	#[error("Status message type not recognized: {message}.")]
	UnrecognizedStatus {
		/// Raw `status.message` value.
		message: String,
	},
	/// Embedded apps feed is not well-formed XML.
	#[error("Embedded apps feed is not valid XML.")]
	Xml {
		/// XML deserialization failure.
		#[source]
		source: quick_xml::DeError,
	},
	/// Embedded apps feed carried a value of the wrong shape.
	#[error("Embedded apps feed has an invalid `{field}` value: {value}.")]
	InvalidField {
		/// Element name.
		field: &'static str,
		/// Raw element text.
		value: String,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the OneLogin API: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// The `(code, description)` pair recorded after a failed call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastError {
	/// HTTP status for 4xx rejections, `status.code` for failed writes, otherwise 500.
	pub code: u16,
	/// Message extracted from the response or the error chain.
	pub description: String,
}
impl LastError {
	/// Creates a new last-error pair.
	pub fn new(code: u16, description: impl Into<String>) -> Self {
		Self { code, description: description.into() }
	}
}
impl From<&Error> for LastError {
	fn from(e: &Error) -> Self {
		Self::new(e.code(), e.description())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn client_rejections_keep_their_status() {
		let err = Error::Client { status: 404, message: "Not found".into() };

		assert_eq!(LastError::from(&err), LastError::new(404, "Not found"));

		let err = Error::from(AuthError::Rejected { status: 401, message: "Unauthorized".into() });

		assert_eq!(err.code(), 401);
		assert_eq!(err.description(), "Unauthorized");
	}

	#[test]
	fn other_failures_collapse_to_generic_code() {
		let err = Error::from(AuthError::MissingRefreshToken);

		assert_eq!(err.code(), GENERIC_FAILURE_CODE);
		assert_eq!(err.description(), "Access token or refresh token not provided.");

		let err = Error::Server { status: 503, message: "Service Unavailable".into() };

		assert_eq!(err.code(), GENERIC_FAILURE_CODE);
		assert!(err.description().contains("503"));
	}
}
