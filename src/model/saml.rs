// self
use crate::{
	_prelude::*,
	model::{MfaDevice, SessionUser, user::nullable_vec},
};

/// MFA challenge returned in place of a SAML assertion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mfa {
	/// Token identifying this attempt during verification.
	pub state_token: String,
	/// Devices the user can verify with.
	#[serde(default, deserialize_with = "nullable_vec")]
	pub devices: Vec<MfaDevice>,
	/// Verification endpoint.
	#[serde(default)]
	pub callback_url: Option<String>,
	/// User being authenticated.
	#[serde(default)]
	pub user: Option<SessionUser>,
}

/// What a SAML assertion endpoint produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SamlOutcome {
	/// Base64-encoded SAML response document.
	Assertion(String),
	/// A second factor must be verified first.
	MfaRequired(Mfa),
}

/// Decoded SAML assertion endpoint response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamlEndpointResponse {
	/// `status.type` as reported by the server.
	pub status_type: String,
	/// `status.message` as reported by the server.
	pub message: String,
	/// Assertion or MFA challenge.
	pub outcome: SamlOutcome,
}
impl SamlEndpointResponse {
	/// SAML document, when one was issued.
	pub fn saml_response(&self) -> Option<&str> {
		match &self.outcome {
			SamlOutcome::Assertion(document) => Some(document),
			SamlOutcome::MfaRequired(_) => None,
		}
	}

	/// MFA challenge, when one was issued.
	pub fn mfa(&self) -> Option<&Mfa> {
		match &self.outcome {
			SamlOutcome::MfaRequired(mfa) => Some(mfa),
			SamlOutcome::Assertion(_) => None,
		}
	}
}

/// Payload for generating a SAML assertion; `None` fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamlAssertionParams {
	/// Username or email address.
	pub username_or_email: String,
	/// Password.
	pub password: String,
	/// App the assertion is for.
	pub app_id: String,
	/// Account subdomain.
	pub subdomain: String,
	/// Client IP address, for IP allow-list policies.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ip_address: Option<String>,
}
impl SamlAssertionParams {
	/// Starts a payload with the required fields.
	pub fn new(
		username_or_email: impl Into<String>,
		password: impl Into<String>,
		app_id: impl Into<String>,
		subdomain: impl Into<String>,
	) -> Self {
		Self {
			username_or_email: username_or_email.into(),
			password: password.into(),
			app_id: app_id.into(),
			subdomain: subdomain.into(),
			ip_address: None,
		}
	}
}
