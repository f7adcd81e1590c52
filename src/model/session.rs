// self
use crate::{_prelude::*, model::user::nullable_vec};

/// User summary embedded in login and MFA responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
	/// User identifier.
	pub id: u64,
	/// Login name.
	#[serde(default)]
	pub username: Option<String>,
	/// Primary email address.
	#[serde(default)]
	pub email: Option<String>,
	/// Given name.
	#[serde(default)]
	pub firstname: Option<String>,
	/// Family name.
	#[serde(default)]
	pub lastname: Option<String>,
}

/// MFA device the user can verify with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaDevice {
	/// Device identifier passed back when verifying.
	pub device_id: u64,
	/// Device kind, e.g. `Google Authenticator`.
	#[serde(default)]
	pub device_type: Option<String>,
}

/// Completed login: a session token ready to exchange for a browser session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokenInfo {
	/// Login status, e.g. `Authenticated`.
	#[serde(default)]
	pub status: Option<String>,
	/// Authenticated user.
	#[serde(default)]
	pub user: Option<SessionUser>,
	/// URL the user should land on after the session starts.
	#[serde(default)]
	pub return_to_url: Option<String>,
	/// Session token expiry.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub expires_at: Option<OffsetDateTime>,
	/// Session token.
	pub session_token: String,
}

/// Login that still needs a second factor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokenMfaInfo {
	/// User being authenticated.
	#[serde(default)]
	pub user: Option<SessionUser>,
	/// Token identifying this login attempt during verification.
	pub state_token: String,
	/// Verification endpoint.
	#[serde(default)]
	pub callback_url: Option<String>,
	/// Devices the user can verify with.
	#[serde(default, deserialize_with = "nullable_vec")]
	pub devices: Vec<MfaDevice>,
}

/// Outcome of a session login token request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionToken {
	/// Credentials accepted; a session token was issued.
	Authenticated(SessionTokenInfo),
	/// Credentials accepted; a second factor must be verified first.
	MfaRequired(SessionTokenMfaInfo),
}

/// Payload for creating a session login token; `None` fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLoginParams {
	/// Username or email address.
	pub username_or_email: String,
	/// Password.
	pub password: String,
	/// Account subdomain.
	pub subdomain: String,
	/// URL to land on after the session starts.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub return_to_url: Option<String>,
	/// Client IP address, for IP allow-list policies.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ip_address: Option<String>,
	/// Browser identifier, for trusted-browser policies.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub browser_id: Option<String>,
}
impl SessionLoginParams {
	/// Starts a payload with the required credentials.
	pub fn new(
		username_or_email: impl Into<String>,
		password: impl Into<String>,
		subdomain: impl Into<String>,
	) -> Self {
		Self {
			username_or_email: username_or_email.into(),
			password: password.into(),
			subdomain: subdomain.into(),
			..Default::default()
		}
	}
}
