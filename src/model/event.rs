// self
use crate::_prelude::*;

/// Event type record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
	/// Event type identifier.
	#[serde(default)]
	pub id: Option<u64>,
	/// Machine name, e.g. `USER_LOGGED_INTO_ONELOGIN`.
	pub name: String,
	/// Human-readable description.
	#[serde(default)]
	pub description: Option<String>,
}

/// Event record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
	/// Event identifier.
	pub id: u64,
	/// Instant the event was recorded.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Account the event belongs to.
	#[serde(default)]
	pub account_id: Option<u64>,
	/// User the event is about.
	#[serde(default)]
	pub user_id: Option<u64>,
	/// Name of that user.
	#[serde(default)]
	pub user_name: Option<String>,
	/// Event type identifier.
	#[serde(default)]
	pub event_type_id: Option<u64>,
	/// Free-form notes.
	#[serde(default)]
	pub notes: Option<String>,
	/// Client IP address.
	#[serde(default)]
	pub ipaddr: Option<String>,
	/// User who performed the action.
	#[serde(default)]
	pub actor_user_id: Option<u64>,
	/// Name of that user.
	#[serde(default)]
	pub actor_user_name: Option<String>,
	/// System that performed the action.
	#[serde(default)]
	pub actor_system: Option<String>,
	/// User an administrator was acting as.
	#[serde(default)]
	pub assuming_acting_user_id: Option<u64>,
	/// Role involved.
	#[serde(default)]
	pub role_id: Option<u64>,
	/// Name of that role.
	#[serde(default)]
	pub role_name: Option<String>,
	/// App involved.
	#[serde(default)]
	pub app_id: Option<u64>,
	/// Name of that app.
	#[serde(default)]
	pub app_name: Option<String>,
	/// Group involved.
	#[serde(default)]
	pub group_id: Option<u64>,
	/// Name of that group.
	#[serde(default)]
	pub group_name: Option<String>,
	/// OTP device involved.
	#[serde(default)]
	pub otp_device_id: Option<u64>,
	/// Name of that device.
	#[serde(default)]
	pub otp_device_name: Option<String>,
	/// Policy involved.
	#[serde(default)]
	pub policy_id: Option<u64>,
	/// Name of that policy.
	#[serde(default)]
	pub policy_name: Option<String>,
	/// Custom message attached to the event.
	#[serde(default)]
	pub custom_message: Option<String>,
	/// Operation name.
	#[serde(default)]
	pub operation_name: Option<String>,
	/// Directory sync run that produced the event.
	#[serde(default)]
	pub directory_sync_run_id: Option<u64>,
	/// Directory involved.
	#[serde(default)]
	pub directory_id: Option<u64>,
	/// Resolution state.
	#[serde(default)]
	pub resolution: Option<String>,
	/// API client involved.
	#[serde(default)]
	pub client_id: Option<String>,
	/// Resource type identifier.
	#[serde(default)]
	pub resource_type_id: Option<u64>,
	/// Error text attached to failed actions.
	#[serde(default)]
	pub error_description: Option<String>,
}

/// Payload for creating an event; `None` fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParams {
	/// Event type identifier.
	pub event_type_id: u64,
	/// Account the event belongs to.
	pub account_id: u64,
	/// System that performed the action.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub actor_system: Option<String>,
	/// User who performed the action.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub actor_user_id: Option<u64>,
	/// Name of that user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub actor_user_name: Option<String>,
	/// App involved.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub app_id: Option<u64>,
	/// User an administrator was acting as.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub assuming_acting_user_id: Option<u64>,
	/// Custom message.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub custom_message: Option<String>,
	/// Directory sync run.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub directory_sync_run_id: Option<u64>,
	/// Group involved.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group_id: Option<u64>,
	/// Name of that group.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group_name: Option<String>,
	/// Client IP address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ipaddr: Option<String>,
	/// Free-form notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// OTP device involved.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub otp_device_id: Option<u64>,
	/// Name of that device.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub otp_device_name: Option<String>,
	/// Policy involved.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub policy_id: Option<u64>,
	/// Name of that policy.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub policy_name: Option<String>,
	/// Role involved.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role_id: Option<u64>,
	/// Name of that role.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role_name: Option<String>,
	/// User the event is about.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_id: Option<u64>,
	/// Name of that user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_name: Option<String>,
}
impl EventParams {
	/// Starts a payload for the given event type and account.
	pub fn new(event_type_id: u64, account_id: u64) -> Self {
		Self { event_type_id, account_id, ..Default::default() }
	}
}
