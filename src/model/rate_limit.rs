// self
use crate::_prelude::*;

/// Rate-limit status of the current access token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
	/// Requests allowed per window.
	#[serde(rename = "X-RateLimit-Limit")]
	pub limit: i64,
	/// Requests left in the current window.
	#[serde(rename = "X-RateLimit-Remaining")]
	pub remaining: i64,
	/// Seconds until the window resets.
	#[serde(rename = "X-RateLimit-Reset")]
	pub reset: i64,
}
