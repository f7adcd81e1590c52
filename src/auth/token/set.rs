//! Token payload returned by the token endpoint.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// One issued token pair, exactly as the token endpoint reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
	/// Bearer token sent with every authenticated call.
	pub access_token: TokenSecret,
	/// Token used to mint the next access token.
	pub refresh_token: TokenSecret,
	/// OneLogin account the token belongs to.
	#[serde(default)]
	pub account_id: Option<u64>,
	/// Token type reported by the server (`"bearer"`).
	#[serde(default)]
	pub token_type: Option<String>,
	/// Issue instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Lifetime in seconds, counted from `created_at`.
	pub expires_in: i64,
}
impl TokenSet {
	/// Instant after which the access token must be refreshed.
	///
	/// `None` when `created_at + expires_in` falls outside the representable range.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.created_at.checked_add(Duration::seconds(self.expires_in))
	}
}
