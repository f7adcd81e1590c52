// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, TokenSet},
	error::AuthError,
};

/// Credential state held by [`TokenManager`](crate::auth::TokenManager).
///
/// The three fields only ever exist together: the manager stores `Option<Credentials>`, so a
/// partially populated state cannot be expressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Current bearer token.
	pub access_token: TokenSecret,
	/// Refresh token paired with `access_token`.
	pub refresh_token: TokenSecret,
	/// Instant after which `access_token` is stale.
	pub expires_at: OffsetDateTime,
}
impl Credentials {
	/// Builds the state snapshot for a freshly issued token set.
	///
	/// Fails with [`AuthError::InvalidLifetime`] when the set's expiry is out of range.
	pub fn from_token_set(set: &TokenSet) -> Result<Self, AuthError> {
		let expires_at =
			set.expires_at().ok_or(AuthError::InvalidLifetime { expires_in: set.expires_in })?;

		Ok(Self {
			access_token: set.access_token.clone(),
			refresh_token: set.refresh_token.clone(),
			expires_at,
		})
	}

	/// Strict comparison: a token expiring exactly at `now` is still usable.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now > self.expires_at
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn expiry_boundary_is_exclusive() {
		let expires_at = datetime!(2024-01-01 00:00 UTC);
		let credentials = Credentials {
			access_token: TokenSecret::new("a"),
			refresh_token: TokenSecret::new("r"),
			expires_at,
		};

		assert!(!credentials.is_expired_at(expires_at - Duration::seconds(1)));
		assert!(!credentials.is_expired_at(expires_at));
		assert!(credentials.is_expired_at(expires_at + Duration::milliseconds(1)));
	}
}
