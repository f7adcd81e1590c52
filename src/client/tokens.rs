// self
use crate::{
	_prelude::*,
	auth::TokenSet,
	client::OneLoginClient,
	endpoint::Endpoint,
	http::HttpTransport,
	model::RateLimit,
};

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Requests a fresh token pair with the client credentials and stores it.
	pub async fn get_access_token(&self) -> Result<TokenSet> {
		self.observe("get_access_token", self.tokens.acquire()).await
	}

	/// Exchanges the stored refresh token for a new pair.
	pub async fn refresh_token(&self) -> Result<TokenSet> {
		self.observe("refresh_token", self.tokens.refresh()).await
	}

	/// Revokes the stored access token and clears the credential state on success.
	///
	/// `Ok` always carries `true`. A refused or failed revocation is an `Err` and is mirrored
	/// into [`last_error`](Self::last_error).
	pub async fn revoke_token(&self) -> Result<bool> {
		self.observe("revoke_token", self.tokens.revoke()).await
	}

	/// Current rate-limit window for the account.
	pub async fn get_rate_limit(&self) -> Result<Option<RateLimit>> {
		self.observe("get_rate_limit", self.fetch_first(Endpoint::RateLimit, None)).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::client::tests::{client, token_body};

	#[tokio::test]
	async fn rate_limit_accepts_a_single_object() {
		let (transport, client) = client();

		transport.push_json(200, token_body());
		transport.push_json(
			200,
			serde_json::json!({
				"status": { "type": "success", "code": 200 },
				"data": { "X-RateLimit-Limit": 5000, "X-RateLimit-Remaining": 4998, "X-RateLimit-Reset": 1200 }
			}),
		);

		let limit = client
			.get_rate_limit()
			.await
			.expect("Rate limit should load.")
			.expect("Rate limit should be present.");

		assert_eq!(limit.remaining, 4998);
		assert_eq!(transport.requests()[1].header("authorization"), Some("bearer:access"));
	}

	#[tokio::test]
	async fn token_calls_are_reported_through_the_client() {
		let (transport, client) = client();

		transport.push_json(200, token_body());

		let tokens = client.get_access_token().await.expect("Token should be issued.");

		assert_eq!(tokens.access_token.expose(), "access");
		assert!(client.token_manager().credentials().await.is_some());

		transport.push_json(200, serde_json::json!({ "status": { "type": "success", "code": 200 } }));

		assert!(client.revoke_token().await.expect("Revocation should succeed."));
		assert!(client.token_manager().credentials().await.is_none());
	}
}
