//! Token lifecycle orchestration with a single critical section around credential state.
//!
//! [`TokenManager::ensure_valid`] holds the state lock for the whole acquire-or-refresh
//! decision, so concurrent callers sharing one client never race a refresh and never observe a
//! half-updated token pair. A failed acquire, refresh, or revoke leaves the previous state
//! untouched.

// self
use crate::{
	_prelude::*,
	auth::{Authorization, Credentials, TokenMetrics, TokenSecret, TokenSet},
	config::Settings,
	endpoint::{Endpoint, EndpointResolver},
	envelope::Envelope,
	error::AuthError,
	http::{self, ApiRequest, HttpTransport},
	obs,
};

#[derive(Serialize)]
#[serde(tag = "grant_type", rename_all = "snake_case")]
enum GrantRequest<'a> {
	ClientCredentials,
	RefreshToken { access_token: &'a str, refresh_token: &'a str },
}

#[derive(Serialize)]
struct RevokeRequest<'a> {
	access_token: &'a str,
}

/// Owns the OAuth 2.0 credential state for one client.
pub struct TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Arc<T>,
	resolver: Arc<dyn EndpointResolver>,
	client_id: String,
	client_secret: TokenSecret,
	user_agent: String,
	state: AsyncMutex<Option<Credentials>>,
	metrics: TokenMetrics,
}
impl<T> TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a manager with no credentials; the first [`ensure_valid`](Self::ensure_valid)
	/// call acquires a token.
	pub fn new(settings: &Settings, transport: Arc<T>, resolver: Arc<dyn EndpointResolver>) -> Self {
		Self {
			transport,
			resolver,
			client_id: settings.client_id.clone(),
			client_secret: settings.client_secret.clone(),
			user_agent: settings.user_agent.clone(),
			state: AsyncMutex::new(None),
			metrics: TokenMetrics::default(),
		}
	}

	/// Lifecycle counters for this manager.
	pub fn metrics(&self) -> &TokenMetrics {
		&self.metrics
	}

	/// `client_id:<id>, client_secret:<secret>` authorization for token endpoints.
	pub fn client_authorization(&self) -> Authorization {
		Authorization::Client {
			client_id: self.client_id.clone(),
			client_secret: self.client_secret.clone(),
		}
	}

	/// Snapshot of the current credential state.
	pub async fn credentials(&self) -> Option<Credentials> {
		self.state.lock().await.clone()
	}

	/// Replaces the credential state, e.g. to resume a previously issued token pair.
	pub async fn set_credentials(&self, credentials: Option<Credentials>) {
		*self.state.lock().await = credentials;
	}

	/// Returns a usable bearer token, acquiring or refreshing one when needed.
	pub async fn ensure_valid(&self) -> Result<TokenSecret> {
		self.ensure_valid_at(OffsetDateTime::now_utc()).await
	}

	/// [`ensure_valid`](Self::ensure_valid) evaluated against an explicit clock reading.
	///
	/// No credentials trigger a client-credentials acquisition; credentials with
	/// `now > expires_at` trigger a refresh; anything else is reused as-is.
	pub async fn ensure_valid_at(&self, now: OffsetDateTime) -> Result<TokenSecret> {
		let mut state = self.state.lock().await;
		let current = state.clone();
		let (_, credentials) = match current {
			None => self.request_acquire().await?,
			Some(credentials) if credentials.is_expired_at(now) =>
				self.request_refresh(&credentials).await?,
			Some(credentials) => return Ok(credentials.access_token),
		};
		let token = credentials.access_token.clone();

		*state = Some(credentials);

		Ok(token)
	}

	/// Mints a new token pair with the client-credentials grant and stores it.
	pub async fn acquire(&self) -> Result<TokenSet> {
		let mut state = self.state.lock().await;
		let (set, credentials) = self.request_acquire().await?;

		*state = Some(credentials);

		Ok(set)
	}

	/// Exchanges the stored token pair for a new one and stores it.
	///
	/// Fails with [`AuthError::MissingRefreshToken`] before any network call when no pair is
	/// held.
	pub async fn refresh(&self) -> Result<TokenSet> {
		let mut state = self.state.lock().await;
		let Some(current) = state.clone() else {
			self.metrics.record_failure();

			return Err(AuthError::MissingRefreshToken.into());
		};
		let (set, credentials) = self.request_refresh(&current).await?;

		*state = Some(credentials);

		Ok(set)
	}

	/// Revokes the stored access token and clears the state on HTTP 200.
	///
	/// Any other status fails and leaves the state as it was: 4xx and non-200 successes as
	/// [`AuthError::Rejected`], everything else as a server error.
	///
	/// A successful call always yields `Ok(true)`; every failure is an `Err`, so `Ok(false)` is
	/// never returned.
	pub async fn revoke(&self) -> Result<bool> {
		let mut state = self.state.lock().await;
		let Some(current) = state.clone() else {
			self.metrics.record_failure();

			return Err(AuthError::MissingAccessToken.into());
		};
		let result = self.request_revoke(&current).await;

		match result {
			Ok(()) => {
				*state = None;

				self.metrics.record_revocation();
				obs::token_event("revoke");

				Ok(true)
			},
			Err(e) => {
				self.metrics.record_failure();

				Err(e)
			},
		}
	}

	async fn request_acquire(&self) -> Result<(TokenSet, Credentials)> {
		let result =
			self.request_token(&GrantRequest::ClientCredentials, self.client_authorization()).await;

		match &result {
			Ok(_) => {
				self.metrics.record_acquisition();
				obs::token_event("acquire");
			},
			Err(_) => self.metrics.record_failure(),
		}

		result
	}

	async fn request_refresh(&self, current: &Credentials) -> Result<(TokenSet, Credentials)> {
		let grant = GrantRequest::RefreshToken {
			access_token: current.access_token.expose(),
			refresh_token: current.refresh_token.expose(),
		};
		let result = self.request_token(&grant, Authorization::None).await;

		match &result {
			Ok(_) => {
				self.metrics.record_refresh();
				obs::token_event("refresh");
			},
			Err(_) => self.metrics.record_failure(),
		}

		result
	}

	/// Runs one grant and validates the issued set into storable credentials.
	async fn request_token(
		&self,
		grant: &GrantRequest<'_>,
		authorization: Authorization,
	) -> Result<(TokenSet, Credentials)> {
		let url = self.resolver.resolve(Endpoint::TokenRequest, None)?;
		let request = ApiRequest::post(url)
			.user_agent(&self.user_agent)
			.authorization(&authorization)
			.json(grant)?;
		let response = http::execute(self.transport.as_ref(), request).await?;
		let response = http::classify(response).map_err(into_rejection)?;
		let envelope = Envelope::parse(response.body())?;

		let set = envelope.decode_token()?.ok_or(AuthError::EmptyTokenResponse)?;
		let credentials = Credentials::from_token_set(&set)?;

		Ok((set, credentials))
	}

	async fn request_revoke(&self, current: &Credentials) -> Result<()> {
		let url = self.resolver.resolve(Endpoint::TokenRevoke, None)?;
		let request = ApiRequest::post(url)
			.user_agent(&self.user_agent)
			.authorization(&self.client_authorization())
			.json(&RevokeRequest { access_token: current.access_token.expose() })?;
		let response = http::execute(self.transport.as_ref(), request).await?;
		let response = http::classify(response).map_err(into_rejection)?;

		if http::is_ok(&response) {
			return Ok(());
		}

		let status = response.status();

		Err(AuthError::Rejected {
			status: status.as_u16(),
			message: crate::envelope::error_message(response.body(), status),
		}
		.into())
	}
}
impl<T> Debug for TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("metrics", &self.metrics)
			.finish_non_exhaustive()
	}
}

fn into_rejection(e: Error) -> Error {
	match e {
		Error::Client { status, message } => AuthError::Rejected { status, message }.into(),
		other => other,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::{_preludet::ScriptedTransport, endpoint::RegionEndpointResolver};

	fn manager() -> (Arc<ScriptedTransport>, TokenManager<ScriptedTransport>) {
		let settings = Settings::builder("client-id", "client-secret")
			.user_agent("tests/1.0")
			.build()
			.expect("Fixture settings should validate.");
		let resolver = RegionEndpointResolver::from_settings(&settings)
			.expect("Fixture resolver should build.");
		let transport = Arc::new(ScriptedTransport::default());
		let manager = TokenManager::new(&settings, transport.clone(), Arc::new(resolver));

		(transport, manager)
	}

	fn token_body(access: &str, refresh: &str) -> Value {
		serde_json::json!({
			"status": { "error": false, "code": 200, "type": "success", "message": "Success" },
			"data": [{
				"access_token": access,
				"refresh_token": refresh,
				"account_id": 555555,
				"token_type": "bearer",
				"created_at": "2024-01-01T00:00:00Z",
				"expires_in": 36000
			}]
		})
	}

	fn seeded(expires_at: OffsetDateTime) -> Credentials {
		Credentials {
			access_token: TokenSecret::new("old-access"),
			refresh_token: TokenSecret::new("old-refresh"),
			expires_at,
		}
	}

	#[tokio::test]
	async fn first_call_acquires_with_client_credentials() {
		let (transport, manager) = manager();

		transport.push_json(200, token_body("fresh", "fresh-refresh"));

		let token = manager.ensure_valid().await.expect("Acquisition should succeed.");
		let requests = transport.requests();

		assert_eq!(token.expose(), "fresh");
		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].url, "https://api.us.onelogin.com/auth/oauth2/token");
		assert_eq!(
			requests[0].header("authorization"),
			Some("client_id:client-id, client_secret:client-secret")
		);
		assert_eq!(requests[0].header("user-agent"), Some("tests/1.0"));
		assert_eq!(requests[0].json(), serde_json::json!({ "grant_type": "client_credentials" }));
		assert_eq!(
			manager.credentials().await.map(|c| c.expires_at),
			Some(datetime!(2024-01-01 10:00 UTC))
		);
		assert_eq!(manager.metrics().acquisitions(), 1);
	}

	#[tokio::test]
	async fn token_expiring_now_is_reused() {
		let (transport, manager) = manager();
		let now = datetime!(2024-06-01 12:00 UTC);

		manager.set_credentials(Some(seeded(now))).await;

		let token = manager.ensure_valid_at(now).await.expect("Unexpired token should be reused.");

		assert_eq!(token.expose(), "old-access");
		assert_eq!(transport.request_count(), 0);
	}

	#[tokio::test]
	async fn expired_token_is_refreshed_without_client_auth() {
		let (transport, manager) = manager();
		let now = datetime!(2024-06-01 12:00 UTC);

		manager.set_credentials(Some(seeded(now - Duration::seconds(1)))).await;
		transport.push_json(200, token_body("new-access", "new-refresh"));

		let token = manager.ensure_valid_at(now).await.expect("Refresh should succeed.");
		let requests = transport.requests();
		let request = &requests[0];

		assert_eq!(token.expose(), "new-access");
		assert_eq!(request.header("authorization"), None);
		assert_eq!(
			request.json(),
			serde_json::json!({
				"grant_type": "refresh_token",
				"access_token": "old-access",
				"refresh_token": "old-refresh"
			})
		);
		assert_eq!(manager.metrics().refreshes(), 1);
	}

	#[tokio::test]
	async fn failed_refresh_leaves_state_untouched() {
		let (transport, manager) = manager();
		let before = seeded(datetime!(2020-01-01 00:00 UTC));

		manager.set_credentials(Some(before.clone())).await;
		transport.push_json(
			401,
			serde_json::json!({ "status": { "error": true, "code": 401, "type": "Unauthorized", "message": "Authentication Failure" } }),
		);

		let err = manager.refresh().await.expect_err("Rejected refresh must fail.");

		assert!(matches!(
			&err,
			Error::Auth(AuthError::Rejected { status: 401, message }) if message == "Authentication Failure"
		));
		assert_eq!(err.code(), 401);
		assert_eq!(manager.credentials().await, Some(before));
		assert_eq!(manager.metrics().failures(), 1);
	}

	#[tokio::test]
	async fn token_response_without_data_is_a_failure() {
		let (transport, manager) = manager();

		transport.push_json(200, serde_json::json!({ "status": { "type": "success" } }));

		let err = manager.acquire().await.expect_err("Missing data must fail.");

		assert!(matches!(err, Error::Auth(AuthError::EmptyTokenResponse)));
		assert_eq!(manager.credentials().await, None);
	}

	#[tokio::test]
	async fn unrepresentable_lifetime_fails_without_storing() {
		let (transport, manager) = manager();
		let mut body = token_body("fresh", "fresh-refresh");

		body["data"][0]["expires_in"] = serde_json::json!(9_000_000_000_000_000_000_i64);
		transport.push_json(200, body);

		let err = manager.ensure_valid().await.expect_err("Out-of-range lifetime must fail.");

		assert!(matches!(
			err,
			Error::Auth(AuthError::InvalidLifetime { expires_in: 9_000_000_000_000_000_000 })
		));
		assert_eq!(manager.credentials().await, None);
		assert_eq!(manager.metrics().acquisitions(), 0);
		assert_eq!(manager.metrics().failures(), 1);
	}

	#[tokio::test]
	async fn refresh_and_revoke_need_credentials() {
		let (transport, manager) = manager();

		assert!(matches!(
			manager.refresh().await,
			Err(Error::Auth(AuthError::MissingRefreshToken))
		));
		assert!(matches!(manager.revoke().await, Err(Error::Auth(AuthError::MissingAccessToken))));
		assert_eq!(transport.request_count(), 0);
	}

	#[tokio::test]
	async fn revoke_clears_state_only_on_ok() {
		let (transport, manager) = manager();
		let credentials = seeded(datetime!(2030-01-01 00:00 UTC));

		manager.set_credentials(Some(credentials.clone())).await;
		transport.push_json(400, serde_json::json!({ "status": { "type": "bad request", "message": "Invalid token" } }));

		assert!(manager.revoke().await.is_err());
		assert_eq!(manager.credentials().await, Some(credentials));

		transport.push_json(200, serde_json::json!({ "status": { "type": "success" } }));

		assert!(manager.revoke().await.expect("Revocation should succeed."));
		assert_eq!(manager.credentials().await, None);

		let requests = transport.requests();
		let request = &requests[1];

		assert_eq!(request.url, "https://api.us.onelogin.com/auth/oauth2/revoke");
		assert_eq!(request.json(), serde_json::json!({ "access_token": "old-access" }));
		assert_eq!(manager.metrics().revocations(), 1);
	}
}
