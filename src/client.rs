//! [`OneLoginClient`] façade: one async method per API operation.
//!
//! Every operation clears the last-error slot, makes sure a bearer token is available (token,
//! revocation, and embedded-app calls excepted), sends the request, and decodes the envelope.
//! Failures come back as `Err` and are mirrored into the last-error slot as a
//! `(code, description)` pair. Write operations the server declines (`status.type` other than
//! `"success"`) return `Ok(false)` and record the server's status in the same slot.

mod embed;
mod events;
mod groups;
mod invites;
mod roles;
mod saml;
mod sessions;
mod tokens;
mod users;

// crates.io
use ::http::Method;
// self
use crate::{
	_prelude::*,
	auth::{Authorization, TokenManager},
	config::Settings,
	endpoint::{Endpoint, EndpointResolver, RegionEndpointResolver},
	envelope::Envelope,
	error::{GENERIC_FAILURE_CODE, LastError},
	http::{self, ApiRequest, HttpResponse, HttpTransport},
	obs::{self, OperationSpan, Outcome},
	pagination::{CursorPaginator, PageRequest},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestOneLoginClient = OneLoginClient<ReqwestTransport>;

/// Typed client for the OneLogin API.
pub struct OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Arc<T>,
	resolver: Arc<dyn EndpointResolver>,
	tokens: TokenManager<T>,
	paginator: CursorPaginator,
	user_agent: String,
	last_error: Mutex<Option<LastError>>,
}
impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client over the provided transport, resolving URLs from `settings`.
	pub fn with_transport(settings: Settings, transport: impl Into<Arc<T>>) -> Result<Self> {
		let resolver = RegionEndpointResolver::from_settings(&settings)?;

		Ok(Self::with_parts(settings, transport, Arc::new(resolver)))
	}

	/// Creates a client from explicit collaborators.
	pub fn with_parts(
		settings: Settings,
		transport: impl Into<Arc<T>>,
		resolver: Arc<dyn EndpointResolver>,
	) -> Self {
		let transport = transport.into();
		let tokens = TokenManager::new(&settings, transport.clone(), resolver.clone());

		Self {
			transport,
			resolver,
			tokens,
			paginator: CursorPaginator::new(settings.max_pages),
			user_agent: settings.user_agent,
			last_error: Mutex::new(None),
		}
	}

	/// Token manager holding this client's credential state.
	pub fn token_manager(&self) -> &TokenManager<T> {
		&self.tokens
	}

	/// `(code, description)` recorded by the most recent operation, if it failed.
	pub fn last_error(&self) -> Option<LastError> {
		self.last_error.lock().clone()
	}

	/// Code half of [`last_error`](Self::last_error).
	pub fn error(&self) -> Option<u16> {
		self.last_error.lock().as_ref().map(|e| e.code)
	}

	/// Description half of [`last_error`](Self::last_error).
	pub fn error_description(&self) -> Option<String> {
		self.last_error.lock().as_ref().map(|e| e.description.clone())
	}

	/// Clears the last-error slot.
	pub fn clean_error(&self) {
		*self.last_error.lock() = None;
	}

	fn record_error(&self, error: LastError) {
		*self.last_error.lock() = Some(error);
	}

	/// Runs one operation: clears the error slot, instruments the future, and records the
	/// outcome.
	async fn observe<R, Fut>(&self, operation: &'static str, fut: Fut) -> Result<R>
	where
		Fut: Future<Output = Result<R>>,
	{
		self.clean_error();
		obs::record_operation_outcome(operation, Outcome::Attempt);

		let result = OperationSpan::new(operation).instrument(fut).await;

		match &result {
			Ok(_) if self.last_error.lock().is_none() =>
				obs::record_operation_outcome(operation, Outcome::Success),
			Ok(_) => obs::record_operation_outcome(operation, Outcome::Failure),
			Err(e) => {
				self.record_error(LastError::from(e));
				obs::record_operation_outcome(operation, Outcome::Failure);
			},
		}

		result
	}

	async fn bearer(&self) -> Result<Authorization> {
		Ok(Authorization::Bearer(self.tokens.ensure_valid().await?))
	}

	fn request(
		&self,
		method: Method,
		endpoint: Endpoint,
		id: Option<&str>,
		authorization: &Authorization,
	) -> Result<ApiRequest> {
		let url = self.resolver.resolve(endpoint, id)?;

		Ok(ApiRequest::new(method, url).user_agent(&self.user_agent).authorization(authorization))
	}

	/// Builds a bearer-authorized request, acquiring or refreshing the token first.
	async fn authorized(
		&self,
		method: Method,
		endpoint: Endpoint,
		id: Option<&str>,
	) -> Result<ApiRequest> {
		let authorization = self.bearer().await?;

		self.request(method, endpoint, id, &authorization)
	}

	/// Sends a request and returns the raw response, classified by status.
	async fn send_raw(&self, request: ApiRequest) -> Result<HttpResponse> {
		http::classify(http::execute(self.transport.as_ref(), request).await?)
	}

	async fn send(&self, request: ApiRequest) -> Result<Envelope> {
		let response = self.send_raw(request).await?;

		Ok(Envelope::parse(response.body())?)
	}

	/// GET returning the first `data` record.
	async fn fetch_first<R>(&self, endpoint: Endpoint, id: Option<&str>) -> Result<Option<R>>
	where
		R: DeserializeOwned,
	{
		let request = self.authorized(Method::GET, endpoint, id).await?;

		Ok(self.send(request).await?.decode_first()?)
	}

	/// GET returning every `data` record of a single, unpaginated response.
	async fn fetch_all<R>(&self, endpoint: Endpoint, id: Option<&str>) -> Result<Vec<R>>
	where
		R: DeserializeOwned,
	{
		let request = self.authorized(Method::GET, endpoint, id).await?;

		Ok(self.send(request).await?.decode_records()?)
	}

	/// GET following `after_cursor` until `page.limit()` records are gathered.
	async fn fetch_paginated<R>(&self, endpoint: Endpoint, page: PageRequest) -> Result<Vec<R>>
	where
		R: DeserializeOwned,
	{
		let authorization = self.bearer().await?;
		let authorization = &authorization;

		self.paginator
			.collect(page, move |query| async move {
				let request = self.request(Method::GET, endpoint, None, authorization)?.query(query);

				self.send(request).await
			})
			.await
	}

	/// Sends a write request and maps `status.type` to a boolean.
	///
	/// A declined write records `status.code` (or the HTTP status) and the status message.
	async fn submit(&self, request: ApiRequest) -> Result<bool> {
		let response = self.send_raw(request).await?;
		let envelope = Envelope::parse(response.body())?;

		if envelope.operation_succeeded() {
			return Ok(true);
		}

		let status = envelope.status.unwrap_or_default();
		let code = status.code.unwrap_or_else(|| match response.status().as_u16() {
			code if code >= 400 => code,
			_ => GENERIC_FAILURE_CODE,
		});

		self.record_error(LastError::new(code, status.message.or(status.kind).unwrap_or_default()));

		Ok(false)
	}
}
#[cfg(feature = "reqwest")]
impl OneLoginClient<ReqwestTransport> {
	/// Creates a client backed by a fresh reqwest transport.
	pub fn new(settings: Settings) -> Result<Self> {
		let transport = ReqwestTransport::new()?;

		Self::with_transport(settings, transport)
	}
}
impl<T> Debug for OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OneLoginClient")
			.field("tokens", &self.tokens)
			.field("paginator", &self.paginator)
			.field("user_agent", &self.user_agent)
			.field("last_error", &self.last_error.lock())
			.finish_non_exhaustive()
	}
}

fn path_id(id: u64) -> String {
	id.to_string()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::ScriptedTransport, error::AuthError};

	pub(super) fn client() -> (Arc<ScriptedTransport>, OneLoginClient<ScriptedTransport>) {
		let settings = Settings::builder("client-id", "client-secret")
			.build()
			.expect("Fixture settings should validate.");
		let transport = Arc::new(ScriptedTransport::default());
		let client = OneLoginClient::with_transport(settings, transport.clone())
			.expect("Fixture client should build.");

		(transport, client)
	}

	pub(super) fn token_body() -> Value {
		serde_json::json!({
			"status": { "error": false, "code": 200, "type": "success", "message": "Success" },
			"data": [{
				"access_token": "access",
				"refresh_token": "refresh",
				"account_id": 1,
				"token_type": "bearer",
				"created_at": "2099-01-01T00:00:00Z",
				"expires_in": 36000
			}]
		})
	}

	#[tokio::test]
	async fn client_rejections_are_recorded_and_cleared() {
		let (transport, client) = client();

		transport.push_json(200, token_body());
		transport.push_json(
			404,
			serde_json::json!({ "status": { "error": true, "code": 404, "type": "not found", "message": "Not Found" } }),
		);

		let err = client.get_user(42).await.expect_err("Missing user must fail.");

		assert!(matches!(err, Error::Client { status: 404, .. }));
		assert_eq!(client.last_error(), Some(LastError::new(404, "Not Found")));

		transport.push_json(
			200,
			serde_json::json!({ "status": { "type": "success" }, "data": [{ "id": 7, "name": "Admin" }] }),
		);

		let role = client.get_role(7).await.expect("Role lookup should succeed.");

		assert_eq!(role.and_then(|r| r.name).as_deref(), Some("Admin"));
		assert_eq!(client.error(), None);
		assert_eq!(client.error_description(), None);
	}

	#[tokio::test]
	async fn failed_token_acquisition_stops_the_call() {
		let (transport, client) = client();

		transport.push_json(
			401,
			serde_json::json!({ "status": { "error": true, "code": 401, "type": "Unauthorized", "message": "Authentication Failure" } }),
		);

		let err = client.get_users(Default::default()).await.expect_err("Call must not proceed.");

		assert!(matches!(err, Error::Auth(AuthError::Rejected { status: 401, .. })));
		assert_eq!(client.last_error(), Some(LastError::new(401, "Authentication Failure")));
		assert_eq!(transport.request_count(), 1);
	}

	#[tokio::test]
	async fn server_failures_use_the_generic_code() {
		let (transport, client) = client();

		transport.push_json(200, token_body());
		transport.push_raw(503, b"upstream unavailable".to_vec());

		client.get_event_types().await.expect_err("Server failure must surface.");

		assert_eq!(client.error(), Some(GENERIC_FAILURE_CODE));
		assert!(
			client.error_description().is_some_and(|d| d.contains("503")),
			"Description should name the HTTP status."
		);
	}

	#[tokio::test]
	async fn declined_writes_return_false_with_status() {
		let (transport, client) = client();

		transport.push_json(200, token_body());
		transport.push_json(
			200,
			serde_json::json!({ "status": { "error": true, "code": 422, "type": "error", "message": "Role not found" } }),
		);

		let assigned =
			client.assign_role_to_user(9, &[1, 2]).await.expect("Declined write is not an error.");

		assert!(!assigned);
		assert_eq!(client.last_error(), Some(LastError::new(422, "Role not found")));
		assert_eq!(transport.requests()[1].json(), serde_json::json!({ "role_id_array": [1, 2] }));
	}

	#[tokio::test]
	async fn transport_failures_are_recorded() {
		let (_, client) = client();

		client.get_rate_limit().await.expect_err("Empty script must fail.");

		assert_eq!(client.error(), Some(GENERIC_FAILURE_CODE));
	}
}
