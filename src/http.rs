//! Transport primitives for OneLogin API calls.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. Transports hand back
//! every response they receive, whatever its status; [`classify`] then splits successes from
//! client rejections and server failures so every operation maps them the same way.

// crates.io
use ::http::{
	HeaderValue, Method, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, USER_AGENT},
};
// self
use crate::{
	_prelude::*,
	auth::Authorization,
	envelope,
	error::{ConfigError, TransportError},
};

/// Request type handed to transports.
pub type HttpRequest = ::http::Request<Vec<u8>>;
/// Response type returned by transports.
pub type HttpResponse = ::http::Response<Vec<u8>>;
/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute OneLogin API requests.
///
/// Implementations must return every HTTP response (including 4xx and 5xx) as `Ok` and reserve
/// `Err` for failures where no response exists: DNS, TCP, TLS, timeouts.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the raw response.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// [`HttpTransport`] backed by a shared [`ReqwestClient`].
///
/// Redirects are not followed; the API answers directly and the session endpoint's redirect
/// response carries the cookies callers need.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport with redirect following disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// Configure the client without redirect following to keep `Set-Cookie` headers visible.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	type TransportError = ReqwestError;

	fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(reqwest::Request::try_from(request)?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok::<_, ReqwestError>(response_new)
		})
	}
}

/// Builder for a single API request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	method: Method,
	url: Url,
	headers: Vec<(HeaderName, String)>,
	body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Starts a request with the given method and URL.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: Vec::new(), body: None }
	}

	/// Starts a `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::GET, url)
	}

	/// Starts a `POST` request.
	pub fn post(url: Url) -> Self {
		Self::new(Method::POST, url)
	}

	/// Starts a `PUT` request.
	pub fn put(url: Url) -> Self {
		Self::new(Method::PUT, url)
	}

	/// Starts a `DELETE` request.
	pub fn delete(url: Url) -> Self {
		Self::new(Method::DELETE, url)
	}

	/// Sets the `User-Agent` header.
	pub fn user_agent(self, user_agent: &str) -> Self {
		self.header(USER_AGENT, user_agent)
	}

	/// Sets the `Authorization` header; [`Authorization::None`] leaves it off.
	pub fn authorization(self, authorization: &Authorization) -> Self {
		match authorization.header_value() {
			Some(value) => self.header(AUTHORIZATION, value),
			None => self,
		}
	}

	/// Appends an arbitrary header.
	pub fn header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
		self.headers.push((name, value.into()));

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<B>(mut self, body: &B) -> Result<Self, ConfigError>
	where
		B: ?Sized + Serialize,
	{
		let bytes =
			serde_json::to_vec(body).map_err(|source| ConfigError::RequestBody { source })?;

		self.body = Some(bytes);

		Ok(self)
	}

	/// Appends query parameters; an empty iterator leaves the URL untouched.
	pub fn query<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut pairs = pairs.into_iter().peekable();

		if pairs.peek().is_some() {
			let mut query = self.url.query_pairs_mut();

			for (key, value) in pairs {
				query.append_pair(key.as_ref(), value.as_ref());
			}
		}

		self
	}

	/// URL the request targets, query string included.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Converts the builder into a transport-level request.
	pub fn into_http(self) -> Result<HttpRequest, ConfigError> {
		let mut builder = ::http::Request::builder().method(self.method).uri(self.url.as_str());

		if self.body.is_some() {
			builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		}
		for (name, value) in self.headers {
			builder = builder.header(name, value);
		}

		Ok(builder.body(self.body.unwrap_or_default())?)
	}
}

/// Sends `request` through `transport`, wrapping network failures.
///
/// The response is returned as-is; callers decide how to interpret its status.
pub async fn execute<T>(transport: &T, request: ApiRequest) -> Result<HttpResponse>
where
	T: ?Sized + HttpTransport,
{
	let request = request.into_http()?;
	let response = transport.send(request).await.map_err(TransportError::network)?;

	Ok(response)
}

/// Passes 2xx responses through and turns everything else into an [`Error`].
///
/// 4xx becomes [`Error::Client`]; any other status becomes [`Error::Server`]. Both carry the
/// message extracted from the response envelope.
pub fn classify(response: HttpResponse) -> Result<HttpResponse> {
	let status = response.status();

	if status.is_success() {
		return Ok(response);
	}

	let message = envelope::error_message(response.body(), status);

	if status.is_client_error() {
		Err(Error::Client { status: status.as_u16(), message })
	} else {
		Err(Error::Server { status: status.as_u16(), message })
	}
}

/// Returns `true` when the response status is exactly `200 OK`.
pub fn is_ok(response: &HttpResponse) -> bool {
	response.status() == StatusCode::OK
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = StatusCode::from_u16(status).expect("Fixture status is valid.");

		response
	}

	#[test]
	fn request_builder_sets_headers_and_query() {
		let url = Url::parse("https://api.us.onelogin.com/api/1/users").expect("Fixture URL.");
		let request = ApiRequest::get(url)
			.user_agent("agent/1.0")
			.authorization(&Authorization::Bearer(crate::auth::TokenSecret::new("tok")))
			.query([("limit", "5"), ("after_cursor", "a b")])
			.into_http()
			.expect("Request should build.");

		assert_eq!(request.method(), Method::GET);
		assert_eq!(
			request.uri().to_string(),
			"https://api.us.onelogin.com/api/1/users?limit=5&after_cursor=a+b"
		);
		assert_eq!(request.headers()[AUTHORIZATION], "bearer:tok");
		assert_eq!(request.headers()[USER_AGENT], "agent/1.0");
		assert!(request.headers().get(CONTENT_TYPE).is_none());
	}

	#[test]
	fn empty_query_leaves_url_untouched() {
		let url = Url::parse("https://api.us.onelogin.com/api/1/groups").expect("Fixture URL.");
		let request = ApiRequest::get(url).query(Vec::<(String, String)>::new());

		assert_eq!(request.url().as_str(), "https://api.us.onelogin.com/api/1/groups");
	}

	#[test]
	fn json_body_sets_content_type() {
		let url = Url::parse("https://api.us.onelogin.com/auth/oauth2/token").expect("Fixture URL.");
		let request = ApiRequest::post(url)
			.json(&serde_json::json!({ "grant_type": "client_credentials" }))
			.expect("Body should serialize.")
			.into_http()
			.expect("Request should build.");

		assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
		assert_eq!(request.body().as_slice(), br#"{"grant_type":"client_credentials"}"#);
	}

	#[test]
	fn classify_splits_client_and_server_failures() {
		assert!(classify(response(200, "{}")).is_ok());

		match classify(response(404, r#"{"status":{"type":"error","message":"Not Found"}}"#)) {
			Err(Error::Client { status: 404, message }) => assert_eq!(message, "Not Found"),
			other => panic!("Unexpected classification: {other:?}."),
		}
		match classify(response(502, "<html>bad gateway</html>")) {
			Err(err @ Error::Server { status: 502, .. }) => assert_eq!(err.code(), 500),
			other => panic!("Unexpected classification: {other:?}."),
		}
	}
}
