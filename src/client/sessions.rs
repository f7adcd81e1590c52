// crates.io
use ::http::{
	Method,
	header::{HeaderName, SET_COOKIE},
};
// self
use crate::{
	_prelude::*,
	auth::Authorization,
	client::OneLoginClient,
	endpoint::Endpoint,
	envelope,
	http::{self, HttpTransport},
	model::{SessionLoginParams, SessionToken},
};

const ALLOWED_ORIGIN: HeaderName = HeaderName::from_static("custom-allowed-origin-header-1");

#[derive(Serialize)]
struct VerifyFactor<'a> {
	device_id: String,
	state_token: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	otp_token: Option<&'a str>,
}

#[derive(Serialize)]
struct SessionViaToken<'a> {
	session_token: &'a str,
}

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Starts a login with user credentials.
	///
	/// `allowed_origin` is forwarded as the CORS origin header for browser-side session
	/// exchange. The result is either a session token or an MFA challenge; `None` means the
	/// response carried no status message or data.
	pub async fn create_session_login_token(
		&self,
		params: &SessionLoginParams,
		allowed_origin: Option<&str>,
	) -> Result<Option<SessionToken>> {
		self.observe("create_session_login_token", async {
			let mut request =
				self.authorized(Method::POST, Endpoint::SessionLoginToken, None).await?.json(params)?;

			if let Some(origin) = allowed_origin {
				request = request.header(ALLOWED_ORIGIN, origin);
			}

			Ok(self.send(request).await?.decode_session_token()?)
		})
		.await
	}

	/// Completes an MFA challenge raised by
	/// [`create_session_login_token`](Self::create_session_login_token).
	///
	/// Without `otp_token` (or with an empty one) the call triggers or polls a push-style factor.
	pub async fn get_session_token_verified(
		&self,
		device_id: u64,
		state_token: &str,
		otp_token: Option<&str>,
	) -> Result<Option<SessionToken>> {
		let body = VerifyFactor {
			device_id: device_id.to_string(),
			state_token,
			otp_token: otp_token.filter(|t| !t.is_empty()),
		};

		self.observe("get_session_token_verified", async {
			let request =
				self.authorized(Method::POST, Endpoint::VerifyFactor, None).await?.json(&body)?;

			Ok(self.send(request).await?.decode_session_token()?)
		})
		.await
	}

	/// Exchanges a session token for browser session cookies.
	///
	/// Returns the `Set-Cookie` header values. The request carries no `Authorization` header;
	/// a rejected token reports the raw response body as its description.
	pub async fn create_session_via_token(&self, session_token: &str) -> Result<Vec<String>> {
		self.observe("create_session_via_token", async {
			self.tokens.ensure_valid().await?;

			let request = self
				.request(Method::POST, Endpoint::SessionViaApiToken, None, &Authorization::None)?
				.json(&SessionViaToken { session_token })?;
			let response = http::execute(self.transport.as_ref(), request).await?;
			let status = response.status();

			if status.is_client_error() {
				return Err(Error::Client {
					status: status.as_u16(),
					message: String::from_utf8_lossy(response.body()).into_owned(),
				});
			}
			if !status.is_success() && !status.is_redirection() {
				return Err(Error::Server {
					status: status.as_u16(),
					message: envelope::error_message(response.body(), status),
				});
			}

			Ok(response
				.headers()
				.get_all(SET_COOKIE)
				.iter()
				.filter_map(|value| value.to_str().ok())
				.map(str::to_owned)
				.collect())
		})
		.await
	}
}
