// crates.io
use ::http::Method;
// self
use crate::{
	_prelude::*,
	client::OneLoginClient,
	endpoint::Endpoint,
	http::{ApiRequest, HttpTransport},
	model::{SamlAssertionParams, SamlEndpointResponse},
};

#[derive(Serialize)]
struct SamlVerifyFactor<'a> {
	app_id: &'a str,
	device_id: String,
	state_token: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	otp_token: Option<&'a str>,
}

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Requests a SAML assertion for an app on behalf of a user.
	///
	/// The response holds either the base64 SAML document or an MFA challenge to complete with
	/// [`get_saml_assertion_verifying`](Self::get_saml_assertion_verifying).
	pub async fn get_saml_assertion(
		&self,
		params: &SamlAssertionParams,
	) -> Result<Option<SamlEndpointResponse>> {
		self.observe("get_saml_assertion", async {
			let request =
				self.authorized(Method::POST, Endpoint::SamlAssertion, None).await?.json(params)?;

			Ok(self.send(request).await?.decode_saml_endpoint()?)
		})
		.await
	}

	/// Verifies the MFA factor of a pending SAML assertion.
	///
	/// `url_override` replaces the regional verify endpoint, typically with the challenge's
	/// `callback_url`. An empty `otp_token` is sent as if absent.
	pub async fn get_saml_assertion_verifying(
		&self,
		app_id: &str,
		device_id: u64,
		state_token: &str,
		otp_token: Option<&str>,
		url_override: Option<Url>,
	) -> Result<Option<SamlEndpointResponse>> {
		let body = SamlVerifyFactor {
			app_id,
			device_id: device_id.to_string(),
			state_token,
			otp_token: otp_token.filter(|t| !t.is_empty()),
		};

		self.observe("get_saml_assertion_verifying", async {
			let request = match url_override {
				Some(url) => {
					let authorization = self.bearer().await?;

					ApiRequest::post(url).user_agent(&self.user_agent).authorization(&authorization)
				},
				None => self.authorized(Method::POST, Endpoint::SamlVerifyFactor, None).await?,
			}
			.json(&body)?;

			Ok(self.send(request).await?.decode_saml_endpoint()?)
		})
		.await
	}
}
