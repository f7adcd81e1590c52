#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use onelogin_client::{
	model::{SamlAssertionParams, SamlOutcome},
	url::Url,
};

#[tokio::test]
async fn assertion_challenge_is_verified_through_the_callback() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server);
	let callback = server.url("/custom/saml/verify");

	mock_token_endpoint(&server).await;

	let assertion = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/1/saml_assertion").json_body(json!({
				"username_or_email": "ada",
				"password": "hunter2",
				"app_id": "8080",
				"subdomain": "acme",
				"ip_address": "10.0.0.8"
			}));
			then.status(200).json_body(json!({
				"status": { "error": false, "code": 200, "type": "success", "message": "MFA is required for this user" },
				"data": [{
					"state_token": "saml-state",
					"callback_url": callback,
					"devices": [{ "device_id": 12, "device_type": "OneLogin SMS" }],
					"user": { "id": 31, "email": "ada@example.com" }
				}]
			}));
		})
		.await;
	let verify = server
		.mock_async(|when, then| {
			when.method(POST).path("/custom/saml/verify").header("authorization", bearer()).json_body(
				json!({ "app_id": "8080", "device_id": "12", "state_token": "saml-state" }),
			);
			then.status(200).json_body(json!({
				"status": { "error": false, "code": 200, "type": "success", "message": "Success" },
				"data": "PHNhbWxwOlJlc3BvbnNlLz4="
			}));
		})
		.await;
	let mut params = SamlAssertionParams::new("ada", "hunter2", "8080", "acme");

	params.ip_address = Some("10.0.0.8".into());

	let challenge = client
		.get_saml_assertion(&params)
		.await
		.expect("Assertion call should succeed.")
		.expect("Response should decode.");
	let mfa = challenge.mfa().expect("Assertion should require MFA.").clone();
	let callback = Url::parse(mfa.callback_url.as_deref().unwrap_or_default())
		.expect("Callback should be a URL.");
	let verified = client
		.get_saml_assertion_verifying("8080", mfa.devices[0].device_id, &mfa.state_token, None, Some(callback))
		.await
		.expect("Verification should succeed.")
		.expect("Response should decode.");

	assertion.assert_async().await;
	verify.assert_async().await;
	assert_eq!(challenge.status_type, "success");
	assert_eq!(verified.message, "Success");
	assert_eq!(verified.outcome, SamlOutcome::Assertion("PHNhbWxwOlJlc3BvbnNlLz4=".into()));
}

#[tokio::test]
async fn default_verify_endpoint_is_regional() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server);

	mock_token_endpoint(&server).await;

	let verify = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/1/saml_assertion/verify_factor");
			then.status(400).json_body(json!({
				"status": { "error": true, "code": 400, "type": "bad request", "message": "Invalid OTP" }
			}));
		})
		.await;

	client
		.get_saml_assertion_verifying("8080", 12, "saml-state", Some("999999"), None)
		.await
		.expect_err("Invalid OTP must fail.");

	verify.assert_async().await;
	assert_eq!(client.error(), Some(400));
	assert_eq!(client.error_description().as_deref(), Some("Invalid OTP"));
}
