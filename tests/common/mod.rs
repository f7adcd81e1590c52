//! Shared fixtures for the httpmock-backed integration suites.

#![allow(dead_code)]

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use onelogin_client::{ReqwestOneLoginClient, Settings, url::Url};

pub const CLIENT_ID: &str = "it-client";
pub const CLIENT_SECRET: &str = "it-secret";
pub const ACCESS_TOKEN: &str = "it-access";
pub const REFRESH_TOKEN: &str = "it-refresh";
pub const USER_AGENT: &str = "onelogin-client-it/1.0";

/// Builds a reqwest-backed client whose API, admin, and embed URLs all point at `server`.
pub fn build_reqwest_test_client(server: &MockServer) -> ReqwestOneLoginClient {
	let base = Url::parse(&server.base_url()).expect("Mock server URL should parse.");
	let embed = Url::parse(&server.url("/client/apps/embed2")).expect("Embed URL should parse.");
	let settings = Settings::builder(CLIENT_ID, CLIENT_SECRET)
		.user_agent(USER_AGENT)
		.api_base(base.clone())
		.admin_base(base)
		.embed_url(embed)
		.build()
		.expect("Integration settings should validate.");

	ReqwestOneLoginClient::new(settings).expect("Reqwest client should build.")
}

/// Successful envelope around `data`.
pub fn success(data: Value) -> Value {
	json!({
		"status": { "error": false, "code": 200, "type": "success", "message": "Success" },
		"data": data
	})
}

/// Token endpoint payload with a far-future creation time.
pub fn token_payload(access_token: &str, refresh_token: &str) -> Value {
	success(json!([{
		"access_token": access_token,
		"refresh_token": refresh_token,
		"account_id": 555,
		"token_type": "bearer",
		"created_at": "2099-01-01T00:00:00.000Z",
		"expires_in": 36000
	}]))
}

/// Mocks a client-credentials exchange that issues [`ACCESS_TOKEN`].
pub async fn mock_token_endpoint(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/auth/oauth2/token")
				.header("authorization", format!("client_id:{CLIENT_ID}, client_secret:{CLIENT_SECRET}"))
				.json_body(json!({ "grant_type": "client_credentials" }));
			then.status(200).json_body(token_payload(ACCESS_TOKEN, REFRESH_TOKEN));
		})
		.await
}

/// Bearer header value for [`ACCESS_TOKEN`].
pub fn bearer() -> String {
	format!("bearer:{ACCESS_TOKEN}")
}
