//! Acquires a token with the client-credentials grant and lists users against a local mock of
//! the OneLogin API.
//!
//! Swap the `api_base` override for a [`Region`](onelogin_client::Region) and real credentials
//! to run the same calls against a live account.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use onelogin_client::{OneLoginClient, Settings, pagination::ListQuery, url::Url};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/auth/oauth2/token")
				.header("authorization", "client_id:demo-client, client_secret:demo-secret");
			then.status(200).json_body(json!({
				"status": { "error": false, "code": 200, "type": "success", "message": "Success" },
				"data": [{
					"access_token": "demo-access",
					"refresh_token": "demo-refresh",
					"account_id": 1,
					"token_type": "bearer",
					"created_at": "2099-01-01T00:00:00Z",
					"expires_in": 36000
				}]
			}));
		})
		.await;
	let users_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/1/users").header("authorization", "bearer:demo-access");
			then.status(200).json_body(json!({
				"status": { "error": false, "code": 200, "type": "success", "message": "Success" },
				"data": [
					{ "id": 1, "email": "ada@example.com", "username": "ada" },
					{ "id": 2, "email": "grace@example.com", "username": "grace" }
				]
			}));
		})
		.await;
	let settings = Settings::builder("demo-client", "demo-secret")
		.api_base(Url::parse(&server.base_url())?)
		.build()?;
	let client = OneLoginClient::new(settings)?;
	let tokens = client.get_access_token().await?;

	println!("Access token issued for account {:?}.", tokens.account_id);

	let users = client.get_users(ListQuery::new().with_limit(10)).await?;

	for user in &users {
		println!("User {}: {:?}.", user.id, user.email);
	}

	token_mock.assert_async().await;
	users_mock.assert_async().await;

	Ok(())
}
