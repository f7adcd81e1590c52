// crates.io
use ::http::Method;
// self
use crate::{_prelude::*, client::OneLoginClient, endpoint::Endpoint, http::HttpTransport};

#[derive(Serialize)]
struct InviteLink<'a> {
	email: &'a str,
}

#[derive(Serialize)]
struct SendInvite<'a> {
	email: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	personal_email: Option<&'a str>,
}

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Generates an invite link for the user registered under `email`.
	pub async fn generate_invite_link(&self, email: &str) -> Result<Option<String>> {
		self.observe("generate_invite_link", async {
			let request = self
				.authorized(Method::POST, Endpoint::GenerateInviteLink, None)
				.await?
				.json(&InviteLink { email })?;

			Ok(self.send(request).await?.decode_first()?)
		})
		.await
	}

	/// Emails an invite link to a user, optionally to a personal address instead.
	pub async fn send_invite_link(&self, email: &str, personal_email: Option<&str>) -> Result<bool> {
		self.observe("send_invite_link", async {
			let request = self
				.authorized(Method::POST, Endpoint::SendInviteLink, None)
				.await?
				.json(&SendInvite { email, personal_email })?;

			self.submit(request).await
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::client::tests::{client, token_body};

	#[tokio::test]
	async fn invite_link_is_the_first_record() {
		let (transport, client) = client();

		transport.push_json(200, token_body());
		transport.push_json(
			200,
			serde_json::json!({
				"status": { "type": "success", "code": 200, "message": "Success" },
				"data": ["https://acme.onelogin.com/password/abc"]
			}),
		);
		transport.push_json(200, serde_json::json!({ "status": { "type": "success", "code": 200 } }));

		let link = client.generate_invite_link("ada@example.com").await.expect("Link should load.");
		let sent = client
			.send_invite_link("ada@example.com", Some("ada@home.example"))
			.await
			.expect("Invite should send.");

		assert_eq!(link.as_deref(), Some("https://acme.onelogin.com/password/abc"));
		assert!(sent);
		assert_eq!(
			transport.requests()[2].json(),
			serde_json::json!({ "email": "ada@example.com", "personal_email": "ada@home.example" })
		);
	}
}
