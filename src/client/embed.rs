// crates.io
use ::http::Method;
// self
use crate::{
	_prelude::*,
	auth::Authorization,
	client::OneLoginClient,
	endpoint::Endpoint,
	http::HttpTransport,
	model::{self, App},
};

#[derive(Serialize)]
struct EmbedQuery<'a> {
	token: &'a str,
	email: &'a str,
}

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Apps a user can launch from an embedded portal.
	///
	/// Authenticates with the account's embedding `token` rather than API credentials, so no
	/// access token is requested.
	pub async fn get_embed_apps(&self, token: &str, email: &str) -> Result<Vec<App>> {
		self.observe("get_embed_apps", async {
			let request = self
				.request(Method::GET, Endpoint::EmbedApps, None, &Authorization::None)?
				.json(&EmbedQuery { token, email })?;
			let response = self.send_raw(request).await?;

			Ok(model::apps_from_xml(&String::from_utf8_lossy(response.body()))?)
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::client::tests::client;

	#[tokio::test]
	async fn embed_apps_skip_token_acquisition() {
		let (transport, client) = client();

		transport.push_raw(
			200,
			b"<apps><app><id>10</id><icon>https://cdn/icon.png</icon><name>Wiki</name><provisioned>0</provisioned><extension_required>true</extension_required><personal>false</personal><login_id>7</login_id></app></apps>".to_vec(),
		);

		let apps = client
			.get_embed_apps("embed-token", "ada@example.com")
			.await
			.expect("Apps should load.");
		let requests = transport.requests();
		let request = &requests[0];

		assert_eq!(transport.request_count(), 1);
		assert_eq!(apps.len(), 1);
		assert_eq!(apps[0].name.as_deref(), Some("Wiki"));
		assert_eq!(request.method, "GET");
		assert_eq!(request.header("authorization"), None);
		assert_eq!(request.json(), serde_json::json!({ "token": "embed-token", "email": "ada@example.com" }));
	}
}
