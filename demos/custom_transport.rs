//! Plugs a custom [`HttpTransport`] into the client.
//!
//! The transport wraps the default reqwest one and logs every exchange. Any HTTP stack works the
//! same way: return every response as `Ok`, whatever its status, and keep `Err` for failures
//! where no response exists.

// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use onelogin_client::{
	OneLoginClient, Settings,
	http::{HttpRequest, HttpTransport, ReqwestTransport, TransportFuture},
	reqwest::Error as ReqwestError,
	url::Url,
};

/// Forwards to [`ReqwestTransport`] and prints each request line and response status.
#[derive(Debug)]
struct LoggingTransport {
	inner: ReqwestTransport,
	sent: AtomicUsize,
}
impl LoggingTransport {
	fn new() -> Result<Self> {
		Ok(Self { inner: ReqwestTransport::new()?, sent: AtomicUsize::new(0) })
	}
}
impl HttpTransport for LoggingTransport {
	type TransportError = ReqwestError;

	fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		let line = format!("{} {}", request.method(), request.uri());

		self.sent.fetch_add(1, Ordering::Relaxed);

		Box::pin(async move {
			let response = self.inner.send(request).await?;

			println!("{line} -> {}", response.status());

			Ok(response)
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/oauth2/token");
			then.status(200).json_body(json!({
				"status": { "error": false, "code": 200, "type": "success", "message": "Success" },
				"data": [{
					"access_token": "demo-access",
					"refresh_token": "demo-refresh",
					"created_at": "2099-01-01T00:00:00Z",
					"expires_in": 36000
				}]
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/rate_limit");
			then.status(200).json_body(json!({
				"status": { "error": false, "code": 200, "type": "success", "message": "Success" },
				"data": { "X-RateLimit-Limit": 5000, "X-RateLimit-Remaining": 4999, "X-RateLimit-Reset": 900 }
			}));
		})
		.await;

	let settings = Settings::builder("demo-client", "demo-secret")
		.api_base(Url::parse(&server.base_url())?)
		.build()?;
	let transport = Arc::new(LoggingTransport::new()?);
	let client: OneLoginClient<LoggingTransport> =
		OneLoginClient::with_transport(settings, transport.clone())?;

	if let Some(limit) = client.get_rate_limit().await? {
		println!("Rate limit: {} of {} left.", limit.remaining, limit.limit);
	}

	println!("Transport sent {} requests.", transport.sent.load(Ordering::Relaxed));

	Ok(())
}
