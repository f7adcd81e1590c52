//! Typed async client for the OneLogin identity API: OAuth 2.0 token lifecycle, cursor-driven
//! list retrieval, and envelope decoding behind one façade.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod pagination;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fakes for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture};

	/// Snapshot of a request observed by [`ScriptedTransport`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		/// HTTP method of the request.
		pub method: String,
		/// Full request URL, query string included.
		pub url: String,
		/// Header name/value pairs, lowercased names.
		pub headers: Vec<(String, String)>,
		/// Raw request body.
		pub body: Vec<u8>,
	}
	impl RecordedRequest {
		/// Returns the first header value matching `name` (case-insensitive).
		pub fn header(&self, name: &str) -> Option<&str> {
			self.headers
				.iter()
				.find(|(key, _)| key.eq_ignore_ascii_case(name))
				.map(|(_, value)| value.as_str())
		}

		/// Parses the body as JSON.
		pub fn json(&self) -> Value {
			serde_json::from_slice(&self.body).unwrap_or(Value::Null)
		}

		/// Returns the value of a query parameter, if present.
		pub fn query_param(&self, name: &str) -> Option<String> {
			Url::parse(&self.url)
				.ok()?
				.query_pairs()
				.find(|(key, _)| key == name)
				.map(|(_, value)| value.into_owned())
		}
	}

	/// Error raised by [`ScriptedTransport`] once its script runs dry.
	#[derive(Debug, ThisError)]
	#[error("Scripted transport has no response left for {0}.")]
	pub struct ScriptExhausted(pub String);

	/// In-memory [`HttpTransport`] that replays canned responses in order and records every
	/// request it sees.
	#[derive(Debug, Default)]
	pub struct ScriptedTransport {
		responses: Mutex<VecDeque<HttpResponse>>,
		requests: Mutex<Vec<RecordedRequest>>,
	}
	impl ScriptedTransport {
		/// Queues a JSON response with the given status.
		pub fn push_json(&self, status: u16, body: Value) {
			self.push_raw(status, body.to_string().into_bytes());
		}

		/// Queues a raw response body with the given status.
		pub fn push_raw(&self, status: u16, body: Vec<u8>) {
			let mut response = HttpResponse::new(body);

			*response.status_mut() =
				::http::StatusCode::from_u16(status).unwrap_or(::http::StatusCode::OK);

			self.push_response(response);
		}

		/// Queues a fully built response, headers included.
		pub fn push_response(&self, response: HttpResponse) {
			self.responses.lock().push_back(response);
		}

		/// Returns every request observed so far.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}

		/// Returns the number of requests observed so far.
		pub fn request_count(&self) -> usize {
			self.requests.lock().len()
		}
	}
	impl HttpTransport for ScriptedTransport {
		type TransportError = ScriptExhausted;

		fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
			let recorded = RecordedRequest {
				method: request.method().to_string(),
				url: request.uri().to_string(),
				headers: request
					.headers()
					.iter()
					.map(|(name, value)| {
						(name.as_str().to_owned(), value.to_str().unwrap_or_default().to_owned())
					})
					.collect(),
				body: request.body().clone(),
			};
			let url = recorded.url.clone();

			self.requests.lock().push(recorded);

			let next = self.responses.lock().pop_front();

			Box::pin(async move { next.ok_or(ScriptExhausted(url)) })
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use client::ReqwestOneLoginClient;
pub use client::OneLoginClient;
pub use config::{Region, Settings};
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
