// crates.io
use ::http::Method;
// self
use crate::{
	_prelude::*,
	client::{OneLoginClient, path_id},
	endpoint::Endpoint,
	http::HttpTransport,
	model::{Event, EventParams, EventType},
	pagination::{ListQuery, PageRequest},
};

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Every event type the account can log.
	pub async fn get_event_types(&self) -> Result<Vec<EventType>> {
		self.observe("get_event_types", self.fetch_all(Endpoint::EventTypes, None)).await
	}

	/// Lists events matching `query`, e.g. `since`, `until`, or `event_type_id` filters.
	pub async fn get_events(&self, query: ListQuery) -> Result<Vec<Event>> {
		let page = PageRequest::from_query(query);

		self.observe("get_events", self.fetch_paginated(Endpoint::Events, page)).await
	}

	/// Fetches one event.
	pub async fn get_event(&self, id: u64) -> Result<Option<Event>> {
		self.observe("get_event", self.fetch_first(Endpoint::Event, Some(&path_id(id)))).await
	}

	/// Logs a custom event.
	pub async fn create_event(&self, params: &EventParams) -> Result<bool> {
		self.observe("create_event", async {
			let request =
				self.authorized(Method::POST, Endpoint::CreateEvent, None).await?.json(params)?;

			self.submit(request).await
		})
		.await
	}
}
