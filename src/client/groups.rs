// self
use crate::{
	_prelude::*,
	client::{OneLoginClient, path_id},
	endpoint::Endpoint,
	http::HttpTransport,
	model::Group,
	pagination::PageRequest,
};

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists up to `limit` groups; `0` means the default page size.
	///
	/// The endpoint takes no filters, so the limit is applied client-side only.
	pub async fn get_groups(&self, limit: usize) -> Result<Vec<Group>> {
		let page = PageRequest::client_side(limit);

		self.observe("get_groups", self.fetch_paginated(Endpoint::Groups, page)).await
	}

	/// Fetches one group.
	pub async fn get_group(&self, id: u64) -> Result<Option<Group>> {
		self.observe("get_group", self.fetch_first(Endpoint::Group, Some(&path_id(id)))).await
	}
}
