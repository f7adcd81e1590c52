// self
use crate::{
	_prelude::*,
	client::{OneLoginClient, path_id},
	endpoint::Endpoint,
	http::HttpTransport,
	model::Role,
	pagination::{ListQuery, PageRequest},
};

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists roles matching `query`.
	pub async fn get_roles(&self, query: ListQuery) -> Result<Vec<Role>> {
		let page = PageRequest::from_query(query);

		self.observe("get_roles", self.fetch_paginated(Endpoint::Roles, page)).await
	}

	/// Fetches one role.
	pub async fn get_role(&self, id: u64) -> Result<Option<Role>> {
		self.observe("get_role", self.fetch_first(Endpoint::Role, Some(&path_id(id)))).await
	}
}
