// crates.io
use ::http::Method;
// self
use crate::{
	_prelude::*,
	client::{OneLoginClient, path_id},
	endpoint::Endpoint,
	http::HttpTransport,
	model::{App, User, UserParams},
	pagination::{ListQuery, PageRequest},
};

#[derive(Serialize)]
struct RoleIds<'a> {
	role_id_array: &'a [u64],
}

#[derive(Serialize)]
struct ClearTextPassword<'a> {
	password: &'a str,
	password_confirmation: &'a str,
}

#[derive(Serialize)]
struct SaltedPassword<'a> {
	password: &'a str,
	password_confirmation: &'a str,
	password_algorithm: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	password_salt: Option<&'a str>,
}

#[derive(Serialize)]
struct CustomAttributes<'a> {
	custom_attributes: &'a BTreeMap<String, Value>,
}

#[derive(Serialize)]
struct LockDuration {
	locked_until: u32,
}

impl<T> OneLoginClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists users matching `query`, following cursors up to the query's limit.
	pub async fn get_users(&self, query: ListQuery) -> Result<Vec<User>> {
		let page = PageRequest::from_query(query);

		self.observe("get_users", self.fetch_paginated(Endpoint::Users, page)).await
	}

	/// Fetches one user.
	pub async fn get_user(&self, id: u64) -> Result<Option<User>> {
		self.observe("get_user", self.fetch_first(Endpoint::User, Some(&path_id(id)))).await
	}

	/// Apps assigned to a user.
	pub async fn get_user_apps(&self, id: u64) -> Result<Vec<App>> {
		self.observe("get_user_apps", self.fetch_all(Endpoint::UserApps, Some(&path_id(id)))).await
	}

	/// Role ids assigned to a user.
	pub async fn get_user_roles(&self, id: u64) -> Result<Vec<u64>> {
		let id = path_id(id);
		let roles = self.fetch_first::<Vec<u64>>(Endpoint::UserRoles, Some(&id));

		self.observe("get_user_roles", async { Ok(roles.await?.unwrap_or_default()) }).await
	}

	/// Names of the custom user attributes defined for the account.
	pub async fn get_custom_attributes(&self) -> Result<Vec<String>> {
		let attributes = self.fetch_first::<Vec<String>>(Endpoint::CustomAttributes, None);

		self.observe("get_custom_attributes", async { Ok(attributes.await?.unwrap_or_default()) })
			.await
	}

	/// Creates a user and returns the stored record.
	pub async fn create_user(&self, params: &UserParams) -> Result<Option<User>> {
		self.observe("create_user", async {
			let request =
				self.authorized(Method::POST, Endpoint::CreateUser, None).await?.json(params)?;

			Ok(self.send(request).await?.decode_first()?)
		})
		.await
	}

	/// Updates a user and returns the stored record.
	pub async fn update_user(&self, id: u64, params: &UserParams) -> Result<Option<User>> {
		self.observe("update_user", async {
			let request = self
				.authorized(Method::PUT, Endpoint::UpdateUser, Some(&path_id(id)))
				.await?
				.json(params)?;

			Ok(self.send(request).await?.decode_first()?)
		})
		.await
	}

	/// Adds roles to a user.
	pub async fn assign_role_to_user(&self, id: u64, role_ids: &[u64]) -> Result<bool> {
		self.observe(
			"assign_role_to_user",
			self.put(Endpoint::AddRolesToUser, id, &RoleIds { role_id_array: role_ids }),
		)
		.await
	}

	/// Removes roles from a user.
	pub async fn remove_role_from_user(&self, id: u64, role_ids: &[u64]) -> Result<bool> {
		self.observe(
			"remove_role_from_user",
			self.put(Endpoint::RemoveRolesFromUser, id, &RoleIds { role_id_array: role_ids }),
		)
		.await
	}

	/// Sets a user's password from clear text.
	pub async fn set_password_using_clear_text(
		&self,
		id: u64,
		password: &str,
		password_confirmation: &str,
	) -> Result<bool> {
		let body = ClearTextPassword { password, password_confirmation };

		self.observe(
			"set_password_using_clear_text",
			self.put(Endpoint::SetPasswordClearText, id, &body),
		)
		.await
	}

	/// Sets a user's password from a precomputed hash.
	///
	/// `algorithm` names the hash, e.g. `salt+sha256`; `salt` is sent only when given.
	pub async fn set_password_using_hash_salt(
		&self,
		id: u64,
		password: &str,
		password_confirmation: &str,
		algorithm: &str,
		salt: Option<&str>,
	) -> Result<bool> {
		let body = SaltedPassword {
			password,
			password_confirmation,
			password_algorithm: algorithm,
			password_salt: salt,
		};

		self.observe(
			"set_password_using_hash_salt",
			self.put(Endpoint::SetPasswordSalt, id, &body),
		)
		.await
	}

	/// Sets custom attribute values on a user; a `null` value clears the attribute.
	pub async fn set_custom_attribute_to_user(
		&self,
		id: u64,
		attributes: &BTreeMap<String, Value>,
	) -> Result<bool> {
		let body = CustomAttributes { custom_attributes: attributes };

		self.observe(
			"set_custom_attribute_to_user",
			self.put(Endpoint::SetCustomAttributes, id, &body),
		)
		.await
	}

	/// Ends every session of a user.
	pub async fn log_user_out(&self, id: u64) -> Result<bool> {
		self.observe("log_user_out", async {
			let request =
				self.authorized(Method::PUT, Endpoint::LogUserOut, Some(&path_id(id))).await?;

			self.submit(request).await
		})
		.await
	}

	/// Locks a user for `minutes`; `0` delegates to the account's lock policy.
	pub async fn lock_user(&self, id: u64, minutes: u32) -> Result<bool> {
		let body = LockDuration { locked_until: minutes };

		self.observe("lock_user", self.put(Endpoint::LockUser, id, &body)).await
	}

	/// Deletes a user.
	pub async fn delete_user(&self, id: u64) -> Result<bool> {
		self.observe("delete_user", async {
			let request =
				self.authorized(Method::DELETE, Endpoint::DeleteUser, Some(&path_id(id))).await?;

			self.submit(request).await
		})
		.await
	}

	async fn put<B>(&self, endpoint: Endpoint, id: u64, body: &B) -> Result<bool>
	where
		B: Serialize,
	{
		let request = self.authorized(Method::PUT, endpoint, Some(&path_id(id))).await?.json(body)?;

		self.submit(request).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::client::tests::{client, token_body};

	fn success(data: Value) -> Value {
		serde_json::json!({ "status": { "error": false, "code": 200, "type": "success", "message": "Success" }, "data": data })
	}

	#[tokio::test]
	async fn user_list_honors_small_limits() {
		let (transport, client) = client();

		transport.push_json(200, token_body());
		transport.push_json(
			200,
			serde_json::json!({
				"status": { "type": "success", "code": 200 },
				"pagination": { "after_cursor": "next" },
				"data": [{ "id": 1 }, { "id": 2 }, { "id": 3 }]
			}),
		);
		transport.push_json(
			200,
			serde_json::json!({
				"status": { "type": "success", "code": 200 },
				"pagination": { "after_cursor": "later" },
				"data": [{ "id": 4 }, { "id": 5 }, { "id": 6 }]
			}),
		);

		let users = client
			.get_users(ListQuery::new().with_limit(5).filter("email", "*@example.com"))
			.await
			.expect("Users should load.");
		let requests = transport.requests();

		assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
		assert_eq!(requests.len(), 3);
		assert_eq!(requests[1].query_param("limit").as_deref(), Some("5"));
		assert_eq!(requests[1].query_param("after_cursor"), None);
		assert_eq!(requests[2].query_param("after_cursor").as_deref(), Some("next"));
		assert_eq!(requests[2].query_param("email").as_deref(), Some("*@example.com"));
	}

	#[tokio::test]
	async fn nested_id_lists_come_from_the_first_record() {
		let (transport, client) = client();

		transport.push_json(200, token_body());
		transport.push_json(200, success(serde_json::json!([[3, 5, 8]])));
		transport.push_json(200, success(serde_json::json!([["badge", "desk"]])));
		transport.push_json(200, success(serde_json::json!([])));

		assert_eq!(client.get_user_roles(4).await.expect("Roles should load."), vec![3, 5, 8]);
		assert_eq!(
			client.get_custom_attributes().await.expect("Attributes should load."),
			vec!["badge".to_owned(), "desk".to_owned()]
		);
		assert!(client.get_user_roles(4).await.expect("Empty roles are fine.").is_empty());
		assert!(transport.requests()[1].url.ends_with("/api/1/users/4/roles"));
	}

	#[tokio::test]
	async fn user_writes_send_their_payloads() {
		let (transport, client) = client();

		transport.push_json(200, token_body());
		transport.push_json(200, success(serde_json::json!([{ "id": 77, "firstname": "Ada" }])));
		transport.push_json(200, success(Value::Null));
		transport.push_json(200, success(Value::Null));
		transport.push_json(200, success(Value::Null));

		let user = client
			.create_user(&UserParams::new("Ada", "Lovelace", "ada@example.com", "ada"))
			.await
			.expect("User should be created.");

		assert_eq!(user.map(|u| u.id), Some(77));
		assert!(
			client
				.set_password_using_hash_salt(77, "hash", "hash", "salt+sha256", None)
				.await
				.expect("Password should be set.")
		);
		assert!(client.lock_user(77, 15).await.expect("User should lock."));
		assert!(client.delete_user(77).await.expect("User should be deleted."));

		let requests = transport.requests();

		assert_eq!(requests[1].method, "POST");
		assert_eq!(requests[1].json()["email"], "ada@example.com");
		assert_eq!(
			requests[2].json(),
			serde_json::json!({
				"password": "hash",
				"password_confirmation": "hash",
				"password_algorithm": "salt+sha256"
			})
		);
		assert!(requests[2].url.ends_with("/api/1/users/set_password_using_salt/77"));
		assert_eq!(requests[3].json(), serde_json::json!({ "locked_until": 15 }));
		assert_eq!(requests[4].method, "DELETE");
		assert!(requests[4].body.is_empty());
	}
}
