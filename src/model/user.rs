// self
use crate::_prelude::*;

/// OneLogin user record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
	/// User identifier.
	pub id: u64,
	/// Identifier in an external directory.
	#[serde(default)]
	pub external_id: Option<String>,
	/// Primary email address.
	#[serde(default)]
	pub email: Option<String>,
	/// Login name.
	#[serde(default)]
	pub username: Option<String>,
	/// Given name.
	#[serde(default)]
	pub firstname: Option<String>,
	/// Family name.
	#[serde(default)]
	pub lastname: Option<String>,
	/// LDAP distinguished name.
	#[serde(default)]
	pub distinguished_name: Option<String>,
	/// Phone number.
	#[serde(default)]
	pub phone: Option<String>,
	/// Company name.
	#[serde(default)]
	pub company: Option<String>,
	/// Department name.
	#[serde(default)]
	pub department: Option<String>,
	/// Job title.
	#[serde(default)]
	pub title: Option<String>,
	/// Numeric account status (`0` unactivated, `1` active, `2` suspended, `3` locked, ...).
	#[serde(default)]
	pub status: Option<i64>,
	/// Numeric approval state.
	#[serde(default)]
	pub state: Option<i64>,
	/// Active Directory group memberships.
	#[serde(default)]
	pub member_of: Option<String>,
	/// Active Directory login name.
	#[serde(default)]
	pub samaccountname: Option<String>,
	/// Active Directory principal name.
	#[serde(default)]
	pub userprincipalname: Option<String>,
	/// Group the user belongs to.
	#[serde(default)]
	pub group_id: Option<u64>,
	/// Roles assigned to the user.
	#[serde(default, deserialize_with = "nullable_vec")]
	pub role_id: Vec<u64>,
	/// Custom attribute values keyed by attribute shortname.
	#[serde(default, deserialize_with = "nullable_map")]
	pub custom_attributes: BTreeMap<String, Value>,
	/// OpenID identifier.
	#[serde(default)]
	pub openid_name: Option<String>,
	/// Locale code.
	#[serde(default)]
	pub locale_code: Option<String>,
	/// Free-form comment.
	#[serde(default)]
	pub comment: Option<String>,
	/// Free-form notes.
	#[serde(default)]
	pub notes: Option<String>,
	/// Directory the user is synced from.
	#[serde(default)]
	pub directory_id: Option<u64>,
	/// Manager's Active Directory identifier.
	#[serde(default)]
	pub manager_ad_id: Option<String>,
	/// Manager's OneLogin user identifier.
	#[serde(default)]
	pub manager_user_id: Option<u64>,
	/// Trusted IdP the user signs in through.
	#[serde(default)]
	pub trusted_idp_id: Option<u64>,
	/// Failed logins since the last success.
	#[serde(default)]
	pub invalid_login_attempts: Option<u32>,
	/// Creation instant.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last modification instant.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
	/// Activation instant.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub activated_at: Option<OffsetDateTime>,
	/// Last successful login.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub last_login: Option<OffsetDateTime>,
	/// Last password change.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub password_changed_at: Option<OffsetDateTime>,
	/// Last invitation email.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub invitation_sent_at: Option<OffsetDateTime>,
	/// End of the current lock, if locked.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub locked_until: Option<OffsetDateTime>,
}

/// Writable user fields for create and update calls; `None` fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserParams {
	/// Given name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub firstname: Option<String>,
	/// Family name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lastname: Option<String>,
	/// Primary email address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Login name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Company name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub company: Option<String>,
	/// Department name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub department: Option<String>,
	/// Directory the user is synced from.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub directory_id: Option<u64>,
	/// LDAP distinguished name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub distinguished_name: Option<String>,
	/// Identifier in an external directory.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub external_id: Option<String>,
	/// Group the user belongs to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group_id: Option<u64>,
	/// Failed logins since the last success.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub invalid_login_attempts: Option<u32>,
	/// Locale code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub locale_code: Option<String>,
	/// Manager's Active Directory identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub manager_ad_id: Option<String>,
	/// Active Directory group memberships.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub member_of: Option<String>,
	/// Free-form notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// OpenID identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub openid_name: Option<String>,
	/// Phone number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Active Directory login name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub samaccountname: Option<String>,
	/// Job title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Active Directory principal name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub userprincipalname: Option<String>,
}
impl UserParams {
	/// Starts a payload with the fields a new user requires.
	pub fn new(
		firstname: impl Into<String>,
		lastname: impl Into<String>,
		email: impl Into<String>,
		username: impl Into<String>,
	) -> Self {
		Self {
			firstname: Some(firstname.into()),
			lastname: Some(lastname.into()),
			email: Some(email.into()),
			username: Some(username.into()),
			..Default::default()
		}
	}
}

pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn sparse_records_hydrate() {
		let user: User = serde_json::from_value(serde_json::json!({
			"id": 12345,
			"email": "kim@example.com",
			"username": null,
			"role_id": null,
			"custom_attributes": { "employee_no": "A-17", "badge": null },
			"created_at": "2015-11-11T03:36:18.714Z",
			"last_login": null
		}))
		.expect("Sparse user should deserialize.");

		assert_eq!(user.id, 12345);
		assert_eq!(user.username, None);
		assert!(user.role_id.is_empty());
		assert_eq!(user.custom_attributes["employee_no"], "A-17");
		assert_eq!(user.created_at, Some(datetime!(2015-11-11 03:36:18.714 UTC)));
		assert_eq!(user.last_login, None);
	}

	#[test]
	fn params_omit_unset_fields() {
		let params = UserParams {
			title: Some("Engineer".into()),
			..UserParams::new("Kim", "Lee", "kim@example.com", "kim")
		};

		assert_eq!(
			serde_json::to_value(&params).expect("Params should serialize."),
			serde_json::json!({
				"firstname": "Kim",
				"lastname": "Lee",
				"email": "kim@example.com",
				"username": "kim",
				"title": "Engineer"
			})
		);
	}
}
