// self
use crate::{_prelude::*, auth::TokenSecret};

/// `Authorization` header forms the API accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authorization {
	/// `bearer:<token>`, used by every authenticated call.
	Bearer(TokenSecret),
	/// `client_id:<id>, client_secret:<secret>`, used to mint and revoke tokens.
	Client {
		/// OAuth 2.0 client identifier.
		client_id: String,
		/// OAuth 2.0 client secret.
		client_secret: TokenSecret,
	},
	/// No header at all.
	None,
}
impl Authorization {
	/// Renders the header value, or `None` for [`Authorization::None`].
	pub fn header_value(&self) -> Option<String> {
		match self {
			Self::Bearer(token) => Some(format!("bearer:{}", token.expose())),
			Self::Client { client_id, client_secret } =>
				Some(format!("client_id:{client_id}, client_secret:{}", client_secret.expose())),
			Self::None => None,
		}
	}
}
