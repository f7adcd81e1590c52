//! Account-level settings: credentials, region, and the knobs the façade reads on every call.
//!
//! [`Settings`] is always produced through [`SettingsBuilder`] (directly or via
//! [`Settings::from_json`]) so every instance has passed validation.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError, pagination};

/// User-Agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("onelogin-rust-sdk ", env!("CARGO_PKG_VERSION"));

/// OneLogin data-center region hosting the account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
	#[default]
	/// United States shard.
	Us,
	/// European Union shard.
	Eu,
}
impl Region {
	/// Returns the host label used in `api.<region>.onelogin.com`.
	pub const fn as_str(self) -> &'static str {
		match self {
			Region::Us => "us",
			Region::Eu => "eu",
		}
	}
}
impl Display for Region {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Errors raised while validating settings.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum SettingsError {
	/// Client identifier is empty or whitespace.
	#[error("Client identifier cannot be empty.")]
	EmptyClientId,
	/// Client secret is empty or whitespace.
	#[error("Client secret cannot be empty.")]
	EmptyClientSecret,
	/// User agent is empty.
	#[error("User agent cannot be empty.")]
	EmptyUserAgent,
	/// Pagination safety cap must allow at least one page.
	#[error("The max_pages cap must be at least 1.")]
	ZeroPageCap,
	/// Base URL overrides must be able to carry relative paths.
	#[error("The {endpoint} base URL cannot be used as a base: {url}.")]
	UnusableBase {
		/// Which override failed validation.
		endpoint: &'static str,
		/// Offending URL.
		url: String,
	},
}

/// Validated client settings.
#[derive(Clone, Debug)]
pub struct Settings {
	/// OAuth 2.0 client identifier issued by the OneLogin admin console.
	pub client_id: String,
	/// OAuth 2.0 client secret; never logged.
	pub client_secret: TokenSecret,
	/// Account region.
	pub region: Region,
	/// User-Agent header value.
	pub user_agent: String,
	/// Upper bound on pages fetched by a single list call.
	pub max_pages: usize,
	/// Override for `https://api.<region>.onelogin.com/`.
	pub api_base: Option<Url>,
	/// Override for `https://admin.<region>.onelogin.com/`.
	pub admin_base: Option<Url>,
	/// Override for the embedded apps feed URL.
	pub embed_url: Option<Url>,
}
impl Settings {
	/// Creates a new builder for the provided client credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> SettingsBuilder {
		SettingsBuilder::new(client_id, client_secret)
	}

	/// Parses and validates a JSON settings document.
	///
	/// Recognized keys mirror [`SettingsBuilder`]'s fields: `client_id`, `client_secret`,
	/// `region`, `user_agent`, `max_pages`, `api_base`, `admin_base`, `embed_url`.
	pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(raw);
		let builder: SettingsBuilder = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::SettingsParse { source })?;

		Ok(builder.build()?)
	}
}

/// Builder for [`Settings`] values.
#[derive(Clone, Debug, Deserialize)]
pub struct SettingsBuilder {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: String,
	/// Account region; defaults to [`Region::Us`].
	#[serde(default)]
	pub region: Region,
	/// User-Agent override.
	#[serde(default)]
	pub user_agent: Option<String>,
	/// Pagination safety cap override.
	#[serde(default)]
	pub max_pages: Option<usize>,
	/// API host override.
	#[serde(default)]
	pub api_base: Option<Url>,
	/// Admin host override.
	#[serde(default)]
	pub admin_base: Option<Url>,
	/// Embedded apps feed override.
	#[serde(default)]
	pub embed_url: Option<Url>,
}
impl SettingsBuilder {
	/// Creates a new builder seeded with the provided credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			region: Region::default(),
			user_agent: None,
			max_pages: None,
			api_base: None,
			admin_base: None,
			embed_url: None,
		}
	}

	/// Sets the account region.
	pub fn region(mut self, region: Region) -> Self {
		self.region = region;

		self
	}

	/// Overrides the User-Agent header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Overrides the pagination safety cap.
	pub fn max_pages(mut self, max_pages: usize) -> Self {
		self.max_pages = Some(max_pages);

		self
	}

	/// Points API routes at a different host (proxies, mock servers).
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Points admin routes at a different host.
	pub fn admin_base(mut self, url: Url) -> Self {
		self.admin_base = Some(url);

		self
	}

	/// Points the embedded apps feed at a different URL.
	pub fn embed_url(mut self, url: Url) -> Self {
		self.embed_url = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting settings.
	pub fn build(self) -> Result<Settings, SettingsError> {
		let settings = Settings {
			client_id: self.client_id,
			client_secret: TokenSecret::new(self.client_secret),
			region: self.region,
			user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
			max_pages: self.max_pages.unwrap_or(pagination::DEFAULT_MAX_PAGES),
			api_base: self.api_base,
			admin_base: self.admin_base,
			embed_url: self.embed_url,
		};

		settings.validate()?;

		Ok(settings)
	}
}

impl Settings {
	fn validate(&self) -> Result<(), SettingsError> {
		if self.client_id.trim().is_empty() {
			return Err(SettingsError::EmptyClientId);
		}
		if self.client_secret.expose().trim().is_empty() {
			return Err(SettingsError::EmptyClientSecret);
		}
		if self.user_agent.is_empty() {
			return Err(SettingsError::EmptyUserAgent);
		}
		if self.max_pages == 0 {
			return Err(SettingsError::ZeroPageCap);
		}

		validate_base("api", self.api_base.as_ref())?;
		validate_base("admin", self.admin_base.as_ref())?;

		Ok(())
	}
}

fn validate_base(name: &'static str, url: Option<&Url>) -> Result<(), SettingsError> {
	match url {
		Some(url) if url.cannot_be_a_base() =>
			Err(SettingsError::UnusableBase { endpoint: name, url: url.to_string() }),
		_ => Ok(()),
	}
}
