// crates.io
use quick_xml::de as xml;
// self
use crate::{_prelude::*, error::DecodeError};

/// App assigned to a user, from the user-apps endpoint or the embedded apps feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
	/// App identifier.
	pub id: u64,
	/// Connector the app is built on.
	#[serde(default)]
	pub connector_id: Option<u64>,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Icon URL.
	#[serde(default)]
	pub icon: Option<String>,
	/// Whether the app uses the browser extension.
	#[serde(default)]
	pub extension: Option<bool>,
	/// Whether the browser extension is required.
	#[serde(default)]
	pub extension_required: Option<bool>,
	/// Whether the user is provisioned in the app.
	#[serde(default)]
	pub provisioned: Option<bool>,
	/// Whether the app was added by the user.
	#[serde(default)]
	pub personal: Option<bool>,
	/// Login identifier for the app.
	#[serde(default)]
	pub login_id: Option<u64>,
}

#[derive(Deserialize)]
struct EmbedDocument {
	#[serde(rename = "app", default)]
	apps: Vec<EmbedApp>,
}

#[derive(Deserialize)]
struct EmbedApp {
	id: Option<String>,
	icon: Option<String>,
	name: Option<String>,
	provisioned: Option<String>,
	extension_required: Option<String>,
	personal: Option<String>,
	login_id: Option<String>,
}
impl EmbedApp {
	fn into_app(self) -> Result<App, DecodeError> {
		let id = match self.id.as_deref().map(str::trim) {
			Some(raw) => raw
				.parse()
				.map_err(|_| DecodeError::InvalidField { field: "id", value: raw.to_owned() })?,
			None => return Err(DecodeError::InvalidField { field: "id", value: String::new() }),
		};
		let login_id = match non_blank(self.login_id) {
			Some(raw) => Some(
				raw.parse().map_err(|_| DecodeError::InvalidField { field: "login_id", value: raw })?,
			),
			None => None,
		};

		Ok(App {
			id,
			name: non_blank(self.name),
			icon: non_blank(self.icon),
			provisioned: flag("provisioned", self.provisioned)?,
			extension_required: flag("extension_required", self.extension_required)?,
			personal: flag("personal", self.personal)?,
			login_id,
			..Default::default()
		})
	}
}

/// Parses the embedded apps XML feed (`<apps><app>...</app></apps>`).
///
/// Only the `id`, `icon`, `name`, `provisioned`, `extension_required`, `personal`, and
/// `login_id` children are read; anything else is ignored.
pub fn apps_from_xml(xml: &str) -> Result<Vec<App>, DecodeError> {
	if xml.trim().is_empty() {
		return Ok(Vec::new());
	}

	let document: EmbedDocument =
		xml::from_str(xml).map_err(|source| DecodeError::Xml { source })?;

	document.apps.into_iter().map(EmbedApp::into_app).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn flag(field: &'static str, value: Option<String>) -> Result<Option<bool>, DecodeError> {
	match non_blank(value).as_deref() {
		None => Ok(None),
		Some("true" | "1") => Ok(Some(true)),
		Some("false" | "0") => Ok(Some(false)),
		Some(other) => Err(DecodeError::InvalidField { field, value: other.to_owned() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<apps>
  <app>
    <id>390014</id>
    <icon>https://s3.amazonaws.com/onelogin-assets/images/icons/square/box.png</icon>
    <name>Box</name>
    <provisioned>false</provisioned>
    <extension_required>true</extension_required>
    <personal>false</personal>
    <login_id>24511733</login_id>
    <connector_id>ignored</connector_id>
  </app>
  <app>
    <id>390015</id>
    <name>Slack</name>
    <provisioned>1</provisioned>
    <login_id></login_id>
  </app>
</apps>"#;

	#[test]
	fn feed_is_parsed() {
		let apps = apps_from_xml(FEED).expect("Feed should parse.");

		assert_eq!(apps.len(), 2);
		assert_eq!(apps[0].id, 390014);
		assert_eq!(apps[0].name.as_deref(), Some("Box"));
		assert_eq!(apps[0].extension_required, Some(true));
		assert_eq!(apps[0].login_id, Some(24511733));
		assert_eq!(apps[1].provisioned, Some(true));
		assert_eq!(apps[1].icon, None);
		assert_eq!(apps[1].login_id, None);
	}

	#[test]
	fn empty_and_malformed_feeds() {
		assert!(apps_from_xml("  ").expect("Blank feed is empty.").is_empty());
		assert!(apps_from_xml("<apps/>").expect("Feed without apps is empty.").is_empty());
		assert!(matches!(
			apps_from_xml("<apps><app><id>abc</id></app></apps>"),
			Err(DecodeError::InvalidField { field: "id", .. })
		));
	}
}
