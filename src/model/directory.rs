// self
use crate::_prelude::*;

/// Role record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	/// Role identifier.
	pub id: u64,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
}

/// Group record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
	/// Group identifier.
	pub id: u64,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// External reference.
	#[serde(default)]
	pub reference: Option<String>,
}
