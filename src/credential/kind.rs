//! Credential kind labels shared by stores, caches, and observability.

// self
use crate::_prelude::*;

/// The two credentials maintained for the JS-SDK signing API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
	/// Platform access token minted from the app id + secret.
	AccessToken,
	/// jsapi ticket derived from a valid access token.
	Ticket,
}
impl CredentialKind {
	/// Returns a stable label suitable for storage keys, span fields, and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialKind::AccessToken => "access_token",
			CredentialKind::Ticket => "jsapi_ticket",
		}
	}
}
impl Display for CredentialKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
