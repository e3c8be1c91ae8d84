//! Application credentials and platform endpoints consumed by the cache.
//!
//! The module exposes a validated [`JssdkConfig`] plus its builder so callers can point the SDK
//! at mock servers or regional gateways without touching the cache code.

/// Builder API for assembling configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, credential::TokenSecret};

/// Production access token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://api.weixin.qq.com/cgi-bin/token";
/// Production jsapi ticket endpoint.
pub const DEFAULT_TICKET_ENDPOINT: &str = "https://api.weixin.qq.com/cgi-bin/ticket/getticket";

/// Endpoint set used to mint credentials. Query strings are appended per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Access token endpoint (`grant_type=client_credential`).
	pub token: Url,
	/// jsapi ticket endpoint (`type=jsapi`).
	pub ticket: Url,
}

/// Immutable configuration consumed by [`CredentialCache`](crate::cache::CredentialCache).
#[derive(Clone, Debug)]
pub struct JssdkConfig {
	/// Application identifier, echoed back in every signature package.
	pub app_id: String,
	/// Application secret; redacted from `Debug` output.
	pub app_secret: TokenSecret,
	/// Endpoint definitions.
	pub endpoints: Endpoints,
}
impl JssdkConfig {
	/// Creates a new builder for the provided application credentials.
	pub fn builder(
		app_id: impl Into<String>,
		app_secret: impl Into<String>,
	) -> JssdkConfigBuilder {
		JssdkConfigBuilder::new(app_id, app_secret)
	}

	/// Builds the access token request URL.
	pub fn access_token_url(&self) -> Url {
		let mut url = self.endpoints.token.clone();

		url.query_pairs_mut()
			.append_pair("grant_type", "client_credential")
			.append_pair("appid", &self.app_id)
			.append_pair("secret", self.app_secret.expose());

		url
	}

	/// Builds the jsapi ticket request URL for the provided access token.
	pub fn ticket_url(&self, access_token: &TokenSecret) -> Url {
		let mut url = self.endpoints.ticket.clone();

		url.query_pairs_mut()
			.append_pair("type", "jsapi")
			.append_pair("access_token", access_token.expose());

		url
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_urls_carry_platform_parameters() {
		let config = JssdkConfig::builder("wx123", "sec456")
			.build()
			.expect("Default configuration should build.");

		assert_eq!(
			config.access_token_url().as_str(),
			"https://api.weixin.qq.com/cgi-bin/token?grant_type=client_credential&appid=wx123&secret=sec456",
		);
		assert_eq!(
			config.ticket_url(&TokenSecret::new("TOK1")).as_str(),
			"https://api.weixin.qq.com/cgi-bin/ticket/getticket?type=jsapi&access_token=TOK1",
		);
	}

	#[test]
	fn debug_output_redacts_secret() {
		let config = JssdkConfig::builder("wx123", "sec456")
			.build()
			.expect("Default configuration should build.");

		assert!(!format!("{config:?}").contains("sec456"));
	}
}
