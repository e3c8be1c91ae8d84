// self
use crate::{
	_prelude::*,
	config::{DEFAULT_TICKET_ENDPOINT, DEFAULT_TOKEN_ENDPOINT, Endpoints, JssdkConfig},
	credential::TokenSecret,
	error::ConfigError,
};

/// Builder for [`JssdkConfig`] values.
#[derive(Debug)]
pub struct JssdkConfigBuilder {
	/// Application identifier.
	pub app_id: String,
	/// Application secret.
	pub app_secret: TokenSecret,
	/// Optional access token endpoint override.
	pub token_endpoint: Option<Url>,
	/// Optional jsapi ticket endpoint override.
	pub ticket_endpoint: Option<Url>,
}
impl JssdkConfigBuilder {
	/// Creates a new builder seeded with the provided application credentials.
	pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
		Self {
			app_id: app_id.into(),
			app_secret: TokenSecret::new(app_secret),
			token_endpoint: None,
			ticket_endpoint: None,
		}
	}

	/// Overrides the access token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Overrides the jsapi ticket endpoint.
	pub fn ticket_endpoint(mut self, url: Url) -> Self {
		self.ticket_endpoint = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<JssdkConfig, ConfigError> {
		if self.app_id.trim().is_empty() {
			return Err(ConfigError::MissingAppId);
		}
		if self.app_secret.is_empty() {
			return Err(ConfigError::MissingAppSecret);
		}

		let token = resolve_endpoint("token", self.token_endpoint, DEFAULT_TOKEN_ENDPOINT)?;
		let ticket = resolve_endpoint("ticket", self.ticket_endpoint, DEFAULT_TICKET_ENDPOINT)?;

		Ok(JssdkConfig {
			app_id: self.app_id,
			app_secret: self.app_secret,
			endpoints: Endpoints { token, ticket },
		})
	}
}

fn resolve_endpoint(
	name: &'static str,
	custom: Option<Url>,
	default: &str,
) -> Result<Url, ConfigError> {
	let url = match custom {
		Some(url) => url,
		None => Url::parse(default)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: name, source })?,
	};

	match url.scheme() {
		"http" | "https" => Ok(url),
		_ => Err(ConfigError::UnsupportedEndpoint { endpoint: name, url: url.to_string() }),
	}
}
