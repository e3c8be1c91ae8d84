//! Transport primitives for credential requests.
//!
//! The platform's token and ticket endpoints are plain `GET` requests answering with JSON, so the
//! SDK's only dependency on an HTTP stack is [`CredentialHttpClient::get`]. Callers provide an
//! implementation (typically the bundled [`ReqwestHttpClient`]) and the cache interprets the
//! returned [`HttpResponse`]. No timeout or retry is layered on top.

// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`CredentialHttpClient::get`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Raw response captured from a credential endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Builds a response from its parts.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports able to issue credential requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared across caches
/// without additional wrappers.
pub trait CredentialHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a `GET` request and returns the status and body, whatever the status.
	fn get<'a>(&'a self, url: &'a Url) -> HttpFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl CredentialHttpClient for ReqwestHttpClient {
	fn get<'a>(&'a self, url: &'a Url) -> HttpFuture<'a> {
		Box::pin(async move {
			let response = self.0.get(url.clone()).send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_only_2xx() {
		assert!(HttpResponse::new(200, "{}").is_success());
		assert!(HttpResponse::new(204, Vec::new()).is_success());
		assert!(!HttpResponse::new(302, Vec::new()).is_success());
		assert!(!HttpResponse::new(500, "oops").is_success());
	}
}
