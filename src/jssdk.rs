//! Public entry point wiring configuration, storage, transport, cache, and signer together.

// self
use crate::{
	_prelude::*,
	cache::CredentialCache,
	config::JssdkConfig,
	http::CredentialHttpClient,
	sign::{SignaturePackage, Signer},
	store::{CredentialStore, FileStore},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// SDK specialized for the crate's default reqwest transport.
pub type ReqwestJssdk = Jssdk<ReqwestHttpClient>;

/// Signs JS-SDK page URLs for one application.
///
/// When no store is supplied, credentials are kept in `access_token.json` and
/// `jsapi_ticket.json` inside the process working directory ([`FileStore::default`]).
pub struct Jssdk<C>
where
	C: ?Sized + CredentialHttpClient,
{
	signer: Signer<C>,
}
impl<C> Jssdk<C>
where
	C: ?Sized + CredentialHttpClient,
{
	/// Creates an SDK that reuses the caller-provided transport.
	pub fn with_http_client(
		config: JssdkConfig,
		store: Option<Arc<dyn CredentialStore>>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let store =
			store.unwrap_or_else(|| Arc::new(FileStore::default()) as Arc<dyn CredentialStore>);
		let cache = Arc::new(CredentialCache::new(config, store, http_client));

		Self { signer: Signer::new(cache) }
	}

	/// Returns the credential cache shared with the signer.
	pub fn cache(&self) -> &Arc<CredentialCache<C>> {
		self.signer.cache()
	}

	/// Returns the signer.
	pub fn signer(&self) -> &Signer<C> {
		&self.signer
	}

	/// Builds a typed signature package for `url`.
	pub async fn build_signature(&self, url: &str) -> Result<SignaturePackage> {
		self.signer.build_signature(url).await
	}

	/// Builds the signature package for `url` and returns its JSON form.
	pub async fn sign_package(&self, url: &str) -> Result<String> {
		self.build_signature(url).await?.to_json()
	}
}
#[cfg(feature = "reqwest")]
impl Jssdk<ReqwestHttpClient> {
	/// Creates an SDK for the provided application credentials against the production endpoints.
	///
	/// The SDK provisions its own reqwest transport; pass `None` to use the default file store.
	pub fn new(
		app_id: impl Into<String>,
		app_secret: impl Into<String>,
		store: Option<Arc<dyn CredentialStore>>,
	) -> Result<Self> {
		let config = JssdkConfig::builder(app_id, app_secret).build()?;

		Ok(Self::from_config(config, store))
	}

	/// Creates an SDK from a prepared configuration with a default reqwest transport.
	pub fn from_config(config: JssdkConfig, store: Option<Arc<dyn CredentialStore>>) -> Self {
		Self::with_http_client(config, store, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Jssdk<C>
where
	C: ?Sized + CredentialHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Jssdk").field("signer", &self.signer).finish()
	}
}
