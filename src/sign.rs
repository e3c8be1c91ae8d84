//! JS-SDK URL signing: nonce generation, the canonical string to sign, and the SHA-1 package.
//!
//! The string to sign concatenates `jsapi_ticket`, `noncestr`, `timestamp`, and `url` in
//! ASCII-ascending key order. The platform recomputes the same string, so the order and the
//! absence of any URL encoding are part of the protocol.

// crates.io
use rand::{Rng, distr::Alphanumeric};
use sha1::{Digest, Sha1};
// self
use crate::{
	_prelude::*,
	cache::CredentialCache,
	credential::record::unix_now,
	http::CredentialHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Length of the nonce embedded in every signature package.
pub const NONCE_LEN: usize = 16;

/// Fields a browser-side caller passes to `wx.config`.
///
/// Fields are declared in key order so the JSON form lists them alphabetically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePackage {
	/// Application identifier.
	pub app_id: String,
	/// Random nonce included in the signed string.
	pub nonce_str: String,
	/// Exact string that was hashed, for debugging and verification.
	pub raw_string: String,
	/// Lowercase hex SHA-1 digest of `raw_string`.
	pub signature: String,
	/// Unix timestamp (seconds) included in the signed string.
	pub timestamp: String,
	/// Page URL that was signed.
	pub url: String,
}
impl SignaturePackage {
	/// Signs `url` with the provided ticket, nonce, and timestamp.
	pub fn new(
		app_id: impl Into<String>,
		ticket: &str,
		nonce_str: impl Into<String>,
		timestamp: i64,
		url: impl Into<String>,
	) -> Self {
		let nonce_str = nonce_str.into();
		let url = url.into();
		let raw_string = string_to_sign(ticket, &nonce_str, timestamp, &url);
		let signature = digest(&raw_string);

		Self {
			app_id: app_id.into(),
			nonce_str,
			raw_string,
			signature,
			timestamp: timestamp.to_string(),
			url,
		}
	}

	/// Serializes the package into its JSON object form.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}

/// Builds signature packages using tickets from a shared [`CredentialCache`].
pub struct Signer<C>
where
	C: ?Sized + CredentialHttpClient,
{
	cache: Arc<CredentialCache<C>>,
}
impl<C> Signer<C>
where
	C: ?Sized + CredentialHttpClient,
{
	/// Creates a signer backed by `cache`.
	pub fn new(cache: Arc<CredentialCache<C>>) -> Self {
		Self { cache }
	}

	/// Returns the cache supplying tickets.
	pub fn cache(&self) -> &Arc<CredentialCache<C>> {
		&self.cache
	}

	/// Ensures a valid ticket, then signs `url` with a fresh nonce and the current timestamp.
	///
	/// Fails with [`Error::Storage`] when a credential refreshed for this call could not be
	/// persisted. The refreshed records stay held in memory.
	pub async fn build_signature(&self, url: &str) -> Result<SignaturePackage> {
		const KIND: FlowKind = FlowKind::Signature;

		let span = FlowSpan::new(KIND, "build_signature");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result: Result<SignaturePackage> = span
			.instrument(async move {
				let lookup = self.cache.ticket().await?;

				if let Some(e) = lookup.persist_error {
					return Err(Error::Storage(e));
				}

				let ticket = lookup.record;

				Ok(SignaturePackage::new(
					self.cache.config().app_id.as_str(),
					ticket.ticket.expose(),
					nonce(NONCE_LEN),
					unix_now(),
					url,
				))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
impl<C> Debug for Signer<C>
where
	C: ?Sized + CredentialHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Signer").field("cache", &self.cache).finish()
	}
}

/// Generates `len` random characters from `[0-9a-zA-Z]`.
pub fn nonce(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

/// Builds the canonical string the platform expects to be signed.
pub fn string_to_sign(ticket: &str, nonce_str: &str, timestamp: i64, url: &str) -> String {
	format!("jsapi_ticket={ticket}&noncestr={nonce_str}&timestamp={timestamp}&url={url}")
}

/// Returns the lowercase hex SHA-1 digest of `raw`.
pub fn digest(raw: &str) -> String {
	let mut hasher = Sha1::new();

	hasher.update(raw.as_bytes());

	hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		config::JssdkConfig,
		credential::CredentialKind,
		error::TransportError,
		http::{HttpFuture, HttpResponse},
		store::{CredentialStore, MemoryStore, StoreError, StoreFuture},
	};

	struct PlatformStub;
	impl CredentialHttpClient for PlatformStub {
		fn get<'a>(&'a self, url: &'a Url) -> HttpFuture<'a> {
			let body = match url.path() {
				"/cgi-bin/token" => "{\"access_token\":\"TOK1\",\"expires_in\":7200}",
				_ => "{\"errcode\":0,\"errmsg\":\"ok\",\"ticket\":\"T1\",\"expires_in\":7200}",
			};

			Box::pin(async move { Ok::<_, TransportError>(HttpResponse::new(200, body)) })
		}
	}

	#[derive(Default)]
	struct ReadOnlyStore(MemoryStore);
	impl CredentialStore for ReadOnlyStore {
		fn save(&self, _kind: CredentialKind, _blob: Vec<u8>) -> StoreFuture<'_, ()> {
			Box::pin(async {
				Err::<(), _>(StoreError::Backend { message: "read-only filesystem".into() })
			})
		}

		fn fetch(&self, kind: CredentialKind) -> StoreFuture<'_, Vec<u8>> {
			self.0.fetch(kind)
		}
	}

	fn signer_with(store: Arc<dyn CredentialStore>) -> Signer<PlatformStub> {
		let config =
			JssdkConfig::builder("wx123", "sec456").build().expect("Fixture config should build.");

		Signer::new(Arc::new(CredentialCache::<PlatformStub>::new(config, store, PlatformStub)))
	}

	const TICKET: &str =
		"sM4AOVdWfPE4DxkXGEs8VMCPGGVi4C3VM0P37wVUCFvkVAy_90u5h9nbSlYy3-Sl-HhTdfl2fzFy1AOcHKP7qg";
	const NONCE: &str = "Wm3WZYTPz0wzccnW";
	const PAGE_URL: &str = "http://mp.weixin.qq.com?params=value";

	fn package(url: &str) -> SignaturePackage {
		SignaturePackage::new("wx123", "T1", "abcdefghijklmnop", 1_700_000_000, url)
	}

	#[test]
	fn string_to_sign_keeps_protocol_order() {
		let raw = string_to_sign(TICKET, NONCE, 1414587457, PAGE_URL);

		assert_eq!(
			raw,
			format!("jsapi_ticket={TICKET}&noncestr={NONCE}&timestamp=1414587457&url={PAGE_URL}"),
		);
	}

	#[test]
	fn digest_matches_published_example() {
		let raw = string_to_sign(TICKET, NONCE, 1414587457, PAGE_URL);

		assert_eq!(digest(&raw), "0f9de62fce790f9a083d5c99e95740ceb90c27ed");
	}

	#[test]
	fn digest_is_lowercase_hex_of_sha1() {
		assert_eq!(digest("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
		assert_eq!(digest(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
	}

	#[test]
	fn different_urls_yield_different_signatures() {
		let first = package("https://a.example/");
		let second = package("https://b.example/");

		assert_ne!(first.signature, second.signature);
		assert_eq!(first.signature.len(), 40);
	}

	#[test]
	fn nonce_draws_sixteen_alphanumerics() {
		for _ in 0..1_000 {
			let value = nonce(NONCE_LEN);

			assert_eq!(value.len(), 16);
			assert!(value.bytes().all(|b| b.is_ascii_alphanumeric()));
		}
	}

	#[test]
	fn package_serializes_with_sorted_camel_case_keys() {
		let package = package("https://a.example/");
		let json = package.to_json().expect("Signature package should serialize.");
		let expected = format!(
			concat!(
				"{{\"appId\":\"wx123\",\"nonceStr\":\"abcdefghijklmnop\",\"rawString\":\"{}\",",
				"\"signature\":\"{}\",\"timestamp\":\"1700000000\",\"url\":\"https://a.example/\"}}",
			),
			package.raw_string, package.signature,
		);

		assert_eq!(json, expected);
	}

	#[tokio::test]
	async fn signing_fails_when_refreshed_ticket_is_not_saved() {
		let signer = signer_with(Arc::new(ReadOnlyStore::default()));
		let err = signer
			.build_signature("https://example.com/")
			.await
			.expect_err("Unsaved credentials should fail the signature.");

		assert!(matches!(err, Error::Storage(StoreError::Backend { .. })));
		assert_eq!(
			signer.cache().held_ticket().map(|record| record.ticket.expose().to_owned()),
			Some("T1".to_owned()),
		);
	}

	#[tokio::test]
	async fn signing_uses_refreshed_ticket_once_saved() {
		let store = MemoryStore::default();
		let signer = signer_with(Arc::new(store.clone()));
		let package = signer
			.build_signature("https://example.com/")
			.await
			.expect("Refreshed and saved ticket should sign.");

		assert!(package.raw_string.starts_with("jsapi_ticket=T1&noncestr="));
		assert_eq!(package.signature, digest(&package.raw_string));
		assert!(store.get(CredentialKind::Ticket).is_some_and(|blob| blob != b"{}"));
	}
}
