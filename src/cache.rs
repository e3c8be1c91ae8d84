//! Credential cache: load from the store, reuse while valid, refresh and persist otherwise.
//!
//! Every lookup re-reads the store, so several processes sharing one [`FileStore`] observe each
//! other's refreshes. A per-kind guard serializes load/refresh/persist inside one cache so
//! concurrent callers piggy-back on the same refresh instead of stampeding the platform.
//!
//! [`FileStore`]: crate::store::FileStore

mod remote;

// self
use crate::{
	_prelude::*,
	config::JssdkConfig,
	credential::{AccessTokenRecord, Credential, TicketRecord, TokenSecret, record::unix_now},
	http::CredentialHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::{CredentialStore, StoreError},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Cache specialized for the crate's default reqwest transport.
pub type ReqwestCredentialCache = CredentialCache<ReqwestHttpClient>;

/// Result of a credential lookup.
///
/// Cache hits and refreshes look the same to callers. When a refreshed record could not be
/// persisted, the record is still returned and the store failure travels alongside it.
#[derive(Clone, Debug)]
pub struct CredentialLookup<R> {
	/// Valid credential record.
	pub record: R,
	/// Store failure raised while persisting a freshly fetched record.
	///
	/// For a ticket refresh this also reports a failure to persist the access token fetched on
	/// the way, when the ticket itself was saved.
	pub persist_error: Option<StoreError>,
}
impl<R> CredentialLookup<R> {
	/// Returns the record, discarding any persist failure.
	pub fn into_record(self) -> R {
		self.record
	}

	/// Returns `true` unless persisting a refreshed record failed.
	pub fn is_persisted(&self) -> bool {
		self.persist_error.is_none()
	}
}

struct Slot<R> {
	held: Mutex<Option<R>>,
	guard: AsyncMutex<()>,
}
impl<R> Slot<R>
where
	R: Credential,
{
	fn held(&self) -> Option<R> {
		self.held.lock().clone()
	}

	fn hold(&self, record: &R) {
		// Placeholder records carry no secret and must not count as held.
		if !record.secret().is_empty() {
			*self.held.lock() = Some(record.clone());
		}
	}
}
impl<R> Default for Slot<R> {
	fn default() -> Self {
		Self { held: Mutex::new(None), guard: AsyncMutex::new(()) }
	}
}

/// Holds the access token and jsapi ticket for one application.
pub struct CredentialCache<C>
where
	C: ?Sized + CredentialHttpClient,
{
	config: JssdkConfig,
	store: Arc<dyn CredentialStore>,
	http_client: Arc<C>,
	access_token: Slot<AccessTokenRecord>,
	ticket: Slot<TicketRecord>,
}
impl<C> CredentialCache<C>
where
	C: ?Sized + CredentialHttpClient,
{
	/// Creates a cache that reuses the caller-provided store and transport.
	pub fn new(
		config: JssdkConfig,
		store: Arc<dyn CredentialStore>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			config,
			store,
			http_client: http_client.into(),
			access_token: Slot::default(),
			ticket: Slot::default(),
		}
	}

	/// Returns the configuration the cache was built with.
	pub fn config(&self) -> &JssdkConfig {
		&self.config
	}

	/// Returns the in-memory access token from the last successful load, if any.
	pub fn held_access_token(&self) -> Option<AccessTokenRecord> {
		self.access_token.held()
	}

	/// Returns the in-memory ticket from the last successful load, if any.
	pub fn held_ticket(&self) -> Option<TicketRecord> {
		self.ticket.held()
	}

	/// Returns a valid access token, fetching and persisting a new one when the stored one
	/// expired.
	///
	/// A store read failure or malformed blob is returned as-is; the platform is not contacted.
	pub async fn access_token(&self) -> Result<CredentialLookup<AccessTokenRecord>> {
		self.lookup(&self.access_token, || async move {
			self.fetch_remote(self.config.access_token_url()).await.map(|token| (token, None))
		})
		.await
	}

	/// Returns a valid jsapi ticket, fetching and persisting a new one when the stored one
	/// expired.
	///
	/// Refreshing requires an access token. If that lookup fails while an earlier token is still
	/// held in memory, the held token is used; otherwise the failure propagates.
	pub async fn ticket(&self) -> Result<CredentialLookup<TicketRecord>> {
		self.lookup(&self.ticket, || async move {
			let (access_token, token_persist_error) = self.access_token_for_ticket().await?;

			self.fetch_remote(self.config.ticket_url(&access_token))
				.await
				.map(|ticket| (ticket, token_persist_error))
		})
		.await
	}

	async fn access_token_for_ticket(&self) -> Result<(TokenSecret, Option<StoreError>)> {
		match self.access_token().await {
			Ok(lookup) => Ok((lookup.record.access_token, lookup.persist_error)),
			Err(e) => match self.held_access_token() {
				Some(stale) => {
					obs::warn_stale_access_token(&e);

					Ok((stale.access_token, None))
				},
				None => Err(e),
			},
		}
	}

	async fn lookup<R, F, Fut>(&self, slot: &Slot<R>, refresh: F) -> Result<CredentialLookup<R>>
	where
		R: Credential,
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<(R, Option<StoreError>)>>,
	{
		let kind = FlowKind::from(R::KIND);
		let span = FlowSpan::new(kind, "lookup");

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);

		let result: Result<(CredentialLookup<R>, FlowOutcome)> = span
			.instrument(async move {
				let _singleflight = slot.guard.lock().await;
				let blob = <dyn CredentialStore>::fetch(self.store.as_ref(), R::KIND).await?;
				let cached = remote::decode_cached::<R>(&blob)?;

				slot.hold(&cached);

				if cached.is_valid_at(unix_now()) {
					let lookup = CredentialLookup { record: cached, persist_error: None };

					return Ok((lookup, FlowOutcome::Hit));
				}

				let (mut fresh, dependency_persist_error) = refresh().await?;

				fresh.stamp_fetched_at(unix_now());
				slot.hold(&fresh);

				let persist_error = self.persist(&fresh).await.err();

				if let Some(e) = &persist_error {
					obs::warn_persist_failure(R::KIND, e);
				}

				let persist_error = persist_error.or(dependency_persist_error);

				Ok((CredentialLookup { record: fresh, persist_error }, FlowOutcome::Refreshed))
			})
			.await;

		match &result {
			Ok((_, outcome)) => obs::record_flow_outcome(kind, *outcome),
			Err(_) => obs::record_flow_outcome(kind, FlowOutcome::Failure),
		}

		result.map(|(lookup, _)| lookup)
	}

	async fn fetch_remote<R>(&self, url: Url) -> Result<R>
	where
		R: Credential,
	{
		let response = self.http_client.get(&url).await?;

		remote::decode_response(response)
	}

	async fn persist<R>(&self, record: &R) -> Result<(), StoreError>
	where
		R: Credential,
	{
		let blob = remote::encode_record(record)?;

		<dyn CredentialStore>::save(self.store.as_ref(), R::KIND, blob).await
	}
}
impl<C> Debug for CredentialCache<C>
where
	C: ?Sized + CredentialHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialCache")
			.field("config", &self.config)
			.field("access_token_held", &self.access_token.held.lock().is_some())
			.field("ticket_held", &self.ticket.held.lock().is_some())
			.finish()
	}
}
