//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	credential::CredentialKind,
	store::{CredentialStore, EMPTY_BLOB, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<CredentialKind, Vec<u8>>>>;

/// Storage backend that keeps blobs in-process; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Seeds the blob for `kind`, replacing any previous value.
	pub fn insert(&self, kind: CredentialKind, blob: impl Into<Vec<u8>>) {
		self.0.write().insert(kind, blob.into());
	}

	/// Returns the blob currently stored for `kind`, if any.
	pub fn get(&self, kind: CredentialKind) -> Option<Vec<u8>> {
		self.0.read().get(&kind).cloned()
	}

	fn save_now(map: StoreMap, kind: CredentialKind, blob: Vec<u8>) -> Result<(), StoreError> {
		map.write().insert(kind, blob);

		Ok(())
	}

	fn fetch_now(map: StoreMap, kind: CredentialKind) -> Vec<u8> {
		map.write().entry(kind).or_insert_with(|| EMPTY_BLOB.to_vec()).clone()
	}
}
impl CredentialStore for MemoryStore {
	fn save(&self, kind: CredentialKind, blob: Vec<u8>) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::save_now(map, kind, blob) })
	}

	fn fetch(&self, kind: CredentialKind) -> StoreFuture<'_, Vec<u8>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::fetch_now(map, kind)) })
	}
}
