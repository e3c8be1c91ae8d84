//! Storage contracts and built-in store implementations for persisted credential blobs.
//!
//! Stores deal in raw JSON bytes keyed by [`CredentialKind`]; encoding and expiry checks stay in
//! the cache. A store that has never seen a kind is expected to return the `{}` placeholder
//! ([`EMPTY_BLOB`]) so the cache treats it as an expired record and refreshes it.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, credential::CredentialKind};

/// Placeholder blob returned for credentials that were never persisted.
pub const EMPTY_BLOB: &[u8] = b"{}";

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for persisted access tokens and tickets.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Replaces the blob stored for `kind`.
	fn save(&self, kind: CredentialKind, blob: Vec<u8>) -> StoreFuture<'_, ()>;

	/// Reads the blob stored for `kind`.
	fn fetch(&self, kind: CredentialKind) -> StoreFuture<'_, Vec<u8>>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced while encoding a record.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend returned zero bytes for a credential.
	#[error("Store returned an empty {kind} blob.")]
	Empty {
		/// Credential whose blob was empty.
		kind: CredentialKind,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_can_be_serialized() {
		let err = StoreError::Empty { kind: CredentialKind::AccessToken };
		let payload = serde_json::to_string(&err).expect("StoreError should serialize to JSON.");

		assert_eq!(payload, "{\"Empty\":{\"kind\":\"access_token\"}}");
		assert_eq!(err.to_string(), "Store returned an empty access_token blob.");
	}
}
