//! Default file-backed [`CredentialStore`]: one JSON file per credential.

// std
use std::{
	fs,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	credential::CredentialKind,
	store::{CredentialStore, EMPTY_BLOB, StoreError, StoreFuture},
};

/// File name used for the access token when no path is configured.
pub const DEFAULT_ACCESS_TOKEN_PATH: &str = "access_token.json";
/// File name used for the jsapi ticket when no path is configured.
pub const DEFAULT_TICKET_PATH: &str = "jsapi_ticket.json";

/// Persists each credential to its own JSON file, overwriting it on every save.
///
/// Reading a file that does not exist first creates it with `{}`, so a fresh working directory
/// never fails a read. The default paths are relative to the process working directory.
#[derive(Clone, Debug)]
pub struct FileStore {
	access_token_path: PathBuf,
	ticket_path: PathBuf,
}
impl FileStore {
	/// Creates a store writing to the provided paths.
	pub fn new(access_token_path: impl Into<PathBuf>, ticket_path: impl Into<PathBuf>) -> Self {
		Self { access_token_path: access_token_path.into(), ticket_path: ticket_path.into() }
	}

	/// Creates a store using the default file names inside `dir`.
	pub fn in_dir(dir: impl AsRef<Path>) -> Self {
		let dir = dir.as_ref();

		Self::new(dir.join(DEFAULT_ACCESS_TOKEN_PATH), dir.join(DEFAULT_TICKET_PATH))
	}

	/// Returns the file backing `kind`.
	pub fn path(&self, kind: CredentialKind) -> &Path {
		match kind {
			CredentialKind::AccessToken => &self.access_token_path,
			CredentialKind::Ticket => &self.ticket_path,
		}
	}

	fn read_now(path: &Path) -> Result<Vec<u8>, StoreError> {
		if !path.exists() {
			Self::write_now(path, EMPTY_BLOB)?;
		}

		fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})
	}

	fn write_now(path: &Path, blob: &[u8]) -> Result<(), StoreError> {
		Self::ensure_parent_exists(path)?;

		fs::write(path, blob).map_err(|e| StoreError::Backend {
			message: format!("Failed to write {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}
}
impl Default for FileStore {
	fn default() -> Self {
		Self::new(DEFAULT_ACCESS_TOKEN_PATH, DEFAULT_TICKET_PATH)
	}
}
impl CredentialStore for FileStore {
	fn save(&self, kind: CredentialKind, blob: Vec<u8>) -> StoreFuture<'_, ()> {
		Box::pin(async move { Self::write_now(self.path(kind), &blob) })
	}

	fn fetch(&self, kind: CredentialKind) -> StoreFuture<'_, Vec<u8>> {
		Box::pin(async move { Self::read_now(self.path(kind)) })
	}
}
