//! Cached credential records and the expiry rules shared by both kinds.
//!
//! Records are persisted in the platform's own field layout (`access_token`/`ticket`,
//! `expires_in`) plus the locally computed `expire_time` unix timestamp. Every field defaults,
//! so the `{}` placeholder written by [`FileStore`](crate::store::FileStore) decodes into an
//! expired record instead of failing.

// self
use crate::{
	_prelude::*,
	credential::{CredentialKind, TokenSecret},
};

/// Lifetime, in seconds, stamped onto every freshly fetched credential.
///
/// The platform declares `expires_in = 7200`; the cache stops using a credential
/// [`EXPIRY_MARGIN_SECS`] earlier. The server-declared `expires_in` is stored but not consulted,
/// so a shorter server lifetime would be over-trusted.
pub const CREDENTIAL_LIFETIME_SECS: i64 = 7_000;
/// Seconds shaved off the platform's 7200-second lifetime.
pub const EXPIRY_MARGIN_SECS: i64 = 200;

/// Current unix timestamp in seconds.
pub(crate) fn unix_now() -> i64 {
	OffsetDateTime::now_utc().unix_timestamp()
}

/// Lifecycle status for a cached credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
	/// `expire_time` lies in the future.
	Valid,
	/// `expire_time` has been reached (or was never set).
	Expired,
}

/// Behavior shared by [`AccessTokenRecord`] and [`TicketRecord`] so the cache can drive both
/// through one load/refresh/persist path.
pub trait Credential
where
	Self: 'static + Clone + Debug + Default + Send + Sync + Serialize + DeserializeOwned,
{
	/// Storage key and observability label for this record type.
	const KIND: CredentialKind;

	/// Secret value callers attach to downstream requests.
	fn secret(&self) -> &TokenSecret;

	/// Absolute unix timestamp after which the record must be refreshed.
	fn expire_time(&self) -> i64;

	/// Overrides the absolute expiry timestamp.
	fn set_expire_time(&mut self, unix_seconds: i64);

	/// Computes the lifecycle status at the provided unix timestamp.
	fn status_at(&self, now: i64) -> CredentialStatus {
		if self.expire_time() > now { CredentialStatus::Valid } else { CredentialStatus::Expired }
	}

	/// Returns `true` if the record may still be used at `now`.
	fn is_valid_at(&self, now: i64) -> bool {
		matches!(self.status_at(now), CredentialStatus::Valid)
	}

	/// Stamps the expiry for a record fetched at `now`.
	fn stamp_fetched_at(&mut self, now: i64) {
		self.set_expire_time(now + CREDENTIAL_LIFETIME_SECS);
	}
}

/// Access token issued by the platform's `cgi-bin/token` endpoint.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessTokenRecord {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Server-declared lifetime in seconds.
	pub expires_in: i64,
	/// Absolute unix expiry computed locally when the token was fetched.
	pub expire_time: i64,
}
impl AccessTokenRecord {
	/// Creates a record from its raw parts.
	pub fn new(access_token: impl Into<String>, expires_in: i64, expire_time: i64) -> Self {
		Self { access_token: TokenSecret::new(access_token), expires_in, expire_time }
	}
}
impl Credential for AccessTokenRecord {
	const KIND: CredentialKind = CredentialKind::AccessToken;

	fn secret(&self) -> &TokenSecret {
		&self.access_token
	}

	fn expire_time(&self) -> i64 {
		self.expire_time
	}

	fn set_expire_time(&mut self, unix_seconds: i64) {
		self.expire_time = unix_seconds;
	}
}
impl Debug for AccessTokenRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessTokenRecord")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.field("expire_time", &self.expire_time)
			.finish()
	}
}

/// jsapi ticket issued by the platform's `cgi-bin/ticket/getticket` endpoint.
///
/// The platform names the field `ticket` (not `jsapi_ticket`), and so does the persisted form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketRecord {
	/// Ticket secret used when signing URLs.
	pub ticket: TokenSecret,
	/// Server-declared lifetime in seconds.
	pub expires_in: i64,
	/// Absolute unix expiry computed locally when the ticket was fetched.
	pub expire_time: i64,
}
impl TicketRecord {
	/// Creates a record from its raw parts.
	pub fn new(ticket: impl Into<String>, expires_in: i64, expire_time: i64) -> Self {
		Self { ticket: TokenSecret::new(ticket), expires_in, expire_time }
	}
}
impl Credential for TicketRecord {
	const KIND: CredentialKind = CredentialKind::Ticket;

	fn secret(&self) -> &TokenSecret {
		&self.ticket
	}

	fn expire_time(&self) -> i64 {
		self.expire_time
	}

	fn set_expire_time(&mut self, unix_seconds: i64) {
		self.expire_time = unix_seconds;
	}
}
impl Debug for TicketRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TicketRecord")
			.field("ticket", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.field("expire_time", &self.expire_time)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn status_flips_at_expire_time() {
		let expire = macros::datetime!(2025-01-01 02:00 UTC).unix_timestamp();
		let record = TicketRecord::new("T1", 7200, expire);

		assert_eq!(record.status_at(expire - 1), CredentialStatus::Valid);
		assert_eq!(record.status_at(expire), CredentialStatus::Expired);
		assert!(!record.is_valid_at(expire + 1));
	}

	#[test]
	fn empty_object_decodes_into_expired_record() {
		let record: AccessTokenRecord =
			serde_json::from_str("{}").expect("Empty object should decode into a default record.");

		assert!(record.access_token.is_empty());
		assert_eq!(record.expire_time, 0);
		assert!(!record.is_valid_at(0));
	}

	#[test]
	fn stamp_ignores_server_declared_lifetime() {
		let now = macros::datetime!(2025-01-01 00:00 UTC).unix_timestamp();
		let mut record = AccessTokenRecord::new("TOK1", 1800, 0);

		record.stamp_fetched_at(now);

		assert_eq!(record.expire_time, now + 7000);
		assert_eq!(CREDENTIAL_LIFETIME_SECS + EXPIRY_MARGIN_SECS, 7200);
	}

	#[test]
	fn persisted_layout_matches_platform_fields() {
		let record = AccessTokenRecord::new("TOK1", 7200, 1_700_007_000);
		let payload = serde_json::to_string(&record).expect("Record should serialize to JSON.");

		assert_eq!(
			payload,
			"{\"access_token\":\"TOK1\",\"expires_in\":7200,\"expire_time\":1700007000}"
		);

		let ticket: TicketRecord =
			serde_json::from_str("{\"ticket\":\"T1\",\"expires_in\":7200,\"expire_time\":42}")
				.expect("Ticket payload should decode.");

		assert_eq!(ticket, TicketRecord::new("T1", 7200, 42));
		assert!(!format!("{ticket:?}").contains("T1"));
	}
}
