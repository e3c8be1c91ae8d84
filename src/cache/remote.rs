//! Response decoding for the platform's credential endpoints.

// self
use crate::{
	_prelude::*,
	credential::Credential,
	error::{ParseError, TransportError},
	http::HttpResponse,
	store::StoreError,
};

/// Error envelope the platform includes in every JSON answer (`errcode = 0` on success).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlatformStatus {
	errcode: i64,
	errmsg: String,
}

/// Turns a raw endpoint response into a credential record with its expiry still unset.
pub(crate) fn decode_response<R>(response: HttpResponse) -> Result<R>
where
	R: Credential,
{
	if !response.is_success() {
		return Err(TransportError::Status { status: response.status }.into());
	}

	// Bodies that are not even an object fall through to the typed decode below, which reports
	// the failing path.
	if let Some(status) = serde_json::from_slice::<PlatformStatus>(&response.body)
		.ok()
		.filter(|status| status.errcode != 0)
	{
		return Err(Error::Upstream { kind: R::KIND, code: status.errcode, message: status.errmsg });
	}

	let mut de = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| {
		ParseError::Remote { kind: R::KIND, status: response.status, source }.into()
	})
}

/// Decodes a persisted blob, rejecting empty ones.
pub(crate) fn decode_cached<R>(blob: &[u8]) -> Result<R>
where
	R: Credential,
{
	if blob.is_empty() {
		return Err(StoreError::Empty { kind: R::KIND }.into());
	}

	let mut de = serde_json::Deserializer::from_slice(blob);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| ParseError::Cached { kind: R::KIND, source }.into())
}

/// Serializes a record into its persisted form.
pub(crate) fn encode_record<R>(record: &R) -> Result<Vec<u8>, StoreError>
where
	R: Credential,
{
	serde_json::to_vec(record).map_err(|e| StoreError::Serialization {
		message: format!("Failed to serialize {} record: {e}", R::KIND),
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::credential::{AccessTokenRecord, CredentialKind, TicketRecord};

	#[test]
	fn platform_error_code_becomes_upstream_error() {
		let response =
			HttpResponse::new(200, "{\"errcode\":40013,\"errmsg\":\"invalid appid\"}");
		let err = decode_response::<AccessTokenRecord>(response)
			.expect_err("Non-zero errcode should be rejected.");

		assert!(matches!(
			err,
			Error::Upstream { kind: CredentialKind::AccessToken, code: 40013, ref message }
				if message == "invalid appid"
		));
	}

	#[test]
	fn zero_error_code_decodes_ticket() {
		let response = HttpResponse::new(
			200,
			"{\"errcode\":0,\"errmsg\":\"ok\",\"ticket\":\"T1\",\"expires_in\":7200}",
		);
		let record = decode_response::<TicketRecord>(response)
			.expect("Successful ticket response should decode.");

		assert_eq!(record, TicketRecord::new("T1", 7200, 0));
	}

	#[test]
	fn malformed_bodies_report_kind_and_status() {
		let err = decode_response::<TicketRecord>(HttpResponse::new(200, "<html>"))
			.expect_err("HTML body should fail to decode.");

		assert!(matches!(
			err,
			Error::Parse(ParseError::Remote { kind: CredentialKind::Ticket, status: 200, .. })
		));

		let err = decode_response::<TicketRecord>(HttpResponse::new(503, "busy"))
			.expect_err("Non-success status should be rejected.");

		assert!(matches!(err, Error::Transport(TransportError::Status { status: 503 })));
	}

	#[test]
	fn empty_blob_is_a_storage_error() {
		let err = decode_cached::<AccessTokenRecord>(b"")
			.expect_err("Empty blob should be rejected.");

		assert!(matches!(
			err,
			Error::Storage(StoreError::Empty { kind: CredentialKind::AccessToken })
		));
	}
}
