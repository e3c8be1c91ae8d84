//! SDK-level error types shared by the cache, signer, stores, and transports.

// self
use crate::{_prelude::*, credential::CredentialKind};

/// SDK-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Reading a persisted credential failed.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Remote request failed before a usable body was received.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Remote response or cached blob is not valid credential JSON.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Signature package could not be encoded as JSON.
	#[error("Signature package could not be encoded.")]
	Encode(#[from] serde_json::Error),

	/// Platform answered with a non-zero `errcode`.
	#[error("Platform rejected the {kind} request with errcode {code}: {message}.")]
	Upstream {
		/// Credential that was being fetched.
		kind: CredentialKind,
		/// Platform error code.
		code: i64,
		/// Platform error message.
		message: String,
	},
}

/// Configuration and validation failures raised while constructing the SDK.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Endpoint URL cannot be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},

	/// App id is empty.
	#[error("App id must not be empty.")]
	MissingAppId,
	/// App secret is empty.
	#[error("App secret must not be empty.")]
	MissingAppSecret,
	/// Endpoint uses a scheme other than http or https.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the platform.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the platform.")]
	Io(#[from] std::io::Error),
	/// Platform answered with a non-success HTTP status.
	#[error("Platform returned HTTP status {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Malformed credential JSON, either from the platform or from the store.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Platform response could not be decoded.
	#[error("The {kind} endpoint returned malformed JSON.")]
	Remote {
		/// Credential that was being fetched.
		kind: CredentialKind,
		/// HTTP status code of the response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
	/// Persisted blob could not be decoded.
	#[error("The cached {kind} record is malformed.")]
	Cached {
		/// Credential whose blob failed to decode.
		kind: CredentialKind,
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
}
impl ParseError {
	/// Returns the credential kind whose payload failed to decode.
	pub fn kind(&self) -> CredentialKind {
		match self {
			Self::Remote { kind, .. } | Self::Cached { kind, .. } => *kind,
		}
	}
}
