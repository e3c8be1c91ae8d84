//! Optional observability helpers for credential and signing flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `wechat_jssdk.flow` with the `flow` and
//!   `stage` fields, plus warning events for non-fatal failures.
//! - Enable `metrics` to increment the `wechat_jssdk_flow_total` counter for every attempt, cache
//!   hit, refresh, signature, and failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, credential::CredentialKind};

/// Flow kinds observed by the SDK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Access token lookup or refresh.
	AccessToken,
	/// jsapi ticket lookup or refresh.
	Ticket,
	/// Signature package construction.
	Signature,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AccessToken => "access_token",
			FlowKind::Ticket => "ticket",
			FlowKind::Signature => "signature",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl From<CredentialKind> for FlowKind {
	fn from(kind: CredentialKind) -> Self {
		match kind {
			CredentialKind::AccessToken => FlowKind::AccessToken,
			CredentialKind::Ticket => FlowKind::Ticket,
		}
	}
}

/// Outcome labels recorded for each flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an SDK helper.
	Attempt,
	/// Cached credential was still valid.
	Hit,
	/// Credential was fetched from the platform.
	Refreshed,
	/// Signature package was produced.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Hit => "hit",
			FlowOutcome::Refreshed => "refreshed",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
