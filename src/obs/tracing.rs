// self
use crate::{_prelude::*, credential::CredentialKind, obs::FlowKind, store::StoreError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by SDK flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("wechat_jssdk.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a persist failure that was swallowed after a successful fetch.
pub fn warn_persist_failure(kind: CredentialKind, error: &StoreError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(credential = kind.as_str(), %error, "Failed to persist refreshed credential.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, error);
	}
}

/// Logs that a ticket refresh is proceeding with the in-memory access token.
pub fn warn_stale_access_token(error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(%error, "Access token lookup failed; using the in-memory token.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}
