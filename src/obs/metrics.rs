// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"wechat_jssdk_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn signature_outcome_is_accepted_without_recorder() {
		record_flow_outcome(FlowKind::Signature, FlowOutcome::Success);
	}

	#[cfg(feature = "metrics")]
	#[test]
	fn flow_counter_carries_flow_and_outcome_labels() {
		// std
		use std::sync::atomic::{AtomicU64, Ordering};
		// crates.io
		use metrics::{
			Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString,
			Unit,
		};
		// self
		use crate::{_prelude::*, credential::CredentialKind};

		#[derive(Default)]
		struct Hits(AtomicU64);
		impl CounterFn for Hits {
			fn increment(&self, value: u64) {
				self.0.fetch_add(value, Ordering::Relaxed);
			}

			fn absolute(&self, value: u64) {
				self.0.store(value, Ordering::Relaxed);
			}
		}

		type Registered = (String, Vec<(String, String)>, Arc<Hits>);

		#[derive(Default)]
		struct CaptureRecorder(Mutex<Vec<Registered>>);
		impl Recorder for CaptureRecorder {
			fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

			fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

			fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

			fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
				let hits = Arc::new(Hits::default());
				let labels = key
					.labels()
					.map(|label| (label.key().to_owned(), label.value().to_owned()))
					.collect();

				self.0.lock().push((key.name().to_owned(), labels, hits.clone()));

				Counter::from_arc(hits)
			}

			fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
				Gauge::noop()
			}

			fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
				Histogram::noop()
			}
		}

		let recorder = CaptureRecorder::default();

		metrics::with_local_recorder(&recorder, || {
			record_flow_outcome(FlowKind::Signature, FlowOutcome::Success);
			record_flow_outcome(FlowKind::from(CredentialKind::Ticket), FlowOutcome::Refreshed);
		});

		let registered = recorder.0.lock();
		let labels = |flow: &str, outcome: &str| {
			vec![("flow".to_owned(), flow.to_owned()), ("outcome".to_owned(), outcome.to_owned())]
		};

		assert_eq!(registered.len(), 2);
		assert!(registered.iter().all(|(name, _, _)| name == "wechat_jssdk_flow_total"));
		assert_eq!(registered[0].1, labels("signature", "success"));
		assert_eq!(registered[0].2.0.load(Ordering::Relaxed), 1);
		assert_eq!(registered[1].1, labels("ticket", "refreshed"));
		assert_eq!(registered[1].2.0.load(Ordering::Relaxed), 1);
	}
}
