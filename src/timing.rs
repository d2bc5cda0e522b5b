//! Per-stage timing, in milliseconds: how long each phase of a
//! classification run took, plus the end-to-end total.

use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimingRecord {
	pub initialization_ms: f64,
	pub staging_ms: f64,
	pub conditioning_ms: f64,
	pub classification_ms: f64,
	pub total_ms: f64,
}

impl TimingRecord {
	pub(crate) fn finish(
		initialization: Duration,
		staging: Duration,
		conditioning: Duration,
		classification: Duration,
	) -> Self {
		let total = initialization + staging + conditioning + classification;

		TimingRecord {
			initialization_ms: initialization.as_secs_f64() * 1000.0,
			staging_ms: staging.as_secs_f64() * 1000.0,
			conditioning_ms: conditioning.as_secs_f64() * 1000.0,
			classification_ms: classification.as_secs_f64() * 1000.0,
			total_ms: total.as_secs_f64() * 1000.0,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn total_is_sum_of_stages() {
		let t = TimingRecord::finish(
			Duration::from_millis(1),
			Duration::from_millis(2),
			Duration::from_millis(3),
			Duration::from_millis(4),
		);

		assert!(t.total_ms >= t.initialization_ms + t.staging_ms + t.conditioning_ms + t.classification_ms - 0.01);
		assert!(t.initialization_ms >= 0.0);
		assert!(t.staging_ms >= 0.0);
		assert!(t.conditioning_ms >= 0.0);
		assert!(t.classification_ms >= 0.0);
	}
}
