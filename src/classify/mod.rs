//! Classification kernels: two metrics across three execution tiers, all
//! agreeing on non-tied inputs.
//!
//! This module is the native-backend reference implementation; the
//! `opencl`/`cuda` sibling crates implement the same six (metric, tier)
//! combinations as real device kernels, dispatched through the same
//! [`crate::dispatch::Dispatcher`].

pub mod flat;
pub mod grouped;
pub mod metric;
pub mod tiled;

use crate::capability::KernelTier;
use crate::config::Metric;
use crate::cube::CubeMetadata;
use crate::dispatch::DispatchPlan;

/// Runs the tier `plan.tier` selected, sized by `plan.local`, against
/// `cube`/`spectra`, entirely on the host.
pub fn classify(
	plan: &DispatchPlan,
	cube: &[f32],
	meta: &CubeMetadata,
	spectra: &[f32],
	n_spectrums: usize,
	metric_kind: Metric,
) -> Vec<i32> {
	match plan.tier {
		KernelTier::Flat => flat::classify(cube, meta, spectra, n_spectrums, metric_kind),
		KernelTier::Grouped => grouped::classify(cube, meta, spectra, n_spectrums, metric_kind, plan.local),
		KernelTier::GroupedCached => tiled::classify(cube, meta, spectra, n_spectrums, metric_kind, plan.local),
	}
}
