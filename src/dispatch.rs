//! Kernel dispatcher: picks a tier, sizes the global/local work split, and
//! reports the on-chip allocation a tier C launch needs.

use log::warn;

use crate::capability::{DeviceCapabilities, KernelTier};
use crate::classify::tiled;

/// A fully sized launch: the tier that will actually run (which may be a
/// degraded form of the tier requested), the global/local work-item counts,
/// and the on-chip bytes a tier C launch reserves.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DispatchPlan {
	pub tier: KernelTier,
	pub global: usize,
	pub local: usize,
	pub on_chip_bytes: usize,
}

pub struct Dispatcher;

impl Dispatcher {
	/// Plans a launch for `requested_tier`, degrading one tier at a time --
	/// if no local size >= 2 satisfies the constraints, fall back one tier --
	/// until a tier that fits is found. Tier F always fits.
	pub fn plan(
		requested_tier: KernelTier,
		lines: usize,
		samples: usize,
		bands: usize,
		n_spectrums: usize,
		caps: &DeviceCapabilities,
	) -> DispatchPlan {
		let n_pixels = lines * samples;

		match requested_tier {
			KernelTier::Flat => DispatchPlan {
				tier: KernelTier::Flat,
				global: n_pixels * n_spectrums,
				local: 1,
				on_chip_bytes: 0,
			},

			KernelTier::Grouped => {
				match caps.local_size(samples) {
					Some(local) => {
						DispatchPlan { tier: KernelTier::Grouped, global: n_pixels, local, on_chip_bytes: 0 }
					}
					None => {
						warn!("no work-group size >= 2 divides samples={samples} within max_work_group_size={}; degrading to tier F", caps.max_work_group_size);
						Self::plan(KernelTier::Flat, lines, samples, bands, n_spectrums, caps)
					}
				}
			}

			KernelTier::GroupedCached => {
				let candidate = caps.local_size(samples)
					.filter(|&local| tiled::tile_bytes(local, bands) <= caps.on_chip_mem_bytes);

				match candidate {
					Some(local) => DispatchPlan {
						tier: KernelTier::GroupedCached,
						global: n_pixels,
						local,
						on_chip_bytes: tiled::tile_bytes(local, bands),
					},
					None => {
						warn!("no tile fits on_chip_mem_bytes={} for samples={samples}/bands={bands}; degrading to tier G", caps.on_chip_mem_bytes);
						Self::plan(KernelTier::Grouped, lines, samples, bands, n_spectrums, caps)
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn flat_plan_covers_every_pair() {
		let caps = DeviceCapabilities::minimal();
		let plan = Dispatcher::plan(KernelTier::Flat, 3, 3, 2, 2, &caps);
		assert_eq!(18, plan.global);
		assert_eq!(1, plan.local);
	}

	#[test]
	fn grouped_plan_picks_divisor_of_samples() {
		let caps = DeviceCapabilities { max_work_group_size: 64, on_chip_mem_bytes: 0, coalesce_width: 8 };
		let plan = Dispatcher::plan(KernelTier::Grouped, 4, 4, 10, 8, &caps);
		assert_eq!(KernelTier::Grouped, plan.tier);
		assert_eq!(4, plan.local);
		assert_eq!(16, plan.global);
	}

	#[test]
	fn grouped_degrades_to_flat_when_no_divisor_at_least_two() {
		let caps = DeviceCapabilities { max_work_group_size: 1, on_chip_mem_bytes: 0, coalesce_width: 1 };
		let plan = Dispatcher::plan(KernelTier::Grouped, 4, 4, 10, 7, &caps);
		assert_eq!(KernelTier::Flat, plan.tier);
	}

	#[test]
	fn tiled_degrades_to_grouped_when_tile_too_big() {
		let caps = DeviceCapabilities { max_work_group_size: 64, on_chip_mem_bytes: 8, coalesce_width: 8 };
		let plan = Dispatcher::plan(KernelTier::GroupedCached, 4, 4, 200, 50, &caps);
		assert_eq!(KernelTier::Grouped, plan.tier);
	}

	#[test]
	fn tiled_plan_reports_on_chip_bytes() {
		let caps = DeviceCapabilities { max_work_group_size: 64, on_chip_mem_bytes: 1 << 20, coalesce_width: 8 };
		let plan = Dispatcher::plan(KernelTier::GroupedCached, 4, 4, 10, 8, &caps);
		assert_eq!(KernelTier::GroupedCached, plan.tier);
		assert_eq!(tiled::tile_bytes(plan.local, 10), plan.on_chip_bytes);
	}
}
