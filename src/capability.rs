//! Device capability probing and kernel-tier selection.

/// Capabilities probed from a selected device, used to pick a [`KernelTier`]
/// and to size grouped/tiled dispatches.
#[derive(Clone, Copy, Debug)]
pub struct DeviceCapabilities {
	/// The maximum number of work-items that may execute in lock-step sharing on-chip memory.
	pub max_work_group_size: usize,
	/// The size, in bytes, of the per-group fast (on-chip/local/shared) memory.
	pub on_chip_mem_bytes: usize,
	/// The natural vector/sub-group width used when estimating coalesced access patterns.
	pub coalesce_width: usize,
}

impl DeviceCapabilities {
	/// The capabilities of a single-threaded host fallback: tier F only.
	pub fn minimal() -> Self {
		DeviceCapabilities { max_work_group_size: 1, on_chip_mem_bytes: 0, coalesce_width: 1 }
	}

	/// The largest work-group size that divides `samples` evenly and fits
	/// within `max_work_group_size`, or `None` if no divisor >= 2 qualifies
	/// (e.g. `samples` is prime and larger than `max_work_group_size`).
	///
	/// Every grouped/tiled kernel launches one work-item per pixel within a
	/// line, so the work-group size must divide the line width (`samples`) --
	/// a work-group never spans more than one line. `n_spectrums` plays no
	/// part in sizing it; every work-item scans the full spectra table
	/// sequentially regardless of group size.
	pub fn local_size(&self, samples: usize) -> Option<usize> {
		if samples == 0 {
			return None;
		}

		(2..=self.max_work_group_size.min(samples)).rev().find(|candidate| samples % candidate == 0)
	}

	/// The highest [`KernelTier`] these capabilities can support for the
	/// given problem shape.
	pub fn tier(&self, samples: usize, bands: usize) -> KernelTier {
		if self.max_work_group_size <= 1 {
			return KernelTier::Flat;
		}

		let local = match self.local_size(samples) {
			Some(local) => local,
			None => return KernelTier::Flat,
		};

		if crate::classify::tiled::tile_bytes(local, bands) > self.on_chip_mem_bytes {
			return KernelTier::Grouped;
		}

		KernelTier::GroupedCached
	}
}

/// The level of on-chip cooperation a classification kernel variant uses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KernelTier {
	/// One work-item per `(pixel, spectrum)` pair; no group coordination.
	Flat,
	/// One work-group per pixel; work-items cooperate via a barrier, no on-chip tile.
	Grouped,
	/// Like `Grouped`, but the pixel block and/or spectra matrix are first
	/// staged into on-chip memory.
	GroupedCached,
}

impl KernelTier {
	/// Degrade to the next tier down. `Flat` has no tier below it.
	pub fn degrade(self) -> KernelTier {
		match self {
			KernelTier::GroupedCached => KernelTier::Grouped,
			KernelTier::Grouped => KernelTier::Flat,
			KernelTier::Flat => KernelTier::Flat,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn minimal_caps_always_select_flat() {
		let caps = DeviceCapabilities::minimal();
		assert_eq!(KernelTier::Flat, caps.tier(200, 10));
	}

	#[test]
	fn grouped_when_workgroups_available_but_tile_too_big() {
		let caps = DeviceCapabilities { max_work_group_size: 64, on_chip_mem_bytes: 16, coalesce_width: 8 };
		assert_eq!(KernelTier::Grouped, caps.tier(128, 50));
	}

	#[test]
	fn grouped_cached_when_tile_fits() {
		let caps = DeviceCapabilities { max_work_group_size: 64, on_chip_mem_bytes: 1 << 20, coalesce_width: 8 };
		assert_eq!(KernelTier::GroupedCached, caps.tier(128, 50));
	}

	#[test]
	fn local_size_is_largest_divisor_of_samples() {
		let caps = DeviceCapabilities { max_work_group_size: 64, on_chip_mem_bytes: 0, coalesce_width: 8 };
		assert_eq!(Some(48), caps.local_size(96));
	}

	#[test]
	fn local_size_none_when_samples_is_prime_and_large() {
		let caps = DeviceCapabilities { max_work_group_size: 64, on_chip_mem_bytes: 0, coalesce_width: 8 };
		assert_eq!(None, caps.local_size(97));
	}

	#[test]
	fn degrade_walks_down_one_tier() {
		assert_eq!(KernelTier::Grouped, KernelTier::GroupedCached.degrade());
		assert_eq!(KernelTier::Flat, KernelTier::Grouped.degrade());
		assert_eq!(KernelTier::Flat, KernelTier::Flat.degrade());
	}
}
