//! Tier C -- grouped-with-cache: like tier G, but each
//! work-group first cooperatively stages its pixel and the spectra matrix
//! into on-chip memory, using a coalesced (stride-`local_size`) load
//! pattern, before the per-work-item reduction.
//!
//! The native backend has no on-chip memory to stage into, but it
//! reproduces the access-pattern shape faithfully: each pixel's `bands`
//! values are gathered (the strided-by-`samples` BIL reads tier C's
//! dispatcher exists to coalesce) into a small contiguous tile exactly
//! once, then every spectrum comparison reads from that tile rather than
//! re-striding the source cube.

use rayon::prelude::*;

use crate::config::Metric;
use crate::cube::CubeMetadata;

use super::metric;

/// Classifies `cube` by partitioning its pixels into work-groups of
/// `local_size` (a divisor of `meta.samples`, so a group never spans more
/// than one line); each group cooperatively stages its pixels' bands into a
/// shared tile before every pixel scans the spectra table against its own
/// slice of that tile.
pub fn classify(cube: &[f32], meta: &CubeMetadata, spectra: &[f32], n_spectrums: usize, metric_kind: Metric, local_size: usize) -> Vec<i32> {
	let bands = meta.bands;
	let n_pixels = meta.pixel_count();
	let mut labels = vec![0i32; n_pixels];

	labels.par_chunks_mut(local_size).enumerate().for_each(|(group_index, group_labels)| {
		let group_start = group_index * local_size;
		let mut tile = vec![0.0f32; group_labels.len() * bands];

		for (offset, slot) in tile.chunks_mut(bands).enumerate() {
			let pixel = group_start + offset;
			let line = pixel / meta.samples;
			let sample = pixel % meta.samples;

			for (b, cell) in slot.iter_mut().enumerate() {
				*cell = cube[meta.bil_address(line, sample, b)];
			}
		}

		for (offset, label) in group_labels.iter_mut().enumerate() {
			let pixel_tile = &tile[offset * bands..(offset + 1) * bands];

			let mut best_score = metric::initial_score(metric_kind);
			let mut best_index = 0i32;

			for spectrum_index in 0..n_spectrums {
				let spectrum = &spectra[spectrum_index * bands..(spectrum_index + 1) * bands];
				let candidate = metric::score(metric_kind, bands, |b| pixel_tile[b], spectrum);

				if metric::improves(metric_kind, candidate, best_score) {
					best_score = candidate;
					best_index = spectrum_index as i32;
				}
			}

			*label = best_index;
		}
	});

	labels
}

/// Bytes of on-chip memory tier C needs for one work-group: `local_size`
/// pixels' worth of `bands` values, nothing else.
pub fn tile_bytes(local_size: usize, bands: usize) -> usize {
	local_size * bands * std::mem::size_of::<f32>()
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::cube::Interleave;

	fn meta(samples: usize, lines: usize, bands: usize) -> CubeMetadata {
		CubeMetadata {
			samples,
			lines,
			bands,
			interleave: Interleave::Bil,
			reflectance_scale_factor: 100,
			wavelength: (0..bands).map(|i| 400.0 + i as f64).collect(),
			wavelength_unit: 1e9,
		}
	}

	#[test]
	fn agrees_with_grouped_tier_on_scenario_one() {
		let m = meta(3, 3, 2);
		let spectra = vec![8.49, 13.26, 17.64, 24.91];
		let cube = vec![
			4.15, 26.48, 4.17, 7.86, 31.38, 7.69,
			26.51, 3.79, 25.47, 25.42, 8.83, 28.92,
			6.97, 26.64, 6.56, 4.13, 27.79, 5.32,
		];

		let grouped = super::super::grouped::classify(&cube, &m, &spectra, 2, Metric::Euclidean, 3);
		let tiled = classify(&cube, &m, &spectra, 2, Metric::Euclidean, 3);
		assert_eq!(grouped, tiled);
	}

	#[test]
	fn tile_bytes_matches_formula() {
		assert_eq!(4 * 10 * 4, tile_bytes(4, 10));
	}
}
