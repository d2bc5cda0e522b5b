//! Tier G -- grouped: one work-group per line-segment of pixels (a
//! `local_size`-wide divisor of `meta.samples`), one work-item per pixel in
//! that segment, each work-item scanning the full spectra table
//! sequentially and reducing to a winner without any global atomics.
//!
//! The native backend models a work-group as a `rayon` chunk of `local_size`
//! pixels; within it, each pixel independently scans spectra in index order,
//! which is the same barrier-free shape a real device kernel uses.

use rayon::prelude::*;

use crate::config::Metric;
use crate::cube::CubeMetadata;

use super::metric;

/// Classifies `cube` by partitioning its pixels into work-groups of
/// `local_size` (a divisor of `meta.samples`, so a group never spans more
/// than one line).
pub fn classify(cube: &[f32], meta: &CubeMetadata, spectra: &[f32], n_spectrums: usize, metric_kind: Metric, local_size: usize) -> Vec<i32> {
	let bands = meta.bands;
	let n_pixels = meta.pixel_count();
	let mut labels = vec![0i32; n_pixels];

	labels.par_chunks_mut(local_size).enumerate().for_each(|(group_index, group_labels)| {
		let group_start = group_index * local_size;

		for (offset, label) in group_labels.iter_mut().enumerate() {
			let pixel = group_start + offset;
			let line = pixel / meta.samples;
			let sample = pixel % meta.samples;

			let mut best_score = metric::initial_score(metric_kind);
			let mut best_index = 0i32;

			for spectrum_index in 0..n_spectrums {
				let spectrum = &spectra[spectrum_index * bands..(spectrum_index + 1) * bands];
				let candidate = metric::score(metric_kind, bands, |b| cube[meta.bil_address(line, sample, b)], spectrum);

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
	fn agrees_with_flat_tier_on_scenario_one() {
		let m = meta(3, 3, 2);
		let spectra = vec![8.49, 13.26, 17.64, 24.91];
		let cube = vec![
			4.15, 26.48, 4.17, 7.86, 31.38, 7.69,
			26.51, 3.79, 25.47, 25.42, 8.83, 28.92,
			6.97, 26.64, 6.56, 4.13, 27.79, 5.32,
		];

		let flat = super::super::flat::classify(&cube, &m, &spectra, 2, Metric::Euclidean);
		let grouped = classify(&cube, &m, &spectra, 2, Metric::Euclidean, 3);
		assert_eq!(flat, grouped);
	}

	#[test]
	fn all_equal_degeneracy_euclidean() {
		let m = meta(1, 1, 3);
		let cube = vec![5.0, 5.0, 5.0];
		let spectra = vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0];
		let labels = classify(&cube, &m, &spectra, 2, Metric::Euclidean, 1);
		assert_eq!(vec![1], labels);
	}
}
