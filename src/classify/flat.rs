//! Tier F -- flat: one logical work-item per `(pixel, spectrum)` pair,
//! contending for a per-pixel slot via an atomic CAS loop over two distinct
//! cells (score, index) rather than packing both into a single word.

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use rayon::prelude::*;

use crate::config::Metric;
use crate::cube::CubeMetadata;

use super::metric;

/// Classifies every pixel of `cube` (canonical BIL, already conditioned)
/// against `spectra` (flat `n_spectrums * bands`), returning one label per
/// pixel.
pub fn classify(cube: &[f32], meta: &CubeMetadata, spectra: &[f32], n_spectrums: usize, metric_kind: Metric) -> Vec<i32> {
	let bands = meta.bands;
	let n_pixels = meta.pixel_count();

	let scores: Vec<AtomicU32> = (0..n_pixels)
		.map(|_| AtomicU32::new(metric::initial_score(metric_kind).to_bits()))
		.collect();
	let indices: Vec<AtomicI32> = (0..n_pixels).map(|_| AtomicI32::new(0)).collect();

	(0..n_pixels * n_spectrums).into_par_iter().for_each(|work_item| {
		let pixel = work_item / n_spectrums;
		let spectrum_index = work_item % n_spectrums;

		let line = pixel / meta.samples;
		let sample = pixel % meta.samples;
		let spectrum = &spectra[spectrum_index * bands..(spectrum_index + 1) * bands];

		let candidate = metric::score(metric_kind, bands, |b| cube[meta.bil_address(line, sample, b)], spectrum);

		let cell = &scores[pixel];
		loop {
			let current_bits = cell.load(Ordering::Relaxed);
			let current = f32::from_bits(current_bits);

			if !metric::improves(metric_kind, candidate, current) {
				break;
			}

			match cell.compare_exchange_weak(current_bits, candidate.to_bits(), Ordering::Relaxed, Ordering::Relaxed) {
				Ok(_) => {
					indices[pixel].store(spectrum_index as i32, Ordering::Relaxed);
					break;
				}
				Err(_) => continue,
			}
		}
	});

	indices.into_iter().map(|cell| cell.into_inner()).collect()
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
	fn single_spectrum_wins_every_pixel() {
		let m = meta(2, 2, 2);
		let cube = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
		let spectra = vec![0.0, 0.0];
		let labels = classify(&cube, &m, &spectra, 1, Metric::Euclidean);
		assert_eq!(vec![0, 0, 0, 0], labels);
	}

	#[test]
	fn scenario_one_tiny_euclidean() {
		let m = meta(3, 3, 2);
		let spectra = vec![8.49, 13.26, 17.64, 24.91];
		// Pixels in (line, sample) row-major order:
		// (4.15,7.86) (26.48,31.38) (4.17,7.69)
		// (26.51,25.42) (3.79,8.83) (25.47,28.92)
		// (6.97,4.13) (26.64,27.79) (6.56,5.32)
		// stored in canonical BIL (band-major within a line).
		let cube = vec![
			4.15, 26.48, 4.17, 7.86, 31.38, 7.69,
			26.51, 3.79, 25.47, 25.42, 8.83, 28.92,
			6.97, 26.64, 6.56, 4.13, 27.79, 5.32,
		];
		let labels = classify(&cube, &m, &spectra, 2, Metric::Euclidean);
		assert_eq!(vec![0, 1, 0, 1, 0, 1, 0, 1, 0], labels);
	}

	#[test]
	fn all_labels_in_range() {
		let m = meta(4, 4, 3);
		let cube: Vec<f32> = (0..48).map(|i| i as f32).collect();
		let spectra = vec![1.0, 2.0, 3.0, 10.0, 20.0, 30.0, 100.0, 200.0, 300.0];
		let labels = classify(&cube, &m, &spectra, 3, Metric::Ccm);
		assert!(labels.iter().all(|&l| (0..3).contains(&l)));
	}
}
