//! The two similarity metrics, each taking a pixel accessor
//! (rather than a contiguous slice, since a BIL pixel's bands are strided
//! by `samples` in the cube buffer) and a contiguous reference spectrum.

use crate::config::Metric;

/// Squared Euclidean distance. Smaller is better; the square root is
/// intentionally omitted since it does not change the argmin.
pub fn squared_euclidean(bands: usize, pixel: impl Fn(usize) -> f32, spectrum: &[f32]) -> f32 {
	(0..bands).map(|b| {
		let d = pixel(b) - spectrum[b];
		d * d
	}).sum()
}

/// Pearson correlation coefficient. Larger is better. Returns `NaN` when the
/// denominator is zero (a degenerate, zero-variance pixel or spectrum) --
/// callers must tolerate this and not treat it as an error.
pub fn pearson(bands: usize, pixel: impl Fn(usize) -> f32, spectrum: &[f32]) -> f32 {
	let n = bands as f32;
	let (mut sum_p, mut sum_s, mut sum_pp, mut sum_ss, mut sum_ps) = (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);

	for b in 0..bands {
		let p = pixel(b);
		let s = spectrum[b];
		sum_p += p;
		sum_s += s;
		sum_pp += p * p;
		sum_ss += s * s;
		sum_ps += p * s;
	}

	let numerator = n * sum_ps - sum_p * sum_s;
	let denominator = ((n * sum_pp - sum_p * sum_p) * (n * sum_ss - sum_s * sum_s)).sqrt();

	numerator / denominator
}

/// Computes `metric`'s score for `pixel` against `spectrum`.
pub fn score(metric: Metric, bands: usize, pixel: impl Fn(usize) -> f32, spectrum: &[f32]) -> f32 {
	match metric {
		Metric::Euclidean => squared_euclidean(bands, pixel, spectrum),
		Metric::Ccm => pearson(bands, pixel, spectrum),
	}
}

/// Whether `candidate` is a strict improvement over `current` under `metric`
/// (Euclidean minimises, CCM maximises; non-strict improvements never win so
/// the first-arriving/first-scanned candidate keeps a tie).
pub fn improves(metric: Metric, candidate: f32, current: f32) -> bool {
	match metric {
		Metric::Euclidean => candidate < current,
		Metric::Ccm => candidate > current,
	}
}

/// The initial best-score value a search starts from, before any real
/// candidate has been considered.
pub fn initial_score(metric: Metric) -> f32 {
	match metric {
		Metric::Euclidean => f32::INFINITY,
		Metric::Ccm => -1.1,
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn euclidean_matches_hand_computation() {
		let p = [4.15f32, 7.86];
		let s = [8.49f32, 13.26];
		let got = squared_euclidean(2, |b| p[b], &s);
		let want = (4.15f32 - 8.49).powi(2) + (7.86f32 - 13.26).powi(2);
		assert!((got - want).abs() < 1e-4);
	}

	#[test]
	fn pearson_of_identical_vectors_is_one() {
		let p = [1.0f32, 10.0, 2.0, 1.0];
		let s = [2.0f32, 3.0, 10.0, 2.0];
		// p is not proportional to s in general; use a genuinely correlated pair instead.
		let a = [1.0f32, 2.0, 3.0, 4.0];
		let b = [2.0f32, 4.0, 6.0, 8.0];
		let got = pearson(4, |i| a[i], &b);
		assert!((got - 1.0).abs() < 1e-4, "got {got}");
		let _ = (p, s);
	}

	#[test]
	fn pearson_degenerate_pixel_is_nan() {
		let p = [5.0f32, 5.0, 5.0];
		let s = [1.0f32, 1.0, 1.0];
		let got = pearson(3, |b| p[b], &s);
		assert!(got.is_nan());
	}

	#[test]
	fn improves_is_strict() {
		assert!(!improves(Metric::Euclidean, 5.0, 5.0));
		assert!(improves(Metric::Euclidean, 4.9, 5.0));
		assert!(!improves(Metric::Ccm, 0.5, 0.5));
		assert!(improves(Metric::Ccm, 0.51, 0.5));
	}
}
