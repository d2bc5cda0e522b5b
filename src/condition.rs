//! Image conditioning: scaling and re-interleaving, run as flat
//! parallel-for passes over the cube's element count.
//!
//! Both passes are pure element-wise (`scale`) or pure permutation
//! (`reinterleave`) transforms with no inter-work-item communication, so the
//! native backend parallelizes them with `rayon` rather than looping
//! sequentially -- the same data-parallel shape a real device kernel has,
//! just executed on host threads.

use rayon::prelude::*;

use crate::cube::{CubeMetadata, Interleave};
use crate::error::{Error, Result};

/// Divides every sample by `reflectance_scale_factor / 100`, in place.
///
/// Skipped (a no-op) when `reflectance_scale_factor == 100`, per spec.
pub fn scale(cube: &mut [f32], meta: &CubeMetadata) -> Result<()> {
	if meta.reflectance_scale_factor == 100 {
		return Ok(());
	}

	if cube.len() != meta.element_count() {
		return Err(Error::metadata_invalid(format!(
			"cube has {} elements, expected {}", cube.len(), meta.element_count()
		)));
	}

	let divisor = meta.reflectance_scale_factor as f32 / 100.0;
	cube.par_iter_mut().for_each(|sample| *sample /= divisor);

	Ok(())
}

/// Re-lays `cube` (currently in `meta.interleave` order) into canonical BIL order.
///
/// Only `Interleave::Bil` is supported; anything else is `UnsupportedInterleave`.
/// When the cube is already BIL this is a no-op copy.
pub fn reinterleave(cube: &[f32], meta: &CubeMetadata) -> Result<Vec<f32>> {
	if meta.interleave != Interleave::Bil {
		return Err(Error::unsupported_interleave(format!(
			"cannot re-interleave from {}: only BIL is supported", meta.interleave
		)));
	}

	if cube.len() != meta.element_count() {
		return Err(Error::metadata_invalid(format!(
			"cube has {} elements, expected {}", cube.len(), meta.element_count()
		)));
	}

	let mut out = vec![0.0f32; cube.len()];

	out.par_iter_mut().enumerate().for_each(|(addr, dst)| {
		let band = (addr / meta.samples) % meta.bands;
		let line = addr / (meta.samples * meta.bands);
		let sample = addr % meta.samples;

		*dst = cube[meta.bil_address(line, sample, band)];
	});

	Ok(out)
}

#[cfg(test)]
mod test {
	use super::*;

	fn meta(samples: usize, lines: usize, bands: usize, scale_factor: u32) -> CubeMetadata {
		CubeMetadata {
			samples,
			lines,
			bands,
			interleave: Interleave::Bil,
			reflectance_scale_factor: scale_factor,
			wavelength: (0..bands).map(|i| 400.0 + i as f64).collect(),
			wavelength_unit: 1e9,
		}
	}

	#[test]
	fn scale_is_noop_at_100() {
		let m = meta(2, 1, 2, 100);
		let mut cube = vec![100.0, 100.0, 100.0, 100.0];
		scale(&mut cube, &m).unwrap();
		assert_eq!(vec![100.0, 100.0, 100.0, 100.0], cube);
	}

	#[test]
	fn scale_divides_by_factor_over_100() {
		let m = meta(1, 1, 1, 10000);
		let mut cube = vec![10000.0];
		scale(&mut cube, &m).unwrap();
		assert!((cube[0] - 1.0).abs() < 1e-6);
	}

	#[test]
	fn reinterleave_bil_is_identity() {
		let m = meta(3, 2, 2, 100);
		let cube: Vec<f32> = (0..12).map(|i| i as f32).collect();
		let out = reinterleave(&cube, &m).unwrap();
		assert_eq!(cube, out);
	}

	#[test]
	fn reinterleave_rejects_non_bil() {
		let mut m = meta(2, 2, 2, 100);
		m.interleave = Interleave::Bsq;
		let cube = vec![0.0; 8];
		let err = reinterleave(&cube, &m).unwrap_err();
		assert_eq!(crate::error::ErrorKind::UnsupportedInterleave, err.kind());
	}
}
