//! Cube metadata and the BIL/BSQ/BIP interleave it is addressed by.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The order in which a hyperspectral cube's samples are interleaved.
///
/// Only [`Interleave::Bil`] is fully supported by the conditioning and
/// classification kernels; `Bsq`/`Bip` are accepted as metadata (a cube
/// loader may legitimately report either) but are rejected with
/// `UnsupportedInterleave` as soon as the engine tries to condition one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Interleave {
	/// Band-sequential.
	Bsq,
	/// Band-interleaved-by-line.
	Bil,
	/// Band-interleaved-by-pixel.
	Bip,
}

impl FromStr for Interleave {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		match s.to_ascii_lowercase().as_str() {
			"bsq" => Ok(Interleave::Bsq),
			"bil" => Ok(Interleave::Bil),
			"bip" => Ok(Interleave::Bip),
			other => Err(Error::metadata_invalid(format!("unrecognised interleave: {other}"))),
		}
	}
}

impl fmt::Display for Interleave {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Interleave::Bsq => write!(fmt, "bsq"),
			Interleave::Bil => write!(fmt, "bil"),
			Interleave::Bip => write!(fmt, "bip"),
		}
	}
}

/// Immutable-after-load cube metadata.
#[derive(Clone, Debug)]
pub struct CubeMetadata {
	/// Columns.
	pub samples: usize,
	/// Rows.
	pub lines: usize,
	/// Wavelength channels.
	pub bands: usize,
	pub interleave: Interleave,
	/// Integer divisor by which raw samples are scaled; a small integer such as `10000`.
	pub reflectance_scale_factor: u32,
	/// Per-band wavelength, monotonic.
	pub wavelength: Vec<f64>,
	/// Scale factor mapping `wavelength`'s unit to metres (e.g. `1e9` for nanometres).
	pub wavelength_unit: f64,
}

impl CubeMetadata {
	/// The number of pixels (`samples * lines`).
	pub fn pixel_count(&self) -> usize {
		self.samples * self.lines
	}

	/// The number of `f32` samples in the cube (`samples * lines * bands`).
	pub fn element_count(&self) -> usize {
		self.samples * self.lines * self.bands
	}

	/// Enforces the basic cube invariants: all dimensions >= 1, wavelengths
	/// monotonic and one per band, and a strictly positive scale factor.
	pub fn validate(&self) -> Result<(), Error> {
		if self.samples == 0 || self.lines == 0 || self.bands == 0 {
			return Err(Error::metadata_invalid("samples, lines, and bands must all be >= 1"));
		}

		if self.reflectance_scale_factor == 0 {
			return Err(Error::metadata_invalid("reflectance_scale_factor must be > 0"));
		}

		if self.wavelength.len() != self.bands {
			return Err(Error::metadata_invalid(format!(
				"expected {} wavelengths, found {}", self.bands, self.wavelength.len()
			)));
		}

		if !self.wavelength.windows(2).all(|w| w[0] < w[1]) {
			return Err(Error::metadata_invalid("wavelengths must be strictly monotonic"));
		}

		Ok(())
	}

	/// The linear BIL address of `(line, sample, band)`.
	///
	/// `addr = line * (samples * bands) + band * samples + sample`
	#[inline]
	pub fn bil_address(&self, line: usize, sample: usize, band: usize) -> usize {
		line * (self.samples * self.bands) + band * self.samples + sample
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn meta(samples: usize, lines: usize, bands: usize) -> CubeMetadata {
		CubeMetadata {
			samples,
			lines,
			bands,
			interleave: Interleave::Bil,
			reflectance_scale_factor: 10000,
			wavelength: (0..bands).map(|i| 400.0 + i as f64).collect(),
			wavelength_unit: 1e9,
		}
	}

	#[test]
	fn rejects_zero_dimensions() {
		assert!(meta(0, 3, 2).validate().is_err());
		assert!(meta(3, 0, 2).validate().is_err());
		assert!(meta(3, 3, 0).validate().is_err());
	}

	#[test]
	fn rejects_non_monotonic_wavelengths() {
		let mut m = meta(3, 3, 3);
		m.wavelength = vec![400.0, 401.0, 399.0];
		assert!(m.validate().is_err());
	}

	#[test]
	fn rejects_zero_scale_factor() {
		let mut m = meta(3, 3, 2);
		m.reflectance_scale_factor = 0;
		assert!(m.validate().is_err());
	}

	#[test]
	fn bil_address_matches_formula() {
		let m = meta(3, 3, 2);
		// line=1, sample=2, band=1 -> 1*(3*2) + 1*3 + 2 = 6 + 3 + 2 = 11
		assert_eq!(11, m.bil_address(1, 2, 1));
	}

	#[test]
	fn interleave_parses_case_insensitively() {
		assert_eq!(Interleave::Bil, "BIL".parse().unwrap());
		assert_eq!(Interleave::Bsq, "bsq".parse().unwrap());
	}
}
