//! The reference spectra table: one row per material, resampled onto
//! the cube's band grid by the external ingest.

use crate::error::Error;

/// `n_spectrums * bands` reference reflectance values plus parallel names.
#[derive(Clone, Debug)]
pub struct SpectraTable {
	data: Vec<f32>,
	names: Vec<String>,
	bands: usize,
}

impl SpectraTable {
	/// Builds a table from a flat `n_spectrums * bands` buffer and one name per row.
	pub fn new(data: Vec<f32>, names: Vec<String>, bands: usize) -> Result<Self, Error> {
		let table = SpectraTable { data, names, bands };
		table.validate()?;
		Ok(table)
	}

	fn validate(&self) -> Result<(), Error> {
		if self.bands == 0 {
			return Err(Error::metadata_invalid("spectra table must have at least one band"));
		}

		if self.data.len() % self.bands != 0 {
			return Err(Error::metadata_invalid(format!(
				"spectra data length {} is not a multiple of bands {}", self.data.len(), self.bands
			)));
		}

		if self.data.len() / self.bands != self.names.len() {
			return Err(Error::metadata_invalid(format!(
				"expected {} names, found {}", self.data.len() / self.bands, self.names.len()
			)));
		}

		Ok(())
	}

	pub fn bands(&self) -> usize {
		self.bands
	}

	pub fn n_spectrums(&self) -> usize {
		self.names.len()
	}

	pub fn names(&self) -> &[String] {
		&self.names
	}

	/// The flat `n_spectrums * bands` backing buffer.
	pub fn as_slice(&self) -> &[f32] {
		&self.data
	}

	/// The `bands`-length reflectance row for spectrum `index`.
	pub fn spectrum(&self, index: usize) -> &[f32] {
		let start = index * self.bands;
		&self.data[start..start + self.bands]
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn rejects_mismatched_name_count() {
		let data = vec![1.0, 2.0, 3.0, 4.0];
		let names = vec!["only-one".to_string()];
		assert!(SpectraTable::new(data, names, 2).is_err());
	}

	#[test]
	fn rejects_length_not_multiple_of_bands() {
		let data = vec![1.0, 2.0, 3.0];
		let names = vec!["a".to_string()];
		assert!(SpectraTable::new(data, names, 2).is_err());
	}

	#[test]
	fn spectrum_slices_correct_row() {
		let data = vec![1.0, 2.0, 3.0, 4.0];
		let names = vec!["a".to_string(), "b".to_string()];
		let table = SpectraTable::new(data, names, 2).unwrap();
		assert_eq!(&[3.0, 4.0], table.spectrum(1));
		assert_eq!(2, table.n_spectrums());
	}
}
