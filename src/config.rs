//! The engine's configuration surface: recognized options, minus the
//! externally-owned `cube-path`/`spectra-path`/`help` options.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::residency::ResidencyMode;

/// The similarity metric used to rank reference spectra against a pixel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Metric {
	/// Squared Euclidean distance. Smaller is better.
	Euclidean,
	/// Pearson correlation coefficient. Larger is better.
	Ccm,
}

impl FromStr for Metric {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		match s.to_ascii_uppercase().as_str() {
			"EUCLIDEAN" => Ok(Metric::Euclidean),
			"CCM" => Ok(Metric::Ccm),
			other => Err(Error::config_invalid(format!("unrecognised metric: {other}"))),
		}
	}
}

impl fmt::Display for Metric {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Metric::Euclidean => write!(fmt, "EUCLIDEAN"),
			Metric::Ccm => write!(fmt, "CCM"),
		}
	}
}

/// The class of device to realize a backend on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DeviceClass {
	Cpu,
	Gpu,
	Accelerator,
	/// Use whatever the framework reports as its default selection.
	Default,
}

impl FromStr for DeviceClass {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		match s.to_ascii_uppercase().as_str() {
			"CPU" => Ok(DeviceClass::Cpu),
			"GPU" => Ok(DeviceClass::Gpu),
			"ACCELERATOR" => Ok(DeviceClass::Accelerator),
			"DEFAULT" => Ok(DeviceClass::Default),
			other => Err(Error::config_invalid(format!("unrecognised device class: {other}"))),
		}
	}
}

impl fmt::Display for DeviceClass {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match self {
			DeviceClass::Cpu => write!(fmt, "CPU"),
			DeviceClass::Gpu => write!(fmt, "GPU"),
			DeviceClass::Accelerator => write!(fmt, "ACCELERATOR"),
			DeviceClass::Default => write!(fmt, "DEFAULT"),
		}
	}
}

/// Configuration for a single classification run.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
	pub metric: Metric,
	pub device_class: DeviceClass,
	pub residency_mode: ResidencyMode,
}

impl EngineConfig {
	pub fn new(metric: Metric, device_class: DeviceClass) -> Self {
		EngineConfig { metric, device_class, residency_mode: ResidencyMode::Owned }
	}

	pub fn with_residency_mode(mut self, mode: ResidencyMode) -> Self {
		self.residency_mode = mode;
		self
	}
}

impl Default for EngineConfig {
	fn default() -> Self {
		EngineConfig::new(Metric::Euclidean, DeviceClass::Default)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn metric_parses_case_insensitively() {
		assert_eq!(Metric::Euclidean, "euclidean".parse().unwrap());
		assert_eq!(Metric::Ccm, "CCM".parse().unwrap());
	}

	#[test]
	fn unrecognised_metric_is_config_invalid() {
		let err = "manhattan".parse::<Metric>().unwrap_err();
		assert_eq!(crate::error::ErrorKind::ConfigInvalid, err.kind());
	}

	#[test]
	fn unrecognised_device_class_is_config_invalid() {
		let err = "TPU".parse::<DeviceClass>().unwrap_err();
		assert_eq!(crate::error::ErrorKind::ConfigInvalid, err.kind());
	}
}
