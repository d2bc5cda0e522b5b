//! Representation for a compute device across frameworks.
//!
//! A [`Hardware`] describes one device a [`Framework`](crate::api::Framework)
//! has discovered, independent of which backend it belongs to.

use std::borrow::Cow;

/// General classes for devices, used to identify the type of a device.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum HardwareKind {
	/// Devices that communicate with the host over a peripheral interconnect (e.g. PCIe).
	Accelerator,
	/// Host processors.
	Cpu,
	/// GPU devices.
	Gpu,
	/// Anything else.
	Unknown,
}

/// Representation for hardware across frameworks.
#[derive(Clone, Debug)]
pub struct Hardware {
	/// The device's id, scoped to its framework.
	pub id: isize,
	/// The name of the framework this hardware was discovered under (e.g. `"NATIVE"`, `"OPEN_CL"`).
	pub framework: &'static str,
	/// The general class of device.
	pub kind: HardwareKind,
	/// A human-readable name, as reported by the framework.
	pub name: Cow<'static, str>,
	/// The number of compute units.
	pub compute_units: usize,
}
