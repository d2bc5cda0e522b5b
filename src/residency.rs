//! Data residency layer: staging a host `f32` buffer onto a
//! device and retrieving it again.
//!
//! A classification run only ever needs one buffer resident on one device at
//! a time, so this layer tracks a single location rather than a bitmap of
//! up-to-date copies across many devices, and keeps just the two residency
//! strategies a device's allocate/copy-in primitives expose.

use log::debug;

use crate::api::Device;
use crate::error::{Error, Result};

/// How a buffer is made resident on a device.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResidencyMode {
	/// The device allocates its own buffer and the host copy is written into it.
	///
	/// Required whenever the device's memory is not host-addressable (any
	/// discrete GPU).
	Owned,
	/// The host buffer is handed to the device directly, with no device-side
	/// allocation or copy.
	///
	/// Only meaningful when the device shares an address space with the
	/// host (the native backend); requesting it against a discrete-memory
	/// device is a [`ResidencyFailure`](crate::error::ErrorKind::ResidencyFailure).
	Borrowed,
}

/// A staged buffer, released explicitly via [`Residency::release`] or implicitly on drop.
pub struct Residency<D: Device> {
	mode: ResidencyMode,
	memory: Option<D::Memory>,
	len: usize,
}

impl<D: Device> Residency<D> {
	/// Stages `host` onto `device` per `mode`.
	pub fn stage(device: &D, mode: ResidencyMode, host: &[f32]) -> Result<Self> {
		debug!("staging {} f32 elements ({:?})", host.len(), mode);

		let memory = match mode {
			ResidencyMode::Owned => device.synch_in(host)?,
			ResidencyMode::Borrowed => {
				if !device.is_host_addressable() {
					return Err(Error::residency_failure(
						"borrowed residency requires a host-addressable device",
					));
				}

				let mut memory = device.allocate(host.len())?;
				device.write(&mut memory, host)?;
				memory
			}
		};

		Ok(Residency { mode, memory: Some(memory), len: host.len() })
	}

	/// Copies the staged buffer back into `host`. `host.len()` must equal the staged length.
	pub fn retrieve(&self, device: &D, host: &mut [f32]) -> Result<()> {
		if host.len() != self.len {
			return Err(Error::residency_failure(format!(
				"retrieve buffer length {} does not match staged length {}", host.len(), self.len
			)));
		}

		let memory = self.memory.as_ref().ok_or_else(|| Error::residency_failure("residency already released"))?;
		device.synch_out(memory, host)
	}

	/// A reference to the underlying device memory, for dispatching a kernel against.
	pub fn memory(&self) -> Result<&D::Memory> {
		self.memory.as_ref().ok_or_else(|| Error::residency_failure("residency already released"))
	}

	/// A mutable reference to the underlying device memory.
	pub fn memory_mut(&mut self) -> Result<&mut D::Memory> {
		self.memory.as_mut().ok_or_else(|| Error::residency_failure("residency already released"))
	}

	pub fn mode(&self) -> ResidencyMode {
		self.mode
	}

	pub fn len(&self) -> usize {
		self.len
	}

	/// Drops the device-side memory now, rather than waiting for `Drop`.
	pub fn release(&mut self) {
		if self.memory.take().is_some() {
			debug!("released {} f32 elements ({:?})", self.len, self.mode);
		}
	}
}

impl<D: Device> Drop for Residency<D> {
	fn drop(&mut self) {
		self.release();
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::capability::DeviceCapabilities;
	use crate::error::ErrorKind;
	use crate::hardware::{Hardware, HardwareKind};

	/// A minimal discrete-memory device: same allocate/write/synch_in shape
	/// as a real GPU backend, but with nothing behind it.
	struct DiscreteDevice;

	impl Device for DiscreteDevice {
		type Framework = crate::frameworks::native::Native;
		type Memory = crate::frameworks::native::NativeMemory;

		fn hardware(&self) -> &Hardware {
			const HARDWARE: Hardware = Hardware {
				id: 0,
				framework: "DISCRETE_TEST",
				kind: HardwareKind::Gpu,
				name: std::borrow::Cow::Borrowed("discrete test device"),
				compute_units: 1,
			};
			&HARDWARE
		}

		fn capabilities(&self) -> DeviceCapabilities {
			DeviceCapabilities::minimal()
		}

		fn allocate(&self, len: usize) -> Result<Self::Memory> {
			crate::frameworks::native::NativeDevice.allocate(len)
		}

		fn write(&self, mem: &mut Self::Memory, host: &[f32]) -> Result<()> {
			crate::frameworks::native::NativeDevice.write(mem, host)
		}

		fn synch_out(&self, mem: &Self::Memory, host: &mut [f32]) -> Result<()> {
			crate::frameworks::native::NativeDevice.synch_out(mem, host)
		}
	}

	#[test]
	fn owned_works_on_a_discrete_device() {
		let device = DiscreteDevice;
		let residency = Residency::stage(&device, ResidencyMode::Owned, &[1.0, 2.0, 3.0]).unwrap();
		assert_eq!(3, residency.len());
	}

	#[test]
	fn borrowed_fails_on_a_discrete_device() {
		let device = DiscreteDevice;
		let err = Residency::stage(&device, ResidencyMode::Borrowed, &[1.0, 2.0, 3.0]).unwrap_err();
		assert_eq!(ErrorKind::ResidencyFailure, err.kind());
	}

	#[test]
	fn borrowed_works_on_the_native_device() {
		let device = crate::frameworks::native::NativeDevice;
		let residency = Residency::stage(&device, ResidencyMode::Borrowed, &[1.0, 2.0, 3.0]).unwrap();
		assert_eq!(3, residency.len());
	}
}
