//! `OpenClContext` -- the active-device selection for the OpenCL framework.

use specterra::api::{Context, Device};
use specterra::error::{Error, Result};
use specterra::hardware::Hardware;

use crate::device::OpenClDevice;
use crate::framework::OpenCl;

pub struct OpenClContext {
	devices: Vec<OpenClDevice>,
	hardware: Vec<Hardware>,
	active: usize,
}

impl OpenClContext {
	pub(crate) fn new(devices: Vec<OpenClDevice>) -> Result<Self> {
		if devices.is_empty() {
			return Err(Error::backend_unavailable("no OpenCL device found on this platform"));
		}

		let hardware = devices.iter().map(|d| d.hardware().clone()).collect();
		Ok(OpenClContext { devices, hardware, active: 0 })
	}
}

impl Context<OpenCl> for OpenClContext {
	fn selection(&self) -> &[Hardware] {
		&self.hardware
	}

	fn active(&self) -> &OpenClDevice {
		&self.devices[self.active]
	}

	fn activate(&mut self, index: usize) -> Result<()> {
		if index >= self.devices.len() {
			return Err(Error::backend_unavailable(format!(
				"no OpenCL device at index {index}"
			)));
		}

		self.active = index;
		Ok(())
	}
}
