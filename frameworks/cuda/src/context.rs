//! `CudaContext` -- the active-device selection for the CUDA framework.

use specterra::api::{Context, Device};
use specterra::error::{Error, Result};
use specterra::hardware::Hardware;

use crate::device::CudaDevice;
use crate::framework::Cuda;

pub struct CudaContext {
	devices: Vec<CudaDevice>,
	hardware: Vec<Hardware>,
	active: usize,
}

impl CudaContext {
	pub(crate) fn new(devices: Vec<CudaDevice>) -> Result<Self> {
		if devices.is_empty() {
			return Err(Error::backend_unavailable("no CUDA device found on this host"));
		}

		let hardware = devices.iter().map(|d| d.hardware().clone()).collect();
		Ok(CudaContext { devices, hardware, active: 0 })
	}
}

impl Context<Cuda> for CudaContext {
	fn selection(&self) -> &[Hardware] {
		&self.hardware
	}

	fn active(&self) -> &CudaDevice {
		&self.devices[self.active]
	}

	fn activate(&mut self, index: usize) -> Result<()> {
		if index >= self.devices.len() {
			return Err(Error::backend_unavailable(format!("no CUDA device at index {index}")));
		}

		self.active = index;
		Ok(())
	}
}
