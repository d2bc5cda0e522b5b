//! `Cuda` -- the CUDA [`Framework`](specterra::api::Framework), discovering
//! every device `cudarc::driver::CudaDevice::count()` reports.

use specterra::api::Framework;
use specterra::error::{Error, Result};
use specterra::hardware::Hardware;

use crate::context::CudaContext;
use crate::device::{map_err, CudaDevice};

pub struct Cuda {
	hardware: Vec<Hardware>,
	devices: Vec<CudaDevice>,
}

impl Framework for Cuda {
	const ID: &'static str = "CUDA";

	type D = CudaDevice;
	type C = CudaContext;

	fn new() -> Result<Self> {
		let count = cudarc::driver::CudaDevice::count().map_err(map_err)?;

		let mut devices = Vec::with_capacity(count as usize);
		for ordinal in 0..count {
			devices.push(CudaDevice::new(ordinal as usize)?);
		}

		if devices.is_empty() {
			return Err(Error::backend_unavailable("no CUDA device reported by the driver"));
		}

		let hardware = devices.iter().map(|d| specterra::api::Device::hardware(d).clone()).collect();
		Ok(Cuda { hardware, devices })
	}

	fn hardware(&self) -> &[Hardware] {
		&self.hardware
	}

	fn devices(&self) -> &[CudaDevice] {
		&self.devices
	}

	fn context(&self) -> Result<CudaContext> {
		CudaContext::new(self.devices.clone())
	}
}
