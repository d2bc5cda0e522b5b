//! `OpenCl` -- the OpenCL [`Framework`](specterra::api::Framework),
//! discovering every device on every platform via `ocl::Platform::list()`.

use ocl::{Context as OclContext, Device as OclDevice, Platform};

use specterra::api::Framework;
use specterra::error::{Error, Result};
use specterra::hardware::Hardware;

use crate::context::OpenClContext;
use crate::device::{map_err, OpenClDevice};

pub struct OpenCl {
	hardware: Vec<Hardware>,
	devices: Vec<OpenClDevice>,
}

impl Framework for OpenCl {
	const ID: &'static str = "OPEN_CL";

	type D = OpenClDevice;
	type C = OpenClContext;

	fn new() -> Result<Self> {
		let mut devices = Vec::new();
		let mut id = 0isize;

		for platform in Platform::list() {
			let ocl_devices = OclDevice::list_all(platform).map_err(map_err)?;
			if ocl_devices.is_empty() {
				continue;
			}

			let context = OclContext::builder()
				.platform(platform)
				.devices(ocl_devices.as_slice())
				.build()
				.map_err(map_err)?;

			for ocl_device in ocl_devices {
				devices.push(OpenClDevice::new(id, ocl_device, context.clone())?);
				id += 1;
			}
		}

		if devices.is_empty() {
			return Err(Error::backend_unavailable("no OpenCL platform reported any device"));
		}

		let hardware = devices.iter().map(|d| specterra::api::Device::hardware(d).clone()).collect();
		Ok(OpenCl { hardware, devices })
	}

	fn hardware(&self) -> &[Hardware] {
		&self.hardware
	}

	fn devices(&self) -> &[OpenClDevice] {
		&self.devices
	}

	fn context(&self) -> Result<OpenClContext> {
		OpenClContext::new(self.devices.clone())
	}
}
