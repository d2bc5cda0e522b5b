//! `OpenClDevice` -- a single OpenCL device bound to a context/queue pair.

use ocl::enums::DeviceInfo;
use ocl::{Buffer, Context as OclContext, Device as OclDevice, Queue};

use specterra::api::{Device, Framework};
use specterra::capability::DeviceCapabilities;
use specterra::error::{Error, Result};
use specterra::hardware::{Hardware, HardwareKind};

use crate::framework::OpenCl;
use crate::memory::OpenClMemory;

#[derive(Clone)]
pub struct OpenClDevice {
	pub(crate) device: OclDevice,
	pub(crate) context: OclContext,
	pub(crate) queue: Queue,
	hardware: Hardware,
}

impl OpenClDevice {
	pub(crate) fn new(id: isize, device: OclDevice, context: OclContext) -> Result<Self> {
		let queue = Queue::new(&context, device, None).map_err(map_err)?;
		let name = device.name().unwrap_or_else(|_| "unknown OpenCL device".into());
		let kind = match device.info(DeviceInfo::Type) {
			Ok(info) => {
				let repr = info.to_string();
				if repr.contains("GPU") {
					HardwareKind::Gpu
				} else if repr.contains("CPU") {
					HardwareKind::Cpu
				} else if repr.contains("ACCELERATOR") {
					HardwareKind::Accelerator
				} else {
					HardwareKind::Unknown
				}
			}
			Err(_) => HardwareKind::Unknown,
		};
		let compute_units = device.info(DeviceInfo::MaxComputeUnits).ok()
			.and_then(|info| info.to_string().parse().ok())
			.unwrap_or(1);

		let hardware = Hardware { id, framework: OpenCl::ID, kind, name: name.into(), compute_units };

		Ok(OpenClDevice { device, context, queue, hardware })
	}
}

impl Device for OpenClDevice {
	type Framework = OpenCl;
	type Memory = OpenClMemory;

	fn hardware(&self) -> &Hardware {
		&self.hardware
	}

	fn capabilities(&self) -> DeviceCapabilities {
		let max_work_group_size = self.device.info(DeviceInfo::MaxWorkGroupSize).ok()
			.and_then(|info| info.to_string().parse().ok())
			.unwrap_or(1);
		let on_chip_mem_bytes = self.device.info(DeviceInfo::LocalMemSize).ok()
			.and_then(|info| info.to_string().parse().ok())
			.unwrap_or(0);

		DeviceCapabilities { max_work_group_size, on_chip_mem_bytes, coalesce_width: 1 }
	}

	fn allocate(&self, len: usize) -> Result<OpenClMemory> {
		let buffer = Buffer::<f32>::builder()
			.queue(self.queue.clone())
			.len(len)
			.build()
			.map_err(map_err)?;

		Ok(OpenClMemory::new(buffer))
	}

	fn write(&self, mem: &mut OpenClMemory, host: &[f32]) -> Result<()> {
		mem.buffer.write(host).enq().map_err(map_err)
	}

	fn synch_out(&self, mem: &OpenClMemory, host: &mut [f32]) -> Result<()> {
		mem.buffer.read(host).enq().map_err(map_err)
	}
}

pub(crate) fn map_err(err: ocl::Error) -> Error {
	Error::new(specterra::error::ErrorKind::Framework { name: OpenCl::ID }, err)
}
