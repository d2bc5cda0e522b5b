//! `CudaDevice` -- a single CUDA device bound through `cudarc`.

use std::sync::Arc;

use cudarc::driver::sys::CUdevice_attribute::{
	CU_DEVICE_ATTRIBUTE_MAX_SHARED_MEMORY_PER_BLOCK, CU_DEVICE_ATTRIBUTE_MAX_THREADS_PER_BLOCK,
	CU_DEVICE_ATTRIBUTE_MULTIPROCESSOR_COUNT, CU_DEVICE_ATTRIBUTE_WARP_SIZE,
};
use cudarc::driver::DriverError;

use specterra::api::Device;
use specterra::capability::DeviceCapabilities;
use specterra::error::{Error, Result};
use specterra::hardware::{Hardware, HardwareKind};

use crate::framework::Cuda;
use crate::memory::CudaMemory;

#[derive(Clone)]
pub struct CudaDevice {
	pub(crate) device: Arc<cudarc::driver::CudaDevice>,
	hardware: Hardware,
}

impl CudaDevice {
	pub(crate) fn new(ordinal: usize) -> Result<Self> {
		let device = cudarc::driver::CudaDevice::new(ordinal).map_err(map_err)?;
		let name = device.name().unwrap_or_else(|_| "unknown CUDA device".into());
		let compute_units = device.attribute(CU_DEVICE_ATTRIBUTE_MULTIPROCESSOR_COUNT).unwrap_or(1) as usize;

		// Every CUDA device is a discrete GPU in this backend's worldview; the
		// driver exposes no "this is secretly an integrated accelerator" bit
		// worth distinguishing for tier selection.
		let hardware = Hardware {
			id: ordinal as isize,
			framework: Cuda::ID,
			kind: HardwareKind::Gpu,
			name: name.into(),
			compute_units,
		};

		Ok(CudaDevice { device, hardware })
	}
}

impl Device for CudaDevice {
	type Framework = Cuda;
	type Memory = CudaMemory;

	fn hardware(&self) -> &Hardware {
		&self.hardware
	}

	fn capabilities(&self) -> DeviceCapabilities {
		let max_work_group_size = self.device.attribute(CU_DEVICE_ATTRIBUTE_MAX_THREADS_PER_BLOCK).unwrap_or(1).max(1) as usize;
		let on_chip_mem_bytes = self.device.attribute(CU_DEVICE_ATTRIBUTE_MAX_SHARED_MEMORY_PER_BLOCK).unwrap_or(0).max(0) as usize;
		let coalesce_width = self.device.attribute(CU_DEVICE_ATTRIBUTE_WARP_SIZE).unwrap_or(32).max(1) as usize;

		DeviceCapabilities { max_work_group_size, on_chip_mem_bytes, coalesce_width }
	}

	fn allocate(&self, len: usize) -> Result<CudaMemory> {
		let slice = self.device.alloc_zeros::<f32>(len).map_err(map_err)?;
		Ok(CudaMemory::new(slice))
	}

	fn write(&self, mem: &mut CudaMemory, host: &[f32]) -> Result<()> {
		self.device.htod_sync_copy_into(host, &mut mem.slice).map_err(map_err)
	}

	fn synch_out(&self, mem: &CudaMemory, host: &mut [f32]) -> Result<()> {
		self.device.dtoh_sync_copy_into(&mem.slice, host).map_err(map_err)
	}
}

pub(crate) fn map_err(err: DriverError) -> Error {
	Error::new(specterra::error::ErrorKind::Framework { name: Cuda::ID }, err)
}
