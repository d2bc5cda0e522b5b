//! `CudaMemory` -- a device-resident `f32` buffer, realizing `Memory` on a
//! CUDA device via `cudarc::driver::CudaSlice`.

use cudarc::driver::CudaSlice;
use specterra::api::Memory;

pub struct CudaMemory {
	pub(crate) slice: CudaSlice<f32>,
}

impl CudaMemory {
	pub(crate) fn new(slice: CudaSlice<f32>) -> Self {
		CudaMemory { slice }
	}
}

impl Memory for CudaMemory {
	fn len(&self) -> usize {
		self.slice.len()
	}
}
