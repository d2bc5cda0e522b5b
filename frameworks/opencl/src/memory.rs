//! `OpenClMemory` -- a device-resident `f32` buffer, realizing `Memory` on
//! an OpenCL device.

use ocl::Buffer;
use specterra::api::Memory;

pub struct OpenClMemory {
	pub(crate) buffer: Buffer<f32>,
}

impl OpenClMemory {
	pub(crate) fn new(buffer: Buffer<f32>) -> Self {
		OpenClMemory { buffer }
	}
}

impl Memory for OpenClMemory {
	fn len(&self) -> usize {
		self.buffer.len()
	}
}
