use crate::api::Memory;

/// A host-resident buffer. For the native backend, staging is just a `Vec`
/// copy; there is no separate device address space to cross.
#[derive(Debug)]
pub struct NativeMemory {
	data: Vec<f32>,
}

impl NativeMemory {
	pub(super) fn new(len: usize) -> Self {
		NativeMemory { data: vec![0.0; len] }
	}

	pub(super) fn as_slice(&self) -> &[f32] {
		&self.data
	}

	pub(super) fn as_mut_slice(&mut self) -> &mut [f32] {
		&mut self.data
	}
}

impl Memory for NativeMemory {
	fn len(&self) -> usize {
		self.data.len()
	}
}
