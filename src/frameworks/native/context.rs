use crate::api::{Context, Device};
use crate::error::{Error, Result};
use crate::hardware::Hardware;

use super::{Native, NativeDevice};

/// The native framework has exactly one device, so `NativeContext` has
/// nothing to switch between; `activate` accepts only index `0`.
#[derive(Debug)]
pub struct NativeContext {
	device: NativeDevice,
}

impl NativeContext {
	pub(super) fn new() -> Self {
		NativeContext { device: NativeDevice }
	}
}

impl Context<Native> for NativeContext {
	fn selection(&self) -> &[Hardware] {
		std::slice::from_ref(self.device.hardware())
	}

	fn active(&self) -> &NativeDevice {
		&self.device
	}

	fn activate(&mut self, index: usize) -> Result<()> {
		if index == 0 {
			Ok(())
		} else {
			Err(Error::backend_unavailable(format!("native framework has no device at index {index}")))
		}
	}
}
