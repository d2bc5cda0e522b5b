use lazy_static::lazy_static;

use crate::api::Framework;
use crate::error::Result;
use crate::hardware::Hardware;

use super::device::HARDWARE;
use super::{NativeContext, NativeDevice};

lazy_static! {
	static ref DEVICES: Vec<NativeDevice> = vec![NativeDevice];
}

/// The host CPU, always available. The fallback backend when no GPGPU
/// framework is compiled in or no accelerator is present at runtime.
#[derive(Debug, Default)]
pub struct Native;

impl Framework for Native {
	const ID: &'static str = "NATIVE";

	type D = NativeDevice;
	type C = NativeContext;

	fn new() -> Result<Self> {
		Ok(Native)
	}

	fn hardware(&self) -> &[Hardware] {
		&HARDWARE
	}

	fn devices(&self) -> &[NativeDevice] {
		&DEVICES
	}

	fn context(&self) -> Result<NativeContext> {
		Ok(NativeContext::new())
	}
}
