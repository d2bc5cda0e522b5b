//! [`Backend`]: the entry point that ties a [`Framework`] to an active
//! [`Context`].
//!
//! A plain generic over a single `Framework` implementor, since this crate
//! selects its backend at compile time via Cargo features rather than
//! through a type-erased `Box<dyn Framework>` chosen at runtime.

use log::warn;

use crate::config::DeviceClass;
use crate::error::Result;
use crate::hardware::HardwareKind;
use super::{Context, Framework};

/// A framework paired with an activated [`Context`].
pub struct Backend<F: Framework> {
	framework: F,
	context: F::C,
}

impl<F: Framework> Backend<F> {
	/// Constructs the framework and activates its first device.
	pub fn new() -> Result<Self> {
		let framework = F::new()?;
		let context = framework.context()?;
		Ok(Backend { framework, context })
	}

	/// Constructs the framework and activates the first device matching
	/// `class`, falling back to the first device (with a logged warning) if
	/// none matches.
	pub fn with_device_class(class: DeviceClass) -> Result<Self> {
		let framework = F::new()?;
		let mut context = framework.context()?;

		if let Some(kind) = device_kind(class) {
			if let Err(error) = context.select(|hardware| hardware.kind == kind) {
				warn!(
					"no {framework} device matches requested class {class}, falling back to the default device: {error}",
					framework = F::ID,
				);
			}
		}

		Ok(Backend { framework, context })
	}

	pub fn framework(&self) -> &F {
		&self.framework
	}

	pub fn context(&self) -> &F::C {
		&self.context
	}

	pub fn device(&self) -> &F::D {
		self.context.active()
	}
}

fn device_kind(class: DeviceClass) -> Option<HardwareKind> {
	match class {
		DeviceClass::Cpu => Some(HardwareKind::Cpu),
		DeviceClass::Gpu => Some(HardwareKind::Gpu),
		DeviceClass::Accelerator => Some(HardwareKind::Accelerator),
		DeviceClass::Default => None,
	}
}
