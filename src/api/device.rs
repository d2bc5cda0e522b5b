//! The `Device` trait: a single piece of hardware a
//! [`Framework`](super::Framework) has discovered and can run kernels on.

use crate::capability::DeviceCapabilities;
use crate::error::Result;
use crate::hardware::Hardware;
use super::{Framework, Memory};

/// A device belonging to some [`Framework`].
///
/// `synch_in`/`synch_out` move data between a device's own memory and a
/// native, host-resident buffer. Here the native side is always a plain
/// `&[f32]`/`&mut [f32]`, since the engine only ever stages `f32` sample
/// buffers.
pub trait Device: Sized {
	/// The framework this device belongs to.
	type Framework: Framework<D = Self>;

	/// The backend-specific memory handle this device produces.
	type Memory: Memory;

	/// The hardware description backing this device.
	fn hardware(&self) -> &Hardware;

	/// The capabilities used to select a [`KernelTier`](crate::capability::KernelTier).
	fn capabilities(&self) -> DeviceCapabilities;

	/// Whether this device shares an address space with the host, so a
	/// [`ResidencyMode::Borrowed`](crate::residency::ResidencyMode::Borrowed)
	/// staging can hand it the host buffer directly instead of allocating
	/// and copying. `false` for every discrete-memory device.
	fn is_host_addressable(&self) -> bool {
		false
	}

	/// Allocates an uninitialized buffer of `len` `f32` elements.
	fn allocate(&self, len: usize) -> Result<Self::Memory>;

	/// Copies `host` into a freshly allocated device buffer.
	fn synch_in(&self, host: &[f32]) -> Result<Self::Memory> {
		let mut mem = self.allocate(host.len())?;
		self.write(&mut mem, host)?;
		Ok(mem)
	}

	/// Overwrites an existing device buffer from `host`. `host.len()` must equal `mem.len()`.
	fn write(&self, mem: &mut Self::Memory, host: &[f32]) -> Result<()>;

	/// Copies a device buffer back into `host`. `host.len()` must equal `mem.len()`.
	fn synch_out(&self, mem: &Self::Memory, host: &mut [f32]) -> Result<()>;
}
