use lazy_static::lazy_static;

use crate::api::Device;
use crate::capability::DeviceCapabilities;
use crate::error::Result;
use crate::hardware::{Hardware, HardwareKind};

use super::{Native, NativeMemory};

lazy_static! {
	pub(super) static ref HARDWARE: Vec<Hardware> = vec![Hardware {
		id: 0,
		framework: Native::ID,
		kind: HardwareKind::Cpu,
		name: std::borrow::Cow::Borrowed("HOST CPU"),
		compute_units: rayon::current_num_threads(),
	}];
}

/// The host CPU, exposed as a single `Flat`-tier-only device.
///
/// A real multi-core host could realize tier G/C by modelling a SIMD lane
/// group as a work-group, but this crate keeps the native backend as a
/// plain reference implementation: always tier F capable, with G/C
/// available to exercise the dispatcher's degrade path in tests.
#[derive(Clone, Copy, Debug)]
pub struct NativeDevice;

impl Device for NativeDevice {
	type Framework = Native;
	type Memory = NativeMemory;

	fn hardware(&self) -> &Hardware {
		&HARDWARE[0]
	}

	fn capabilities(&self) -> DeviceCapabilities {
		DeviceCapabilities {
			max_work_group_size: rayon::current_num_threads().max(1),
			on_chip_mem_bytes: 32 * 1024,
			coalesce_width: 1,
		}
	}

	fn is_host_addressable(&self) -> bool {
		true
	}

	fn allocate(&self, len: usize) -> Result<NativeMemory> {
		Ok(NativeMemory::new(len))
	}

	fn write(&self, mem: &mut NativeMemory, host: &[f32]) -> Result<()> {
		mem.as_mut_slice().copy_from_slice(host);
		Ok(())
	}

	fn synch_out(&self, mem: &NativeMemory, host: &mut [f32]) -> Result<()> {
		host.copy_from_slice(mem.as_slice());
		Ok(())
	}
}
