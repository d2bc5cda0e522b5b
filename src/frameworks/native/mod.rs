//! The always-available host-CPU backend: a faithful concurrent reference
//! implementation (real atomics, real `rayon` data-parallelism) rather than
//! a serial stand-in.

pub use self::context::NativeContext;
pub use self::device::NativeDevice;
pub use self::framework::Native;
pub use self::memory::NativeMemory;

mod context;
mod device;
mod framework;
mod memory;
