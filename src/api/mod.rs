//! The device-context trait surface: every backend
//! (`native`, and the feature-gated `opencl`/`cuda` sibling crates)
//! implements [`Framework`], [`Device`], [`Context`], and [`Memory`].

mod backend;
mod context;
mod device;
mod framework;
mod memory;

pub use self::backend::Backend;
pub use self::context::Context;
pub use self::device::Device;
pub use self::framework::Framework;
pub use self::memory::Memory;
