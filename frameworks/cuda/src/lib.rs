//! CUDA backend for `specterra`.
//!
//! Implements [`specterra::api`]'s `Framework`/`Device`/`Context`/`Memory`
//! traits against the real `cudarc` crate, and its own `classify::classify`
//! entry point that compiles and submits the six kernel variants (2 metrics
//! x 3 tiers) from `kernels.rs` via NVRTC, mirroring `specterra-opencl`'s
//! shape (see that crate's module doc comment for why neither backend
//! routes through `specterra::engine::Engine`).

pub mod classify;
mod context;
mod device;
mod framework;
mod kernels;
mod memory;

pub use crate::context::CudaContext;
pub use crate::device::CudaDevice;
pub use crate::framework::Cuda;
pub use crate::memory::CudaMemory;
