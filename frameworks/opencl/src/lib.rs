//! OpenCL backend for `specterra`.
//!
//! Implements [`specterra::api`]'s `Framework`/`Device`/`Context`/`Memory`
//! traits against the real `ocl` crate, and its own `classify::classify`
//! entry point that submits the six kernel variants (2 metrics x 3 tiers)
//! from `kernels.rs` directly, mirroring `specterra::engine::Engine`'s
//! stage/condition/classify/deliver shape without routing through it (see
//! `specterra::engine`'s module doc comment for why the two backends don't
//! share that struct).

pub mod classify;
mod context;
mod device;
mod framework;
mod kernels;
mod memory;

pub use crate::context::OpenClContext;
pub use crate::device::OpenClDevice;
pub use crate::framework::OpenCl;
pub use crate::memory::OpenClMemory;
