//! `specterra` -- per-pixel nearest-reference-spectrum classification over
//! heterogeneous compute devices.
//!
//! A device context ([`api`]) probes a device's capabilities and selects
//! one of three kernel tiers ([`capability`]); the residency layer
//! ([`residency`]) stages host buffers onto the device; conditioning
//! ([`condition`]) normalizes scale and interleave; the classification
//! kernels ([`classify`]) run one of two similarity metrics; the dispatcher
//! ([`dispatch`]) sizes and submits the launch. [`engine`] drives the whole
//! pipeline end to end.
//!
//! The `native` feature (on by default) provides an always-available
//! host-CPU backend and is the only backend this crate itself executes.
//! The `specterra-opencl` and `specterra-cuda` sibling crates depend on
//! `specterra` (with `default-features = false`, since they have no use for
//! the native backend) and implement the same [`api`] traits against real
//! devices; a consumer picks whichever backend crates it has drivers for.

pub mod api;
pub mod capability;
pub mod classify;
pub mod condition;
pub mod config;
pub mod cube;
pub mod dispatch;
#[cfg(feature = "native")]
pub mod engine;
pub mod error;
pub mod frameworks;
pub mod hardware;
pub mod residency;
pub mod spectra;
pub mod timing;

pub use crate::config::{DeviceClass, EngineConfig, Metric};
pub use crate::cube::{CubeMetadata, Interleave};
#[cfg(feature = "native")]
pub use crate::engine::Engine;
pub use crate::error::{Error, Result};
pub use crate::residency::ResidencyMode;
pub use crate::spectra::SpectraTable;
pub use crate::timing::TimingRecord;
