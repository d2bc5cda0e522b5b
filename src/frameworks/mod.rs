//! Backend implementations of the [`crate::api`] traits.
//!
//! The `opencl` and `cuda` backends live in sibling crates
//! (`specterra-opencl`, `specterra-cuda`), each depending on `specterra`
//! rather than the other way around, so a consumer pulls in only the
//! backends it has drivers for.

#[cfg(feature = "native")]
pub mod native;
