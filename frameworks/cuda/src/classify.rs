//! CUDA kernel dispatch (components C4/C5 realized on a device): scales
//! and re-interleaves the cube, compiles the embedded NVRTC source once per
//! call, stages buffers through the residency layer, submits the
//! tier/metric-selected kernel at a dispatcher-sized block, and reads labels
//! back.

use cudarc::driver::{LaunchAsync, LaunchConfig};
use cudarc::nvrtc::compile_ptx;

use specterra::api::Device;
use specterra::capability::KernelTier;
use specterra::condition;
use specterra::config::Metric;
use specterra::cube::CubeMetadata;
use specterra::dispatch::Dispatcher;
use specterra::error::Result;
use specterra::residency::{Residency, ResidencyMode};

use crate::context::CudaContext;
use crate::device::map_err;
use crate::kernels;

const MODULE: &str = "specterra_classify";

const FUNCS: &[&str] = &[
	"classify_flat_euclidean",
	"classify_flat_ccm",
	"classify_grouped_euclidean",
	"classify_grouped_ccm",
	"classify_tiled_euclidean",
	"classify_tiled_ccm",
];

/// Classifies `cube` (in `meta.interleave`, unscaled) against `spectra` on
/// `ctx`'s active device, using the kernel variant selected by
/// `metric`/`tier`, staged per `residency_mode`.
pub fn classify(
	ctx: &CudaContext,
	cube: &[f32],
	meta: &CubeMetadata,
	spectra: &[f32],
	n_spectrums: usize,
	metric: Metric,
	tier: KernelTier,
	residency_mode: ResidencyMode,
) -> Result<Vec<i32>> {
	use specterra::api::Context;

	let cuda_device = ctx.active();
	let device = &cuda_device.device;
	let n_pixels = meta.pixel_count();

	let mut scaled = cube.to_vec();
	condition::scale(&mut scaled, meta)?;
	let conditioned = condition::reinterleave(&scaled, meta)?;

	let caps = cuda_device.capabilities();
	let plan = Dispatcher::plan(tier, meta.lines, meta.samples, meta.bands, n_spectrums, &caps);

	if !device.has_func(MODULE, FUNCS[0]) {
		let ptx = compile_ptx(kernels::SOURCE).map_err(|e| {
			specterra::error::Error::new(specterra::error::ErrorKind::KernelFailure, e)
		})?;
		device.load_ptx(ptx, MODULE, FUNCS).map_err(map_err)?;
	}

	let cube_residency = Residency::stage(cuda_device, residency_mode, &conditioned)?;
	let spectra_residency = Residency::stage(cuda_device, residency_mode, spectra)?;

	let cube_buf = &cube_residency.memory()?.slice;
	let spectra_buf = &spectra_residency.memory()?.slice;

	let mut indices_buf = device.alloc_zeros::<i32>(n_pixels).map_err(map_err)?;

	match plan.tier {
		KernelTier::Flat => run_flat(device, cube_buf, spectra_buf, &mut indices_buf, meta, n_spectrums, metric)?,
		KernelTier::Grouped => run_grouped(device, cube_buf, spectra_buf, &mut indices_buf, meta, n_spectrums, metric, plan.local)?,
		KernelTier::GroupedCached => run_tiled(device, cube_buf, spectra_buf, &mut indices_buf, meta, n_spectrums, metric, plan.local)?,
	}

	let mut labels = vec![0i32; n_pixels];
	device.dtoh_sync_copy_into(&indices_buf, &mut labels).map_err(map_err)?;
	Ok(labels)
}

type CudaDriverDevice = std::sync::Arc<cudarc::driver::CudaDevice>;
type F32Buf = cudarc::driver::CudaSlice<f32>;
type I32Buf = cudarc::driver::CudaSlice<i32>;

fn run_flat(
	device: &CudaDriverDevice,
	cube_buf: &F32Buf,
	spectra_buf: &F32Buf,
	indices_buf: &mut I32Buf,
	meta: &CubeMetadata,
	n_spectrums: usize,
	metric: Metric,
) -> Result<()> {
	let n_pixels = meta.pixel_count();
	let initial_bits = specterra::classify::metric::initial_score(metric).to_bits();
	let mut scores_buf = device.htod_sync_copy(&vec![initial_bits; n_pixels]).map_err(map_err)?;

	let name = match metric {
		Metric::Euclidean => "classify_flat_euclidean",
		Metric::Ccm => "classify_flat_ccm",
	};
	let func = device.get_func(MODULE, name)
		.ok_or_else(|| specterra::error::Error::kernel_failure(format!("missing compiled kernel {name}")))?;

	let global = n_pixels * n_spectrums;
	let block = 256u32.min(global.max(1) as u32);
	let grid = ((global as u32) + block - 1) / block;
	let cfg = LaunchConfig { grid_dim: (grid, 1, 1), block_dim: (block, 1, 1), shared_mem_bytes: 0 };

	let params = (
		cube_buf,
		spectra_buf,
		&mut scores_buf,
		indices_buf,
		meta.samples as u32,
		meta.bands as u32,
		n_spectrums as u32,
	);

	unsafe { func.launch(cfg, params).map_err(map_err)? };
	device.synchronize().map_err(map_err)
}

fn run_grouped(
	device: &CudaDriverDevice,
	cube_buf: &F32Buf,
	spectra_buf: &F32Buf,
	indices_buf: &mut I32Buf,
	meta: &CubeMetadata,
	n_spectrums: usize,
	metric: Metric,
	local_size: usize,
) -> Result<()> {
	let name = match metric {
		Metric::Euclidean => "classify_grouped_euclidean",
		Metric::Ccm => "classify_grouped_ccm",
	};
	let func = device.get_func(MODULE, name)
		.ok_or_else(|| specterra::error::Error::kernel_failure(format!("missing compiled kernel {name}")))?;

	let n_pixels = meta.pixel_count();
	let grid = ((n_pixels + local_size - 1) / local_size) as u32;
	let cfg = LaunchConfig {
		grid_dim: (grid, 1, 1),
		block_dim: (local_size as u32, 1, 1),
		shared_mem_bytes: 0,
	};

	let params = (cube_buf, spectra_buf, indices_buf, meta.samples as u32, meta.bands as u32, n_spectrums as u32);

	unsafe { func.launch(cfg, params).map_err(map_err)? };
	device.synchronize().map_err(map_err)
}

fn run_tiled(
	device: &CudaDriverDevice,
	cube_buf: &F32Buf,
	spectra_buf: &F32Buf,
	indices_buf: &mut I32Buf,
	meta: &CubeMetadata,
	n_spectrums: usize,
	metric: Metric,
	local_size: usize,
) -> Result<()> {
	let name = match metric {
		Metric::Euclidean => "classify_tiled_euclidean",
		Metric::Ccm => "classify_tiled_ccm",
	};
	let func = device.get_func(MODULE, name)
		.ok_or_else(|| specterra::error::Error::kernel_failure(format!("missing compiled kernel {name}")))?;

	let n_pixels = meta.pixel_count();
	let grid = ((n_pixels + local_size - 1) / local_size) as u32;
	let shared_mem_bytes = (local_size * meta.bands * std::mem::size_of::<f32>()) as u32;
	let cfg = LaunchConfig {
		grid_dim: (grid, 1, 1),
		block_dim: (local_size as u32, 1, 1),
		shared_mem_bytes,
	};

	let params = (cube_buf, spectra_buf, indices_buf, meta.samples as u32, meta.bands as u32, n_spectrums as u32);

	unsafe { func.launch(cfg, params).map_err(map_err)? };
	device.synchronize().map_err(map_err)
}
