//! OpenCL kernel dispatch (components C4/C5 realized on a device): scales
//! and re-interleaves the cube, builds the program once per call, stages
//! buffers through the residency layer, submits the tier/metric-selected
//! kernel at a dispatcher-sized work-group, and reads labels back.

use ocl::{Buffer, Kernel, Program};

use specterra::api::Device;
use specterra::capability::KernelTier;
use specterra::condition;
use specterra::config::Metric;
use specterra::cube::CubeMetadata;
use specterra::dispatch::Dispatcher;
use specterra::error::Result;
use specterra::residency::{Residency, ResidencyMode};

use crate::context::OpenClContext;
use crate::device::map_err;
use crate::kernels;

/// Classifies `cube` (in `meta.interleave`, unscaled) against `spectra` on
/// `ctx`'s active device, using the kernel variant selected by
/// `metric`/`tier`, staged per `residency_mode`.
pub fn classify(
	ctx: &OpenClContext,
	cube: &[f32],
	meta: &CubeMetadata,
	spectra: &[f32],
	n_spectrums: usize,
	metric: Metric,
	tier: KernelTier,
	residency_mode: ResidencyMode,
) -> Result<Vec<i32>> {
	use specterra::api::Context;

	let device = ctx.active();
	let n_pixels = meta.pixel_count();

	let mut scaled = cube.to_vec();
	condition::scale(&mut scaled, meta)?;
	let conditioned = condition::reinterleave(&scaled, meta)?;

	let caps = device.capabilities();
	let plan = Dispatcher::plan(tier, meta.lines, meta.samples, meta.bands, n_spectrums, &caps);

	let program = Program::builder()
		.src(kernels::SOURCE)
		.devices(device.device)
		.build(&device.context)
		.map_err(map_err)?;

	let cube_residency = Residency::stage(device, residency_mode, &conditioned)?;
	let spectra_residency = Residency::stage(device, residency_mode, spectra)?;

	let cube_buf = &cube_residency.memory()?.buffer;
	let spectra_buf = &spectra_residency.memory()?.buffer;

	let indices_init = vec![0i32; n_pixels];
	let indices_buf = Buffer::<i32>::builder().queue(device.queue.clone()).len(n_pixels).copy_host_slice(&indices_init).build().map_err(map_err)?;

	match plan.tier {
		KernelTier::Flat => run_flat(&device.queue, &program, cube_buf, spectra_buf, &indices_buf, meta, n_spectrums, metric)?,
		KernelTier::Grouped => run_grouped(&device.queue, &program, cube_buf, spectra_buf, &indices_buf, meta, n_spectrums, metric, plan.local)?,
		KernelTier::GroupedCached => run_tiled(&device.queue, &program, cube_buf, spectra_buf, &indices_buf, meta, n_spectrums, metric, plan.local)?,
	}

	let mut labels = vec![0i32; n_pixels];
	indices_buf.read(&mut labels).enq().map_err(map_err)?;
	Ok(labels)
}

fn run_flat(
	queue: &ocl::Queue,
	program: &Program,
	cube_buf: &Buffer<f32>,
	spectra_buf: &Buffer<f32>,
	indices_buf: &Buffer<i32>,
	meta: &CubeMetadata,
	n_spectrums: usize,
	metric: Metric,
) -> Result<()> {
	let n_pixels = meta.pixel_count();
	let initial_bits = specterra::classify::metric::initial_score(metric).to_bits();
	let scores_init = vec![initial_bits; n_pixels];
	let scores_buf = Buffer::<u32>::builder().queue(queue.clone()).len(n_pixels).copy_host_slice(&scores_init).build().map_err(map_err)?;

	let name = match metric {
		Metric::Euclidean => "classify_flat_euclidean",
		Metric::Ccm => "classify_flat_ccm",
	};

	let kernel = Kernel::builder()
		.program(program)
		.name(name)
		.queue(queue.clone())
		.global_work_size(n_pixels * n_spectrums)
		.arg(cube_buf)
		.arg(spectra_buf)
		.arg(&scores_buf)
		.arg(indices_buf)
		.arg(meta.samples as u32)
		.arg(meta.bands as u32)
		.arg(n_spectrums as u32)
		.build()
		.map_err(map_err)?;

	unsafe { kernel.enq().map_err(map_err)?; }
	queue.finish().map_err(map_err)
}

fn run_grouped(
	queue: &ocl::Queue,
	program: &Program,
	cube_buf: &Buffer<f32>,
	spectra_buf: &Buffer<f32>,
	indices_buf: &Buffer<i32>,
	meta: &CubeMetadata,
	n_spectrums: usize,
	metric: Metric,
	local_size: usize,
) -> Result<()> {
	let name = match metric {
		Metric::Euclidean => "classify_grouped_euclidean",
		Metric::Ccm => "classify_grouped_ccm",
	};

	let kernel = Kernel::builder()
		.program(program)
		.name(name)
		.queue(queue.clone())
		.global_work_size(meta.pixel_count())
		.local_work_size(local_size)
		.arg(cube_buf)
		.arg(spectra_buf)
		.arg(indices_buf)
		.arg(meta.samples as u32)
		.arg(meta.bands as u32)
		.arg(n_spectrums as u32)
		.build()
		.map_err(map_err)?;

	unsafe { kernel.enq().map_err(map_err)?; }
	queue.finish().map_err(map_err)
}

fn run_tiled(
	queue: &ocl::Queue,
	program: &Program,
	cube_buf: &Buffer<f32>,
	spectra_buf: &Buffer<f32>,
	indices_buf: &Buffer<i32>,
	meta: &CubeMetadata,
	n_spectrums: usize,
	metric: Metric,
	local_size: usize,
) -> Result<()> {
	let name = match metric {
		Metric::Euclidean => "classify_tiled_euclidean",
		Metric::Ccm => "classify_tiled_ccm",
	};

	let kernel = Kernel::builder()
		.program(program)
		.name(name)
		.queue(queue.clone())
		.global_work_size(meta.pixel_count())
		.local_work_size(local_size)
		.arg(cube_buf)
		.arg(spectra_buf)
		.arg(indices_buf)
		.arg_local::<f32>(local_size * meta.bands)
		.arg(meta.samples as u32)
		.arg(meta.bands as u32)
		.arg(n_spectrums as u32)
		.build()
		.map_err(map_err)?;

	unsafe { kernel.enq().map_err(map_err)?; }
	queue.finish().map_err(map_err)
}
