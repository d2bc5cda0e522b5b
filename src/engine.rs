//! The top-level entry point: drives a classification run through its
//! per-run state machine (Init -> Staged -> Conditioned -> Classified ->
//! Delivered -> Released).
//!
//! `Engine` drives the native backend concretely, since it is the only
//! backend this crate can execute without real accelerator hardware. The
//! `opencl`/`cuda` sibling crates follow the same shape -- probe
//! capabilities, stage, condition, dispatch, classify, deliver -- against
//! their own device memory, driven directly by their own kernel submission
//! code rather than through this struct.

use std::time::Instant;

use log::error;

use crate::api::{Backend, Device};
use crate::condition;
use crate::config::EngineConfig;
use crate::cube::CubeMetadata;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::frameworks::native::Native;
use crate::residency::Residency;
use crate::spectra::SpectraTable;
use crate::timing::TimingRecord;
use crate::classify;

pub struct Engine {
	backend: Backend<Native>,
}

impl Engine {
	/// Constructs the engine, realizing `config.device_class` (falling back
	/// silently, with a logged warning, if it cannot be realized).
	pub fn new(config: &EngineConfig) -> Result<Self> {
		let backend = Backend::with_device_class(config.device_class)?;
		Ok(Engine { backend })
	}

	/// Classifies `cube` against `spectra`, writing one label per pixel into
	/// `labels` and returning the per-stage timing record.
	pub fn classify(
		&self,
		cube: &[f32],
		meta: &CubeMetadata,
		spectra: &SpectraTable,
		config: &EngineConfig,
		labels: &mut [i32],
	) -> Result<TimingRecord> {
		let init_started = Instant::now();

		if let Err(err) = self.validate_inputs(cube, meta, spectra, labels) {
			error!("init: {err}");
			return Err(err);
		}

		let device = self.backend.device();
		let caps = device.capabilities();
		let tier = caps.tier(meta.samples, meta.bands);
		let init_elapsed = init_started.elapsed();

		let stage_started = Instant::now();
		let cube_residency = match Residency::stage(device, config.residency_mode, cube) {
			Ok(residency) => residency,
			Err(err) => {
				error!("staged: {err}");
				return Err(err);
			}
		};
		let spectra_residency = match Residency::stage(device, config.residency_mode, spectra.as_slice()) {
			Ok(residency) => residency,
			Err(err) => {
				error!("staged: {err}");
				return Err(err);
			}
		};
		let stage_elapsed = stage_started.elapsed();

		let condition_started = Instant::now();
		let conditioned = match self.condition(device, &cube_residency, meta) {
			Ok(conditioned) => conditioned,
			Err(err) => {
				error!("conditioned: {err}");
				return Err(err);
			}
		};
		let condition_elapsed = condition_started.elapsed();

		let classify_started = Instant::now();
		let mut spectra_host = vec![0.0f32; spectra.as_slice().len()];
		if let Err(err) = spectra_residency.retrieve(device, &mut spectra_host) {
			error!("classified: {err}");
			return Err(err);
		}

		let plan = Dispatcher::plan(tier, meta.lines, meta.samples, meta.bands, spectra.n_spectrums(), &caps);
		let result = classify::classify(&plan, &conditioned, meta, &spectra_host, spectra.n_spectrums(), config.metric);
		let classify_elapsed = classify_started.elapsed();

		if result.len() != labels.len() {
			let err = Error::kernel_failure(format!(
				"classification produced {} labels, expected {}", result.len(), labels.len()
			));
			error!("delivered: {err}");
			return Err(err);
		}

		labels.copy_from_slice(&result);

		// Released: `cube_residency`/`spectra_residency` drop at end of scope.
		Ok(TimingRecord::finish(init_elapsed, stage_elapsed, condition_elapsed, classify_elapsed))
	}

	fn validate_inputs(&self, cube: &[f32], meta: &CubeMetadata, spectra: &SpectraTable, labels: &[i32]) -> Result<()> {
		meta.validate()?;

		if cube.len() != meta.element_count() {
			return Err(Error::metadata_invalid(format!(
				"cube has {} elements, expected {}", cube.len(), meta.element_count()
			)));
		}

		if spectra.bands() != meta.bands {
			return Err(Error::metadata_invalid(format!(
				"spectra table has {} bands, cube has {}", spectra.bands(), meta.bands
			)));
		}

		if labels.len() != meta.pixel_count() {
			return Err(Error::metadata_invalid(format!(
				"labels buffer has {} entries, expected {}", labels.len(), meta.pixel_count()
			)));
		}

		Ok(())
	}

	fn condition(
		&self,
		device: &<Native as crate::api::Framework>::D,
		cube_residency: &Residency<<Native as crate::api::Framework>::D>,
		meta: &CubeMetadata,
	) -> Result<Vec<f32>> {
		let mut host_copy = vec![0.0f32; cube_residency.len()];
		cube_residency.retrieve(device, &mut host_copy)?;
		condition::scale(&mut host_copy, meta)?;
		condition::reinterleave(&host_copy, meta)
	}
}
