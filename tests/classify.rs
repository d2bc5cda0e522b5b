//! End-to-end scenarios against the native backend (the only backend this
//! sandbox can drive without real accelerator hardware).

use specterra::{CubeMetadata, DeviceClass, Engine, EngineConfig, Interleave, Metric, SpectraTable};

fn meta(samples: usize, lines: usize, bands: usize, scale_factor: u32) -> CubeMetadata {
	CubeMetadata {
		samples,
		lines,
		bands,
		interleave: Interleave::Bil,
		reflectance_scale_factor: scale_factor,
		wavelength: (0..bands).map(|i| 400.0 + i as f64).collect(),
		wavelength_unit: 1e9,
	}
}

fn engine() -> Engine {
	Engine::new(&EngineConfig::new(Metric::Euclidean, DeviceClass::Cpu)).unwrap()
}

mod classify_spec {
	use super::*;

	#[test]
	fn tiny_euclidean_no_scaling() {
		let m = meta(3, 3, 2, 100);
		let spectra = SpectraTable::new(
			vec![8.49, 13.26, 17.64, 24.91],
			vec!["S0".into(), "S1".into()],
			2,
		).unwrap();

		// Pixels, in (line, sample) row-major order, stored canonical BIL.
		let cube = vec![
			4.15, 26.48, 4.17, 7.86, 31.38, 7.69,
			26.51, 3.79, 25.47, 25.42, 8.83, 28.92,
			6.97, 26.64, 6.56, 4.13, 27.79, 5.32,
		];

		let config = EngineConfig::new(Metric::Euclidean, DeviceClass::Cpu);
		let mut labels = vec![0i32; m.pixel_count()];
		engine().classify(&cube, &m, &spectra, &config, &mut labels).unwrap();

		assert_eq!(vec![0, 1, 0, 1, 0, 1, 0, 1, 0], labels);
	}

	#[test]
	fn tiny_ccm_identical_spectrum_wins() {
		// S0 is the pixel itself (correlation 1); S1 is unrelated.
		let m = meta(1, 1, 4, 100);
		let spectra = SpectraTable::new(
			vec![1.0, 10.0, 2.0, 1.0, 10.0, 1.0, 2.0, 10.0],
			vec!["S0".into(), "S1".into()],
			4,
		).unwrap();
		let cube = vec![1.0, 10.0, 2.0, 1.0];

		let config = EngineConfig::new(Metric::Ccm, DeviceClass::Cpu);
		let mut labels = vec![0i32; m.pixel_count()];
		engine().classify(&cube, &m, &spectra, &config, &mut labels).unwrap();

		assert_eq!(vec![0], labels);
	}

	#[test]
	fn all_equal_degeneracy_euclidean_picks_closer_spectrum() {
		let m = meta(1, 1, 3, 100);
		let spectra = SpectraTable::new(
			vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0],
			vec!["S0".into(), "S1".into()],
			3,
		).unwrap();
		let cube = vec![5.0, 5.0, 5.0];

		let config = EngineConfig::new(Metric::Euclidean, DeviceClass::Cpu);
		let mut labels = vec![0i32; m.pixel_count()];
		engine().classify(&cube, &m, &spectra, &config, &mut labels).unwrap();

		// S0 gives 3*(5-1)^2=48, S1 gives 3*(5-2)^2=27: S1 is closer.
		assert_eq!(vec![1], labels);
	}

	#[test]
	fn all_equal_degeneracy_ccm_is_dont_care_but_in_range() {
		let m = meta(1, 1, 3, 100);
		let spectra = SpectraTable::new(
			vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0],
			vec!["S0".into(), "S1".into()],
			3,
		).unwrap();
		let cube = vec![5.0, 5.0, 5.0];

		let config = EngineConfig::new(Metric::Ccm, DeviceClass::Cpu);
		let mut labels = vec![0i32; m.pixel_count()];
		engine().classify(&cube, &m, &spectra, &config, &mut labels).unwrap();

		assert!((0..2).contains(&labels[0]));
	}

	#[test]
	fn scaling_round_trip_matches_prescaled_cube() {
		let spectra = SpectraTable::new(vec![1.0, 1.0], vec!["S0".into()], 2).unwrap();

		let m_10000 = meta(1, 1, 2, 10000);
		let cube_10000 = vec![10000.0, 10000.0];
		let config = EngineConfig::new(Metric::Euclidean, DeviceClass::Cpu);
		let mut labels_10000 = vec![0i32; 1];
		engine().classify(&cube_10000, &m_10000, &spectra, &config, &mut labels_10000).unwrap();

		let m_100 = meta(1, 1, 2, 100);
		let cube_100 = vec![100.0, 100.0];
		let mut labels_100 = vec![0i32; 1];
		engine().classify(&cube_100, &m_100, &spectra, &config, &mut labels_100).unwrap();

		assert_eq!(labels_100, labels_10000);
	}

	#[test]
	fn single_spectrum_always_wins() {
		let m = meta(2, 2, 2, 100);
		let spectra = SpectraTable::new(vec![0.0, 0.0], vec!["only".into()], 2).unwrap();
		let cube: Vec<f32> = (0..8).map(|i| i as f32).collect();

		let config = EngineConfig::new(Metric::Euclidean, DeviceClass::Cpu);
		let mut labels = vec![-1i32; m.pixel_count()];
		engine().classify(&cube, &m, &spectra, &config, &mut labels).unwrap();

		assert!(labels.iter().all(|&l| l == 0));
	}

	#[test]
	fn timing_record_fields_are_non_negative_and_consistent() {
		let m = meta(3, 3, 2, 100);
		let spectra = SpectraTable::new(
			vec![8.49, 13.26, 17.64, 24.91],
			vec!["S0".into(), "S1".into()],
			2,
		).unwrap();
		let cube = vec![
			4.15, 26.48, 4.17, 7.86, 31.38, 7.69,
			26.51, 3.79, 25.47, 25.42, 8.83, 28.92,
			6.97, 26.64, 6.56, 4.13, 27.79, 5.32,
		];

		let config = EngineConfig::new(Metric::Euclidean, DeviceClass::Cpu);
		let mut labels = vec![0i32; m.pixel_count()];
		let timing = engine().classify(&cube, &m, &spectra, &config, &mut labels).unwrap();

		assert!(timing.initialization_ms >= 0.0);
		assert!(timing.staging_ms >= 0.0);
		assert!(timing.conditioning_ms >= 0.0);
		assert!(timing.classification_ms >= 0.0);
		assert!(timing.total_ms >= timing.initialization_ms + timing.staging_ms + timing.conditioning_ms + timing.classification_ms - 0.01);
	}

	#[test]
	fn rejects_non_bil_interleave() {
		let mut m = meta(2, 2, 2, 100);
		m.interleave = Interleave::Bsq;
		let spectra = SpectraTable::new(vec![0.0, 0.0], vec!["only".into()], 2).unwrap();
		let cube = vec![0.0; 8];

		let config = EngineConfig::default();
		let mut labels = vec![0i32; m.pixel_count()];
		let err = engine().classify(&cube, &m, &spectra, &config, &mut labels).unwrap_err();

		assert_eq!(specterra::error::ErrorKind::UnsupportedInterleave, err.kind());
	}

	#[test]
	fn rejects_mismatched_band_counts() {
		let m = meta(1, 1, 3, 100);
		let spectra = SpectraTable::new(vec![0.0, 0.0], vec!["only".into()], 2).unwrap();
		let cube = vec![0.0; 3];

		let config = EngineConfig::default();
		let mut labels = vec![0i32; m.pixel_count()];
		let err = engine().classify(&cube, &m, &spectra, &config, &mut labels).unwrap_err();

		assert_eq!(specterra::error::ErrorKind::MetadataInvalid, err.kind());
	}
}
