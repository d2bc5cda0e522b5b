use super::Error;

/// The kinds of error the engine can surface.
///
/// Every variant corresponds to a named failure mode in the engine's error
/// handling design: configuration, device discovery, memory residency,
/// kernel execution, and cube metadata validation all fail in their own
/// distinguishable way so a caller can react (or at least log) precisely.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
	/// An unrecognised metric or device class was requested.
	ConfigInvalid,
	/// No device realized even tier F.
	BackendUnavailable,
	/// Staging or retrieval copy failed, or the device is out of memory.
	ResidencyFailure,
	/// The backend reported a kernel launch or execution error.
	KernelFailure,
	/// The cube's interleave is not BIL.
	UnsupportedInterleave,
	/// Cube dimensions are non-positive, wavelengths are missing/non-monotonic,
	/// or the reflectance scale factor is <= 0.
	MetadataInvalid,
	/// A framework-specific error.
	Framework { name: &'static str },
	/// Any error not covered above.
	Other,
}

impl ErrorKind {
	pub(super) fn as_str(&self) -> &'static str {
		use self::ErrorKind::*;

		match *self {
			ConfigInvalid => "invalid configuration",
			BackendUnavailable => "no device realized the flat tier",
			ResidencyFailure => "memory residency operation failed",
			KernelFailure => "kernel launch or execution failed",
			UnsupportedInterleave => "cube interleave is not BIL",
			MetadataInvalid => "cube metadata is invalid",
			Framework { name } => name,
			Other => "other error",
		}
	}
}

impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Error {
		Error::bare(kind)
	}
}
