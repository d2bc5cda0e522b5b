use std::result;
use super::Error;

/// A specialized `Result` type used throughout the engine.
pub type Result<T = ()> = result::Result<T, Error>;
