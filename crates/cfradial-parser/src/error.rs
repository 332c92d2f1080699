//! Error types for CfRadial1 decoding.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for CfRadial1 decoding operations.
pub type Result<T> = std::result::Result<T, CfRadialError>;

/// Errors surfaced by the CfRadial1 decoding engine.
///
/// All of these are deterministic parsing failures: none is retried, and
/// each identifies the offending file, plus the variable name and sweep
/// index where one applies.
#[derive(Debug, Error)]
pub enum CfRadialError {
    /// The input path does not exist or could not be opened.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that could not be opened.
        path: PathBuf,
    },

    /// The file is not a valid netCDF container.
    #[error("not a valid netCDF file: {}: {reason}", path.display())]
    Format {
        /// Path to the rejected file.
        path: PathBuf,
        /// Description of the underlying container failure.
        reason: String,
    },

    /// A required CfRadial1 element (dimension or variable) is absent.
    #[error("missing CfRadial1 element {element} in {}", path.display())]
    Schema {
        /// Path to the file that was inspected.
        path: PathBuf,
        /// The missing element, e.g. "variable 'sweep_end_ray_index'".
        element: String,
    },

    /// A variable failed to decode: its declared shape does not match the
    /// computed ray/gate extents, or its values could not be converted.
    #[error(
        "failed to decode variable '{variable}'{} in {}: {reason}",
        sweep.map(|s| format!(" (sweep {s})")).unwrap_or_default(),
        path.display()
    )]
    Decode {
        /// Path to the file being decoded.
        path: PathBuf,
        /// Name of the offending variable.
        variable: String,
        /// Sweep index the failure occurred in, when sweep-scoped.
        sweep: Option<usize>,
        /// Description of the mismatch.
        reason: String,
    },
}
