//! CfRadial1 (CF/Radial netCDF) radar-volume decoder.
//!
//! CfRadial1 files store a whole volume scan as flat ray-indexed arrays
//! inside a netCDF container; the sweep structure is described by
//! per-sweep index variables. This crate rebuilds that structure and
//! exposes two entry points:
//!
//! - [`scan`] reads global attributes and the small sweep-sized arrays
//!   only, returning a [`VolumeMetadata`] summary without touching any
//!   moment data.
//! - [`read`] materializes the full volume: per-sweep coordinates plus
//!   every moment field decoded to physical values, with fill values
//!   mapped to the [`NO_DATA`] sentinel.
//!
//! [`read_sweep`] decodes a single sweep by index for callers that do
//! not need the whole volume.
//!
//! Decoding is synchronous and holds no process-wide state; independent
//! volumes can be decoded concurrently by independent callers. The file
//! handle is scoped to each call and released on every exit path.
//!
//! ```no_run
//! # fn main() -> cfradial_parser::Result<()> {
//! let summary = cfradial_parser::scan("volume.nc")?;
//! println!("{} sweeps", summary.num_sweeps);
//!
//! let volume = cfradial_parser::read("volume.nc")?;
//! for sweep in &volume.sweeps {
//!     if let Some(dbz) = sweep.get_moment("DBZH") {
//!         println!("sweep {}: {:?}", sweep.sweep_index, dbz.shape());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

mod container;
mod convention;
mod materialize;
mod metadata;

pub mod error;

pub use error::{CfRadialError, Result};
pub use radar_model::{
    moments, MomentData, MomentDescriptor, PlatformType, SweepData, SweepMode, VolumeData,
    VolumeMetadata, NO_DATA,
};

use container::Container;

/// Scan a CfRadial1 file for its metadata summary without reading any
/// moment arrays.
pub fn scan<P: AsRef<Path>>(path: P) -> Result<VolumeMetadata> {
    let session = Container::open(path.as_ref())?;
    metadata::scan_metadata(&session)
}

/// Read and fully decode a CfRadial1 volume.
///
/// Sweeps are decoded in index order; the first sweep that fails to
/// decode surfaces its error and the call returns nothing — a volume is
/// never silently truncated.
pub fn read<P: AsRef<Path>>(path: P) -> Result<VolumeData> {
    let session = Container::open(path.as_ref())?;
    materialize::read_volume(&session)
}

/// Read and decode a single sweep by index.
///
/// An out-of-range index is a decode error naming the requested sweep,
/// never a panic.
pub fn read_sweep<P: AsRef<Path>>(path: P, sweep_index: usize) -> Result<SweepData> {
    let session = Container::open(path.as_ref())?;
    materialize::read_single_sweep(&session, sweep_index)
}
