//! Volume-level types: the decoded volume and its metadata summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sweep::SweepData;
use crate::types::PlatformType;

/// Summary of a radar volume, built without reading any moment arrays.
///
/// Every field that is optional in the source file has a documented
/// default: empty string for missing names, `0.0` for missing site
/// coordinates, `None` for the remaining optional fields. A missing
/// optional never fails a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMetadata {
    /// Volume number within the day's sequence (default 0).
    pub volume_number: u32,
    /// Instrument name, e.g. "SPOL" (default empty).
    pub instrument_name: String,
    /// Institution operating the radar (default empty).
    pub institution: String,
    /// Site name, if the file declares one.
    pub site_name: Option<String>,
    /// Platform carrying the instrument.
    pub platform_type: Option<PlatformType>,
    /// Site latitude in degrees North (default 0.0).
    pub latitude: f64,
    /// Site longitude in degrees East (default 0.0).
    pub longitude: f64,
    /// Site altitude above MSL in meters (default 0.0).
    pub altitude: f64,
    /// Start of the volume's time coverage.
    pub time_coverage_start: Option<DateTime<Utc>>,
    /// End of the volume's time coverage.
    pub time_coverage_end: Option<DateTime<Utc>>,
    /// Number of sweeps in the volume.
    pub num_sweeps: usize,
    /// Fixed angle per sweep, in degrees, in sweep order.
    pub sweep_fixed_angles: Vec<f64>,
    /// Transmit frequency in Hz, if declared.
    pub frequency: Option<f64>,
}

impl Default for VolumeMetadata {
    fn default() -> Self {
        Self {
            volume_number: 0,
            instrument_name: String::new(),
            institution: String::new(),
            site_name: None,
            platform_type: None,
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            time_coverage_start: None,
            time_coverage_end: None,
            num_sweeps: 0,
            sweep_fixed_angles: Vec::new(),
            frequency: None,
        }
    }
}

/// A fully decoded radar volume.
///
/// Owns its metadata and an ordered sequence of sweeps. Invariant:
/// `sweeps.len() == metadata.num_sweeps`.
#[derive(Debug, Clone)]
pub struct VolumeData {
    /// Volume metadata summary.
    pub metadata: VolumeMetadata,
    /// Decoded sweeps, indexed 0..num_sweeps.
    pub sweeps: Vec<SweepData>,
}

impl VolumeData {
    /// Create a new volume from metadata and decoded sweeps.
    pub fn new(metadata: VolumeMetadata, sweeps: Vec<SweepData>) -> Self {
        Self { metadata, sweeps }
    }

    /// Get a sweep by index. Out-of-range indices return `None`; there is
    /// no wraparound.
    pub fn get_sweep(&self, index: usize) -> Option<&SweepData> {
        self.sweeps.get(index)
    }

    /// Number of sweeps in the volume.
    pub fn num_sweeps(&self) -> usize {
        self.sweeps.len()
    }
}
