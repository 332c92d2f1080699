//! Sweep-level types: one conical scan of the antenna.

use std::collections::BTreeMap;

use crate::moment::MomentData;
use crate::types::SweepMode;

/// One decoded sweep: coordinates plus named moments.
///
/// Invariants: `azimuth`, `elevation`, and `time` all have length
/// `num_rays()`; `range` has length `num_gates()` and is monotonically
/// non-decreasing; every owned moment has shape exactly
/// `(num_rays(), num_gates())`. Moments are keyed by name exactly as
/// stored in the file, and the map is ordered so `moment_names` is
/// deterministic.
#[derive(Debug, Clone)]
pub struct SweepData {
    /// Position of this sweep within the volume, 0-based.
    pub sweep_index: usize,
    /// Sweep number as recorded in the file (defaults to the index).
    pub sweep_number: u32,
    /// Scanning mode of the antenna for this sweep.
    pub sweep_mode: SweepMode,
    /// Fixed angle in degrees: elevation for PPI sweeps, azimuth for RHI.
    pub fixed_angle: f64,
    /// Per-ray time offsets in seconds from the volume reference time.
    pub time: Vec<f64>,
    /// Per-ray azimuth angles in degrees.
    pub azimuth: Vec<f32>,
    /// Per-ray elevation angles in degrees.
    pub elevation: Vec<f32>,
    /// Per-gate range from the instrument in meters, shared by all rays.
    pub range: Vec<f32>,
    /// Decoded moments keyed by name, case as stored in the file.
    pub moments: BTreeMap<String, MomentData>,
}

impl SweepData {
    /// Number of rays in this sweep.
    pub fn num_rays(&self) -> usize {
        self.azimuth.len()
    }

    /// Number of range gates in this sweep.
    pub fn num_gates(&self) -> usize {
        self.range.len()
    }

    /// Look up a moment by exact, case-sensitive name. Callers wanting
    /// alias fallback (e.g. "DBZ" then "DBZH") try the names themselves.
    pub fn get_moment(&self, name: &str) -> Option<&MomentData> {
        self.moments.get(name)
    }

    /// Names of the moments in this sweep, in deterministic order.
    pub fn moment_names(&self) -> Vec<&str> {
        self.moments.keys().map(String::as_str).collect()
    }

    /// Check the sweep's internal shape invariants.
    pub fn validate(&self) -> Result<(), String> {
        let num_rays = self.num_rays();
        let num_gates = self.num_gates();

        if self.elevation.len() != num_rays {
            return Err(format!(
                "elevation length ({}) does not match azimuth length ({})",
                self.elevation.len(),
                num_rays
            ));
        }
        if self.time.len() != num_rays {
            return Err(format!(
                "time length ({}) does not match azimuth length ({})",
                self.time.len(),
                num_rays
            ));
        }
        for (name, moment) in &self.moments {
            if moment.shape() != (num_rays, num_gates) {
                return Err(format!(
                    "moment '{}' has shape {:?}, expected ({}, {})",
                    name,
                    moment.shape(),
                    num_rays,
                    num_gates
                ));
            }
        }
        Ok(())
    }
}
