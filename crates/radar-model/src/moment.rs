//! Moment types: one radar variable sampled over (ray, gate) space.

use ndarray::Array2;

/// Sentinel stored in decoded arrays where the file declared no data.
///
/// Raw samples equal to a variable's declared fill value decode to this
/// constant instead of a physical value. Compare with `is_nan()`, never
/// with `==`.
pub const NO_DATA: f32 = f32::NAN;

/// One decoded radar moment (e.g. reflectivity, radial velocity).
///
/// The array holds physical values: any scale factor and offset declared
/// by the source variable have already been applied, and fill values have
/// been replaced with [`NO_DATA`]. Shape is (rays, gates) for the owning
/// sweep; a moment is never shared between sweeps.
#[derive(Debug, Clone)]
pub struct MomentData {
    /// Variable name exactly as stored in the file (e.g. "DBZH").
    pub name: String,
    /// CF standard name, if the file declares one.
    pub standard_name: Option<String>,
    /// Long descriptive name, if the file declares one.
    pub long_name: Option<String>,
    /// Physical units copied verbatim from the file; empty if unspecified.
    pub units: String,
    /// Physical values, shape (rays, gates).
    pub data: Array2<f32>,
}

impl MomentData {
    /// Create a new moment with no optional descriptors.
    pub fn new(name: String, units: String, data: Array2<f32>) -> Self {
        Self {
            name,
            standard_name: None,
            long_name: None,
            units,
            data,
        }
    }

    /// Shape of the data array as (rays, gates).
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_reports_rays_then_gates() {
        let moment = MomentData::new(
            "DBZH".to_string(),
            "dBZ".to_string(),
            Array2::zeros((360, 1000)),
        );
        assert_eq!(moment.shape(), (360, 1000));
        assert_eq!(moment.units, "dBZ");
        assert!(moment.standard_name.is_none());
    }

    #[test]
    fn no_data_is_nan() {
        assert!(NO_DATA.is_nan());
    }
}
