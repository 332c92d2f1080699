//! Mapping from raw container structure onto CfRadial1 conventions.
//!
//! CfRadial1 stores a whole volume as flat ray-indexed arrays; the sweep
//! structure lives in per-sweep index variables. This module rebuilds
//! that structure (the sweep table) and decides which variables are
//! moments (the field catalog).

use tracing::debug;

use crate::container::Container;
use crate::error::{CfRadialError, Result};

/// Ray dimension name: one entry per ray across the whole volume.
pub(crate) const RAY_DIMENSION: &str = "time";
/// Gate dimension name: one entry per range gate.
pub(crate) const GATE_DIMENSION: &str = "range";

/// Coordinate variables. A name in this set is never a moment, even if
/// its dimensions would otherwise qualify it.
const RESERVED_COORDINATES: [&str; 4] = ["time", "range", "azimuth", "elevation"];

/// Known ray-indexed bookkeeping variables that are not moments even
/// when a writer dimensions them over (time, range).
const AUXILIARY_VARIABLES: [&str; 4] = [
    "ray_n_gates",
    "ray_start_index",
    "ray_start_range",
    "ray_gate_spacing",
];

/// One sweep's slice of the flat ray dimension, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SweepSpan {
    /// First ray of the sweep.
    pub start_ray: usize,
    /// Last ray of the sweep, inclusive.
    pub end_ray: usize,
    /// Fixed angle in degrees.
    pub fixed_angle: f64,
}

impl SweepSpan {
    /// Number of rays covered by this span.
    pub fn num_rays(&self) -> usize {
        self.end_ray - self.start_ray + 1
    }
}

/// Rebuild the sweep table from the ray-indexing variables.
///
/// Fails with `Schema` when a required element is absent (the ray/gate
/// dimensions, the sweep start/end index variables, the fixed-angle
/// variable, or the range coordinate), and with `Decode` when the
/// indexing variables are present but inconsistent.
pub(crate) fn sweep_table(container: &Container) -> Result<Vec<SweepSpan>> {
    let n_rays = require_dimension(container, RAY_DIMENSION)?;
    require_dimension(container, GATE_DIMENSION)?;
    if !container.has_variable("range") {
        return Err(CfRadialError::Schema {
            path: container.path().to_path_buf(),
            element: "variable 'range'".to_string(),
        });
    }

    let starts = container.read_i32s("sweep_start_ray_index")?;
    let ends = container.read_i32s("sweep_end_ray_index")?;
    let fixed_angles = container.read_f64s("fixed_angle")?;

    // The sweep dimension, where declared, is authoritative for the
    // sweep count; otherwise the fixed-angle array sets it.
    let num_sweeps = container
        .dimension_len("sweep")
        .unwrap_or(fixed_angles.len());

    for (name, len) in [
        ("sweep_start_ray_index", starts.len()),
        ("sweep_end_ray_index", ends.len()),
        ("fixed_angle", fixed_angles.len()),
    ] {
        if len != num_sweeps {
            return Err(CfRadialError::Decode {
                path: container.path().to_path_buf(),
                variable: name.to_string(),
                sweep: None,
                reason: format!("expected {num_sweeps} entries, got {len}"),
            });
        }
    }

    let mut spans = Vec::with_capacity(num_sweeps);
    for i in 0..num_sweeps {
        let (start, end) = (starts[i], ends[i]);
        if start < 0 || end < start || end as usize >= n_rays {
            return Err(CfRadialError::Decode {
                path: container.path().to_path_buf(),
                variable: "sweep_start_ray_index".to_string(),
                sweep: Some(i),
                reason: format!(
                    "invalid ray span [{start}, {end}] for {n_rays} rays"
                ),
            });
        }
        spans.push(SweepSpan {
            start_ray: start as usize,
            end_ray: end as usize,
            fixed_angle: fixed_angles[i],
        });
    }

    debug!(sweeps = spans.len(), rays = n_rays, "rebuilt sweep table");
    Ok(spans)
}

/// Names of the moment variables: everything dimensioned exactly
/// (ray, gate) that is neither a reserved coordinate nor a known
/// auxiliary variable. Sorted for deterministic ordering.
pub(crate) fn field_catalog(container: &Container) -> Vec<String> {
    let mut fields: Vec<String> = container
        .variable_dims()
        .into_iter()
        .filter(|(name, dims)| {
            dims.len() == 2
                && dims[0] == RAY_DIMENSION
                && dims[1] == GATE_DIMENSION
                && !RESERVED_COORDINATES.contains(&name.as_str())
                && !AUXILIARY_VARIABLES.contains(&name.as_str())
        })
        .map(|(name, _)| name)
        .collect();
    fields.sort();
    debug!(fields = fields.len(), "built field catalog");
    fields
}

fn require_dimension(container: &Container, name: &str) -> Result<usize> {
    container
        .dimension_len(name)
        .ok_or_else(|| CfRadialError::Schema {
            path: container.path().to_path_buf(),
            element: format!("dimension '{name}'"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_ray_count_is_inclusive() {
        let span = SweepSpan {
            start_ray: 100,
            end_ray: 179,
            fixed_angle: 1.5,
        };
        assert_eq!(span.num_rays(), 80);

        let single = SweepSpan {
            start_ray: 0,
            end_ray: 0,
            fixed_angle: 0.5,
        };
        assert_eq!(single.num_rays(), 1);
    }
}
