//! Full volume materialization: the read path.
//!
//! Walks the sweep table, slices the ray-indexed coordinates to each
//! sweep's span, and decodes every catalog field's (ray-range × gates)
//! sub-array with its packing attributes applied. Sweeps are decoded in
//! index order, so the first failing sweep is the one surfaced.

use std::collections::BTreeMap;

use ndarray::Array2;
use radar_model::{MomentData, SweepData, SweepMode, VolumeData, NO_DATA};
use tracing::debug;

use crate::container::Container;
use crate::convention::{self, SweepSpan};
use crate::error::{CfRadialError, Result};
use crate::metadata;

/// Decode the whole volume.
pub(crate) fn read_volume(container: &Container) -> Result<VolumeData> {
    let spans = convention::sweep_table(container)?;
    let catalog = convention::field_catalog(container);
    let meta = metadata::metadata_with_spans(container, &spans);
    let coords = SharedCoordinates::load(container)?;

    let mut sweeps = Vec::with_capacity(spans.len());
    for (index, span) in spans.iter().enumerate() {
        sweeps.push(decode_sweep(container, index, span, &catalog, &coords)?);
    }

    debug!(
        sweeps = sweeps.len(),
        fields = catalog.len(),
        "materialized volume"
    );
    Ok(VolumeData::new(meta, sweeps))
}

/// Decode a single sweep by index, without materializing its siblings.
pub(crate) fn read_single_sweep(container: &Container, index: usize) -> Result<SweepData> {
    let spans = convention::sweep_table(container)?;
    let span = spans.get(index).ok_or_else(|| CfRadialError::Decode {
        path: container.path().to_path_buf(),
        variable: "sweep".to_string(),
        sweep: Some(index),
        reason: format!("sweep index out of range: volume has {} sweeps", spans.len()),
    })?;
    let catalog = convention::field_catalog(container);
    let coords = SharedCoordinates::load(container)?;
    decode_sweep(container, index, span, &catalog, &coords)
}

/// Volume-wide coordinate arrays, read once and sliced per sweep.
struct SharedCoordinates {
    /// Per-gate range in meters, shared by every sweep.
    range: Vec<f32>,
    /// Per-ray azimuth over the flat ray dimension.
    azimuth: Vec<f32>,
    /// Per-ray elevation over the flat ray dimension.
    elevation: Vec<f32>,
    /// Per-ray time offsets; zeros when the file omits the variable.
    time: Vec<f64>,
    /// Per-sweep numbers from `sweep_number`, empty when absent.
    sweep_numbers: Vec<i32>,
}

impl SharedCoordinates {
    fn load(container: &Container) -> Result<Self> {
        let n_rays = container
            .dimension_len(convention::RAY_DIMENSION)
            .unwrap_or(0);

        let range = container.read_f32s("range")?;
        check_monotonic_range(container, &range)?;

        let azimuth = container.read_f32s("azimuth")?;
        check_ray_coordinate(container, "azimuth", azimuth.len(), n_rays)?;
        let elevation = container.read_f32s("elevation")?;
        check_ray_coordinate(container, "elevation", elevation.len(), n_rays)?;

        // The time coordinate is descriptive here, not structural: a file
        // without it still decodes, with zeroed offsets.
        let time = if container.has_variable("time") {
            let time = container.read_f64s("time")?;
            check_ray_coordinate(container, "time", time.len(), n_rays)?;
            time
        } else {
            vec![0.0; n_rays]
        };

        let sweep_numbers = if container.has_variable("sweep_number") {
            container.read_i32s("sweep_number").unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self {
            range,
            azimuth,
            elevation,
            time,
            sweep_numbers,
        })
    }
}

fn decode_sweep(
    container: &Container,
    index: usize,
    span: &SweepSpan,
    catalog: &[String],
    coords: &SharedCoordinates,
) -> Result<SweepData> {
    let rays = span.num_rays();
    let gates = coords.range.len();

    let mut moments = BTreeMap::new();
    for name in catalog {
        let moment = decode_moment(container, name, span, index, gates)?;
        moments.insert(name.clone(), moment);
    }

    let sweep_mode = container
        .read_row_text("sweep_mode", index)
        .as_deref()
        .map(SweepMode::parse)
        .unwrap_or(SweepMode::Azimuth);

    debug!(sweep = index, rays, gates, moments = moments.len(), "decoded sweep");

    Ok(SweepData {
        sweep_index: index,
        sweep_number: coords
            .sweep_numbers
            .get(index)
            .copied()
            .filter(|n| *n >= 0)
            .map(|n| n as u32)
            .unwrap_or(index as u32),
        sweep_mode,
        fixed_angle: span.fixed_angle,
        time: coords.time[span.start_ray..=span.end_ray].to_vec(),
        azimuth: coords.azimuth[span.start_ray..=span.end_ray].to_vec(),
        elevation: coords.elevation[span.start_ray..=span.end_ray].to_vec(),
        range: coords.range.clone(),
        moments,
    })
}

/// Decode one moment's (ray-range × all-gates) sub-array.
///
/// Packing semantics live entirely here: `physical = raw * scale_factor
/// + add_offset`, and raw values exactly equal to the declared fill
/// value become [`NO_DATA`] before any scaling. The fill comparison is
/// exact equality on the raw value, never tolerance-based.
fn decode_moment(
    container: &Container,
    name: &str,
    span: &SweepSpan,
    sweep_index: usize,
    gates: usize,
) -> Result<MomentData> {
    let (raw, cols) = container.read_rows_f64(name, span.start_ray, span.end_ray)?;
    let rays = span.num_rays();

    if cols != gates {
        return Err(CfRadialError::Decode {
            path: container.path().to_path_buf(),
            variable: name.to_string(),
            sweep: Some(sweep_index),
            reason: format!("declared {cols} gates, range coordinate has {gates}"),
        });
    }
    if raw.len() != rays * gates {
        return Err(CfRadialError::Decode {
            path: container.path().to_path_buf(),
            variable: name.to_string(),
            sweep: Some(sweep_index),
            reason: format!("expected {} values, got {}", rays * gates, raw.len()),
        });
    }

    let scale = container.var_f64_attr(name, "scale_factor").unwrap_or(1.0);
    let offset = container.var_f64_attr(name, "add_offset").unwrap_or(0.0);
    let fill = container
        .var_f64_attr(name, "_FillValue")
        .or_else(|| container.var_f64_attr(name, "missing_value"));

    let values: Vec<f32> = raw
        .iter()
        .map(|&v| match fill {
            Some(f) if v == f => NO_DATA,
            _ => (v * scale + offset) as f32,
        })
        .collect();

    let data = Array2::from_shape_vec((rays, gates), values).map_err(|e| {
        CfRadialError::Decode {
            path: container.path().to_path_buf(),
            variable: name.to_string(),
            sweep: Some(sweep_index),
            reason: e.to_string(),
        }
    })?;

    let mut moment = MomentData::new(
        name.to_string(),
        container.var_str_attr(name, "units").unwrap_or_default(),
        data,
    );
    moment.standard_name = container.var_str_attr(name, "standard_name");
    moment.long_name = container.var_str_attr(name, "long_name");
    Ok(moment)
}

fn check_ray_coordinate(
    container: &Container,
    name: &str,
    len: usize,
    n_rays: usize,
) -> Result<()> {
    if len != n_rays {
        return Err(CfRadialError::Decode {
            path: container.path().to_path_buf(),
            variable: name.to_string(),
            sweep: None,
            reason: format!("expected {n_rays} entries, got {len}"),
        });
    }
    Ok(())
}

fn check_monotonic_range(container: &Container, range: &[f32]) -> Result<()> {
    if range.windows(2).any(|w| w[1] < w[0]) {
        return Err(CfRadialError::Decode {
            path: container.path().to_path_buf(),
            variable: "range".to_string(),
            sweep: None,
            reason: "range coordinate is not monotonically non-decreasing".to_string(),
        });
    }
    Ok(())
}
