//! Metadata-only extraction: the scan path.
//!
//! Builds a [`VolumeMetadata`] from global attributes, scalar position
//! variables, and the sweep-sized index arrays. Never reads a
//! ray-sized or gate-sized array, so scanning stays cheap no matter how
//! large the volume is.

use chrono::{DateTime, Utc};
use radar_model::{PlatformType, VolumeMetadata};
use tracing::debug;

use crate::container::Container;
use crate::convention::{self, SweepSpan};
use crate::error::Result;

/// Extract the volume summary. Required convention elements surface
/// `Schema` errors; optional attributes substitute their documented
/// defaults (empty string, 0.0, or `None`) without failing.
pub(crate) fn scan_metadata(container: &Container) -> Result<VolumeMetadata> {
    let spans = convention::sweep_table(container)?;
    Ok(metadata_with_spans(container, &spans))
}

/// Build the summary from an already-validated sweep table. Everything
/// read here is optional, so this cannot fail.
pub(crate) fn metadata_with_spans(container: &Container, spans: &[SweepSpan]) -> VolumeMetadata {
    let metadata = VolumeMetadata {
        volume_number: read_volume_number(container),
        instrument_name: container
            .global_str_attr("instrument_name")
            .unwrap_or_default(),
        institution: container.global_str_attr("institution").unwrap_or_default(),
        site_name: container.global_str_attr("site_name"),
        platform_type: container
            .global_str_attr("platform_type")
            .as_deref()
            .and_then(PlatformType::parse),
        latitude: read_position(container, "latitude"),
        longitude: read_position(container, "longitude"),
        altitude: read_position(container, "altitude"),
        time_coverage_start: read_coverage_time(container, "time_coverage_start"),
        time_coverage_end: read_coverage_time(container, "time_coverage_end"),
        num_sweeps: spans.len(),
        sweep_fixed_angles: spans.iter().map(|s| s.fixed_angle).collect(),
        frequency: read_optional_scalar(container, "frequency"),
    };

    debug!(
        instrument = %metadata.instrument_name,
        sweeps = metadata.num_sweeps,
        "scanned volume metadata"
    );
    metadata
}

/// Site position variables are scalar; a missing one defaults to 0.0.
fn read_position(container: &Container, name: &str) -> f64 {
    read_optional_scalar(container, name).unwrap_or(0.0)
}

fn read_optional_scalar(container: &Container, name: &str) -> Option<f64> {
    if !container.has_variable(name) {
        return None;
    }
    container
        .read_f64s(name)
        .ok()
        .and_then(|values| values.first().copied())
}

fn read_volume_number(container: &Container) -> u32 {
    read_optional_scalar(container, "volume_number")
        .filter(|v| *v >= 0.0)
        .map(|v| v as u32)
        .unwrap_or(0)
}

/// Time coverage is stored as RFC 3339 global attributes. Unparseable
/// or absent values yield `None` rather than failing the scan.
fn read_coverage_time(container: &Container, name: &str) -> Option<DateTime<Utc>> {
    container
        .global_str_attr(name)
        .as_deref()
        .map(str::trim)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
