//! Programmatic CfRadial1 fixture builder.
//!
//! Writes a minimal but structurally faithful CfRadial1 file: flat
//! ray-indexed coordinates, per-sweep start/end index variables, scalar
//! site position variables, and packed or unpacked moment variables.
//! Omission switches exist so schema-failure paths can be exercised.

use std::path::{Path, PathBuf};

/// One moment variable to write.
pub enum MomentSpec {
    /// 16-bit packed storage with scale/offset and a fill value.
    I16 {
        /// Variable name.
        name: String,
        /// Units attribute; `None` omits the attribute entirely.
        units: Option<String>,
        /// `scale_factor` attribute.
        scale: f64,
        /// `add_offset` attribute.
        offset: f64,
        /// `_FillValue` attribute.
        fill: i16,
        /// Raw values, row-major (ray, gate), length rays × gates.
        values: Vec<i16>,
    },
    /// Unpacked f32 storage with an optional fill value.
    F32 {
        /// Variable name.
        name: String,
        /// Units attribute; `None` omits the attribute entirely.
        units: Option<String>,
        /// Fill attribute value, when present.
        fill: Option<f32>,
        /// Write the fill as legacy `missing_value` instead of
        /// `_FillValue`.
        legacy_fill_attr: bool,
        /// Values, row-major (ray, gate), length rays × gates.
        values: Vec<f32>,
    },
}

impl MomentSpec {
    fn name(&self) -> &str {
        match self {
            MomentSpec::I16 { name, .. } | MomentSpec::F32 { name, .. } => name,
        }
    }
}

/// Builder for a synthetic CfRadial1 file.
///
/// Defaults: one 360-ray sweep at 0.5° (used when no sweep is added
/// explicitly), 100 gates, no moments, site at (39.78, -104.55, 1604 m),
/// gate spacing 250 m starting at 0, azimuth `ray_index % 360`,
/// elevation equal to the sweep's fixed angle, time `0.5 s` per ray.
pub struct CfRadialFixture {
    gates: usize,
    /// Per sweep: (fixed angle, ray count). Empty means the default
    /// single sweep.
    sweeps: Vec<(f64, usize)>,
    moments: Vec<MomentSpec>,
    instrument_name: Option<String>,
    institution: Option<String>,
    site_name: Option<String>,
    platform_type: Option<String>,
    time_coverage_start: Option<String>,
    time_coverage_end: Option<String>,
    position: Option<(f64, f64, f64)>,
    sweep_modes: Option<Vec<String>>,
    frequency: Option<f64>,
    omit_sweep_start_index: bool,
    omit_sweep_end_index: bool,
    omit_fixed_angle: bool,
    omit_range: bool,
    omit_time_coordinate: bool,
    file_name: String,
}

impl Default for CfRadialFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CfRadialFixture {
    /// Create a builder with one 360-ray sweep at 0.5° and 100 gates.
    pub fn new() -> Self {
        Self {
            gates: 100,
            sweeps: Vec::new(),
            moments: Vec::new(),
            instrument_name: None,
            institution: None,
            site_name: None,
            platform_type: None,
            time_coverage_start: None,
            time_coverage_end: None,
            position: Some((39.78, -104.55, 1604.0)),
            sweep_modes: None,
            frequency: None,
            omit_sweep_start_index: false,
            omit_sweep_end_index: false,
            omit_fixed_angle: false,
            omit_range: false,
            omit_time_coordinate: false,
            file_name: "cfrad_test.nc".to_string(),
        }
    }

    /// Set the gate count.
    pub fn with_gates(mut self, gates: usize) -> Self {
        self.gates = gates;
        self
    }

    /// Append a sweep with the given fixed angle and ray count. The
    /// first call replaces the default sweep.
    pub fn with_sweep(mut self, fixed_angle: f64, rays: usize) -> Self {
        self.sweeps.push((fixed_angle, rays));
        self
    }

    /// Effective sweep list: explicit sweeps, or the default single one.
    fn effective_sweeps(&self) -> Vec<(f64, usize)> {
        if self.sweeps.is_empty() {
            vec![(0.5, 360)]
        } else {
            self.sweeps.clone()
        }
    }

    /// Add a packed i16 moment covering every ray of the volume.
    pub fn with_i16_moment(
        mut self,
        name: &str,
        units: &str,
        scale: f64,
        offset: f64,
        fill: i16,
        values: Vec<i16>,
    ) -> Self {
        self.moments.push(MomentSpec::I16 {
            name: name.to_string(),
            units: Some(units.to_string()),
            scale,
            offset,
            fill,
            values,
        });
        self
    }

    /// Add an unpacked f32 moment covering every ray of the volume.
    pub fn with_f32_moment(
        mut self,
        name: &str,
        units: Option<&str>,
        fill: Option<f32>,
        values: Vec<f32>,
    ) -> Self {
        self.moments.push(MomentSpec::F32 {
            name: name.to_string(),
            units: units.map(str::to_string),
            fill,
            legacy_fill_attr: false,
            values,
        });
        self
    }

    /// Add an unpacked f32 moment whose fill value is declared through
    /// the legacy `missing_value` attribute.
    pub fn with_f32_moment_legacy_fill(
        mut self,
        name: &str,
        units: Option<&str>,
        fill: f32,
        values: Vec<f32>,
    ) -> Self {
        self.moments.push(MomentSpec::F32 {
            name: name.to_string(),
            units: units.map(str::to_string),
            fill: Some(fill),
            legacy_fill_attr: true,
            values,
        });
        self
    }

    /// Add an arbitrary moment spec.
    pub fn with_moment(mut self, spec: MomentSpec) -> Self {
        self.moments.push(spec);
        self
    }

    /// Set the `instrument_name` global attribute.
    pub fn with_instrument_name(mut self, name: &str) -> Self {
        self.instrument_name = Some(name.to_string());
        self
    }

    /// Set the `institution` global attribute.
    pub fn with_institution(mut self, institution: &str) -> Self {
        self.institution = Some(institution.to_string());
        self
    }

    /// Set the `site_name` global attribute.
    pub fn with_site_name(mut self, site: &str) -> Self {
        self.site_name = Some(site.to_string());
        self
    }

    /// Set the `platform_type` global attribute.
    pub fn with_platform_type(mut self, platform: &str) -> Self {
        self.platform_type = Some(platform.to_string());
        self
    }

    /// Set the time coverage global attributes (RFC 3339 strings).
    pub fn with_time_coverage(mut self, start: &str, end: &str) -> Self {
        self.time_coverage_start = Some(start.to_string());
        self.time_coverage_end = Some(end.to_string());
        self
    }

    /// Set the site position scalar variables, or omit them entirely.
    pub fn with_position(mut self, position: Option<(f64, f64, f64)>) -> Self {
        self.position = position;
        self
    }

    /// Set per-sweep `sweep_mode` strings (one per sweep).
    pub fn with_sweep_modes(mut self, modes: &[&str]) -> Self {
        self.sweep_modes = Some(modes.iter().map(|m| m.to_string()).collect());
        self
    }

    /// Set the `frequency` scalar variable, in Hz.
    pub fn with_frequency(mut self, hz: f64) -> Self {
        self.frequency = Some(hz);
        self
    }

    /// Omit the `sweep_start_ray_index` variable.
    pub fn without_sweep_start_index(mut self) -> Self {
        self.omit_sweep_start_index = true;
        self
    }

    /// Omit the `sweep_end_ray_index` variable.
    pub fn without_sweep_end_index(mut self) -> Self {
        self.omit_sweep_end_index = true;
        self
    }

    /// Omit the `fixed_angle` variable.
    pub fn without_fixed_angle(mut self) -> Self {
        self.omit_fixed_angle = true;
        self
    }

    /// Omit the `range` coordinate variable.
    pub fn without_range(mut self) -> Self {
        self.omit_range = true;
        self
    }

    /// Omit the per-ray `time` coordinate variable.
    pub fn without_time_coordinate(mut self) -> Self {
        self.omit_time_coordinate = true;
        self
    }

    /// File name inside the target directory.
    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    /// Total ray count across all sweeps.
    pub fn total_rays(&self) -> usize {
        self.effective_sweeps().iter().map(|(_, rays)| rays).sum()
    }

    /// The azimuth value the fixture writes for a flat ray index.
    pub fn azimuth_for_ray(ray: usize) -> f32 {
        (ray % 360) as f32
    }

    /// Write the fixture into `dir` and return its path.
    pub fn write(&self, dir: &Path) -> PathBuf {
        let path = dir.join(&self.file_name);
        let sweeps = self.effective_sweeps();
        let n_rays = self.total_rays();
        let n_sweeps = sweeps.len();

        let mut file = netcdf::create(&path).expect("failed to create netCDF file");

        // Global attributes.
        file.add_attribute("Conventions", "CF/Radial")
            .expect("add Conventions");
        if let Some(name) = &self.instrument_name {
            file.add_attribute("instrument_name", name.as_str())
                .expect("add instrument_name");
        }
        if let Some(institution) = &self.institution {
            file.add_attribute("institution", institution.as_str())
                .expect("add institution");
        }
        if let Some(site) = &self.site_name {
            file.add_attribute("site_name", site.as_str())
                .expect("add site_name");
        }
        if let Some(platform) = &self.platform_type {
            file.add_attribute("platform_type", platform.as_str())
                .expect("add platform_type");
        }
        if let Some(start) = &self.time_coverage_start {
            file.add_attribute("time_coverage_start", start.as_str())
                .expect("add time_coverage_start");
        }
        if let Some(end) = &self.time_coverage_end {
            file.add_attribute("time_coverage_end", end.as_str())
                .expect("add time_coverage_end");
        }

        // Dimensions.
        file.add_dimension("time", n_rays).expect("add dim time");
        file.add_dimension("range", self.gates)
            .expect("add dim range");
        file.add_dimension("sweep", n_sweeps).expect("add dim sweep");

        // Ray coordinates over the flat time dimension.
        if !self.omit_time_coordinate {
            let values: Vec<f64> = (0..n_rays).map(|r| r as f64 * 0.5).collect();
            let mut var = file
                .add_variable::<f64>("time", &["time"])
                .expect("add var time");
            var.put_values(&values, ..).expect("put time values");
            var.put_attribute("units", "seconds since 2024-03-01T00:00:00Z")
                .expect("add time units");
        }
        {
            let values: Vec<f32> = (0..n_rays).map(Self::azimuth_for_ray).collect();
            let mut var = file
                .add_variable::<f32>("azimuth", &["time"])
                .expect("add var azimuth");
            var.put_values(&values, ..).expect("put azimuth values");
            var.put_attribute("units", "degrees").expect("add azimuth units");
        }
        {
            let mut values = Vec::with_capacity(n_rays);
            for (fixed_angle, rays) in &sweeps {
                values.extend(std::iter::repeat(*fixed_angle as f32).take(*rays));
            }
            let mut var = file
                .add_variable::<f32>("elevation", &["time"])
                .expect("add var elevation");
            var.put_values(&values, ..).expect("put elevation values");
            var.put_attribute("units", "degrees")
                .expect("add elevation units");
        }

        // Gate coordinate.
        if !self.omit_range {
            let values: Vec<f32> = (0..self.gates).map(|g| g as f32 * 250.0).collect();
            let mut var = file
                .add_variable::<f32>("range", &["range"])
                .expect("add var range");
            var.put_values(&values, ..).expect("put range values");
            var.put_attribute("units", "meters").expect("add range units");
        }

        // Sweep indexing variables.
        let mut starts = Vec::with_capacity(n_sweeps);
        let mut ends = Vec::with_capacity(n_sweeps);
        let mut next_ray = 0i32;
        for (_, rays) in &sweeps {
            starts.push(next_ray);
            next_ray += *rays as i32;
            ends.push(next_ray - 1);
        }
        if !self.omit_sweep_start_index {
            let mut var = file
                .add_variable::<i32>("sweep_start_ray_index", &["sweep"])
                .expect("add var sweep_start_ray_index");
            var.put_values(&starts, ..).expect("put sweep starts");
        }
        if !self.omit_sweep_end_index {
            let mut var = file
                .add_variable::<i32>("sweep_end_ray_index", &["sweep"])
                .expect("add var sweep_end_ray_index");
            var.put_values(&ends, ..).expect("put sweep ends");
        }
        if !self.omit_fixed_angle {
            let values: Vec<f32> = sweeps.iter().map(|(angle, _)| *angle as f32).collect();
            let mut var = file
                .add_variable::<f32>("fixed_angle", &["sweep"])
                .expect("add var fixed_angle");
            var.put_values(&values, ..).expect("put fixed angles");
            var.put_attribute("units", "degrees")
                .expect("add fixed_angle units");
        }
        {
            let values: Vec<i32> = (0..n_sweeps as i32).collect();
            let mut var = file
                .add_variable::<i32>("sweep_number", &["sweep"])
                .expect("add var sweep_number");
            var.put_values(&values, ..).expect("put sweep numbers");
        }
        if let Some(modes) = &self.sweep_modes {
            assert_eq!(modes.len(), n_sweeps, "one sweep_mode per sweep");
            let width = 32;
            file.add_dimension("string_length_32", width)
                .expect("add dim string_length_32");
            let mut bytes = vec![0u8; n_sweeps * width];
            for (i, mode) in modes.iter().enumerate() {
                let text = mode.as_bytes();
                assert!(text.len() <= width, "sweep_mode too long");
                bytes[i * width..i * width + text.len()].copy_from_slice(text);
            }
            let mut var = file
                .add_variable::<u8>("sweep_mode", &["sweep", "string_length_32"])
                .expect("add var sweep_mode");
            var.put_values(&bytes, ..).expect("put sweep modes");
        }

        // Scalar site variables.
        if let Some((latitude, longitude, altitude)) = self.position {
            for (name, value) in [
                ("latitude", latitude),
                ("longitude", longitude),
                ("altitude", altitude),
            ] {
                let mut var = file
                    .add_variable::<f64>(name, &[])
                    .expect("add scalar variable");
                var.put_values(&[value], ..).expect("put scalar value");
            }
        }
        if let Some(hz) = self.frequency {
            let mut var = file
                .add_variable::<f64>("frequency", &[])
                .expect("add var frequency");
            var.put_values(&[hz], ..).expect("put frequency");
        }

        // Moments over (time, range).
        for spec in &self.moments {
            let expected = n_rays * self.gates;
            match spec {
                MomentSpec::I16 {
                    name,
                    units,
                    scale,
                    offset,
                    fill,
                    values,
                } => {
                    assert_eq!(values.len(), expected, "moment '{}' size", spec.name());
                    let mut var = file
                        .add_variable::<i16>(name, &["time", "range"])
                        .expect("add i16 moment");
                    var.put_attribute("_FillValue", *fill).expect("add _FillValue");
                    var.put_attribute("scale_factor", *scale)
                        .expect("add scale_factor");
                    var.put_attribute("add_offset", *offset)
                        .expect("add add_offset");
                    if let Some(units) = units {
                        var.put_attribute("units", units.as_str()).expect("add units");
                    }
                    var.put_values(values, ..).expect("put moment values");
                }
                MomentSpec::F32 {
                    name,
                    units,
                    fill,
                    legacy_fill_attr,
                    values,
                } => {
                    assert_eq!(values.len(), expected, "moment '{}' size", spec.name());
                    let mut var = file
                        .add_variable::<f32>(name, &["time", "range"])
                        .expect("add f32 moment");
                    if let Some(fill) = fill {
                        let attr = if *legacy_fill_attr {
                            "missing_value"
                        } else {
                            "_FillValue"
                        };
                        var.put_attribute(attr, *fill).expect("add fill attribute");
                    }
                    if let Some(units) = units {
                        var.put_attribute("units", units.as_str()).expect("add units");
                    }
                    var.put_values(values, ..).expect("put moment values");
                }
            }
        }

        path
    }
}
