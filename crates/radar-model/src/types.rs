//! Shared enumerations and the standard-moment registry.

use serde::{Deserialize, Serialize};

/// Antenna scanning mode for a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepMode {
    /// Azimuth surveillance (PPI).
    Azimuth,
    /// Elevation surveillance (RHI).
    Elevation,
    /// Sector scan.
    Sector,
    /// Fixed pointing.
    Pointing,
    /// Vertically pointing.
    VerticalPointing,
    /// Calibration scan.
    Calibration,
}

impl SweepMode {
    /// Parse the spellings seen in CfRadial1 `sweep_mode` entries.
    /// Unrecognized strings fall back to azimuth surveillance, the
    /// overwhelmingly common mode.
    pub fn parse(mode: &str) -> Self {
        match mode.trim().to_lowercase().as_str() {
            "azimuth_surveillance" | "ppi" | "sur" => SweepMode::Azimuth,
            "elevation_surveillance" | "rhi" => SweepMode::Elevation,
            "sector" | "sec" => SweepMode::Sector,
            "pointing" | "pnt" => SweepMode::Pointing,
            "vertical_pointing" | "vert" => SweepMode::VerticalPointing,
            "calibration" | "cal" => SweepMode::Calibration,
            _ => SweepMode::Azimuth,
        }
    }
}

/// Platform carrying the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformType {
    /// Fixed ground station.
    Fixed,
    /// Mobile ground vehicle.
    Vehicle,
    /// Ship.
    Ship,
    /// Aircraft.
    Aircraft,
    /// Satellite.
    Satellite,
}

impl PlatformType {
    /// Parse a `platform_type` attribute value. Unknown spellings yield
    /// `None` rather than guessing.
    pub fn parse(platform: &str) -> Option<Self> {
        match platform.trim().to_lowercase().as_str() {
            "fixed" => Some(PlatformType::Fixed),
            "vehicle" => Some(PlatformType::Vehicle),
            "ship" => Some(PlatformType::Ship),
            "aircraft" => Some(PlatformType::Aircraft),
            "satellite" => Some(PlatformType::Satellite),
            _ => None,
        }
    }
}

/// Standard moment names from the CF/Radial conventions.
pub mod moments {
    /// Reflectivity, horizontal channel.
    pub const DBZH: &str = "DBZH";
    /// Reflectivity, vertical channel.
    pub const DBZV: &str = "DBZV";
    /// Radial velocity, horizontal channel.
    pub const VRADH: &str = "VRADH";
    /// Radial velocity, vertical channel.
    pub const VRADV: &str = "VRADV";
    /// Doppler spectrum width, horizontal channel.
    pub const WRADH: &str = "WRADH";
    /// Differential reflectivity.
    pub const ZDR: &str = "ZDR";
    /// Differential propagation phase.
    pub const PHIDP: &str = "PHIDP";
    /// Specific differential phase.
    pub const KDP: &str = "KDP";
    /// Cross-correlation coefficient.
    pub const RHOHV: &str = "RHOHV";
    /// Normalized coherent power.
    pub const NCP: &str = "NCP";
    /// Signal-to-noise ratio, horizontal channel.
    pub const SNRH: &str = "SNRH";
}

/// Descriptive metadata for a standard moment name.
///
/// This is a lookup table only: it describes what well-known names mean
/// and never renames or aliases decoded fields. Name-based aliasing
/// (e.g. trying "DBZ" then "DBZH") is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MomentDescriptor {
    /// Canonical short name.
    pub name: &'static str,
    /// CF standard name.
    pub standard_name: &'static str,
    /// Long descriptive name.
    pub long_name: &'static str,
    /// Conventional units.
    pub units: &'static str,
}

impl MomentDescriptor {
    /// Look up the descriptor for a standard moment name, accepting the
    /// common legacy spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DBZH" | "DBZ" | "reflectivity" => Some(Self {
                name: moments::DBZH,
                standard_name: "equivalent_reflectivity_factor",
                long_name: "Equivalent reflectivity factor (horizontal channel)",
                units: "dBZ",
            }),
            "VRADH" | "VEL" | "velocity" => Some(Self {
                name: moments::VRADH,
                standard_name: "radial_velocity_of_scatterers_away_from_instrument",
                long_name: "Radial velocity (horizontal channel)",
                units: "m/s",
            }),
            "WRADH" | "WIDTH" | "spectrum_width" => Some(Self {
                name: moments::WRADH,
                standard_name: "doppler_spectrum_width",
                long_name: "Doppler spectrum width (horizontal channel)",
                units: "m/s",
            }),
            "ZDR" => Some(Self {
                name: moments::ZDR,
                standard_name: "differential_reflectivity_hv",
                long_name: "Differential reflectivity",
                units: "dB",
            }),
            "PHIDP" => Some(Self {
                name: moments::PHIDP,
                standard_name: "differential_phase_hv",
                long_name: "Differential propagation phase",
                units: "degrees",
            }),
            "KDP" => Some(Self {
                name: moments::KDP,
                standard_name: "specific_differential_phase_hv",
                long_name: "Specific differential phase",
                units: "degrees/km",
            }),
            "RHOHV" => Some(Self {
                name: moments::RHOHV,
                standard_name: "cross_correlation_ratio_hv",
                long_name: "Cross-correlation coefficient",
                units: "",
            }),
            "NCP" => Some(Self {
                name: moments::NCP,
                standard_name: "normalized_coherent_power",
                long_name: "Normalized coherent power",
                units: "",
            }),
            "SNRH" | "SNR" => Some(Self {
                name: moments::SNRH,
                standard_name: "signal_to_noise_ratio",
                long_name: "Signal-to-noise ratio (horizontal channel)",
                units: "dB",
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_mode_parses_cfradial_spellings() {
        assert_eq!(SweepMode::parse("azimuth_surveillance"), SweepMode::Azimuth);
        assert_eq!(SweepMode::parse("RHI"), SweepMode::Elevation);
        assert_eq!(SweepMode::parse(" sector "), SweepMode::Sector);
        assert_eq!(SweepMode::parse("vertical_pointing"), SweepMode::VerticalPointing);
        // Unknown spellings fall back to azimuth surveillance.
        assert_eq!(SweepMode::parse("mystery_mode"), SweepMode::Azimuth);
    }

    #[test]
    fn platform_type_rejects_unknown() {
        assert_eq!(PlatformType::parse("fixed"), Some(PlatformType::Fixed));
        assert_eq!(PlatformType::parse("Ship"), Some(PlatformType::Ship));
        assert_eq!(PlatformType::parse("submarine"), None);
    }

    #[test]
    fn descriptor_lookup_accepts_legacy_names() {
        let dbz = MomentDescriptor::from_name("DBZ").unwrap();
        assert_eq!(dbz.name, "DBZH");
        assert_eq!(dbz.units, "dBZ");

        let vel = MomentDescriptor::from_name("VEL").unwrap();
        assert_eq!(vel.name, "VRADH");

        assert!(MomentDescriptor::from_name("NOT_A_MOMENT").is_none());
    }
}
