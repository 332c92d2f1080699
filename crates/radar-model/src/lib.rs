//! Common data model shared across the radar-volumes workspace.
//!
//! These types describe a decoded weather-radar volume in a
//! format-agnostic way: a volume owns an ordered sequence of sweeps, a
//! sweep owns its coordinate arrays and a set of named moments, and a
//! moment owns a 2-D (ray, gate) array of physical values. Decoding
//! lives in the `cfradial-parser` crate; nothing here touches files.

pub mod moment;
pub mod sweep;
pub mod types;
pub mod volume;

pub use moment::{MomentData, NO_DATA};
pub use sweep::SweepData;
pub use types::{moments, MomentDescriptor, PlatformType, SweepMode};
pub use volume::{VolumeData, VolumeMetadata};
