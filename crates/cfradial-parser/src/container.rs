//! Session-scoped access to the underlying netCDF container.
//!
//! Everything here is CfRadial1-agnostic: it opens the file, hands out
//! dimensions, attributes, and typed variable payloads, and maps netCDF
//! failures onto the crate's error kinds. The open handle is released
//! when the session drops, on every exit path.

use std::path::{Path, PathBuf};

use netcdf::AttributeValue;
use tracing::trace;

use crate::error::{CfRadialError, Result};

/// An open read session on one netCDF file.
pub(crate) struct Container {
    file: netcdf::File,
    path: PathBuf,
}

impl Container {
    /// Open `path`, failing with `NotFound` if it does not exist and
    /// `Format` if it is not a valid netCDF container.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CfRadialError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::open(path).map_err(|e| CfRadialError::Format {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path of the open file, for error context.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Length of a dimension, if it exists.
    pub(crate) fn dimension_len(&self, name: &str) -> Option<usize> {
        self.file.dimension(name).map(|d| d.len())
    }

    /// Whether a variable exists in the container.
    pub(crate) fn has_variable(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    /// Names of all variables together with their dimension names.
    pub(crate) fn variable_dims(&self) -> Vec<(String, Vec<String>)> {
        self.file
            .variables()
            .map(|var| {
                let dims = var.dimensions().iter().map(|d| d.name()).collect();
                (var.name(), dims)
            })
            .collect()
    }

    /// A global string attribute, if present and string-typed.
    pub(crate) fn global_str_attr(&self, name: &str) -> Option<String> {
        self.file
            .attributes()
            .find(|a| a.name() == name)
            .and_then(|a| a.value().ok())
            .and_then(|v| attr_to_string(&v))
    }

    /// A string attribute on a variable, if present and string-typed.
    pub(crate) fn var_str_attr(&self, var: &str, attr: &str) -> Option<String> {
        let var = self.file.variable(var)?;
        var.attributes()
            .find(|a| a.name() == attr)
            .and_then(|a| a.value().ok())
            .and_then(|v| attr_to_string(&v))
    }

    /// A numeric attribute on a variable, widened to f64, if present.
    pub(crate) fn var_f64_attr(&self, var: &str, attr: &str) -> Option<f64> {
        let var = self.file.variable(var)?;
        var.attributes()
            .find(|a| a.name() == attr)
            .and_then(|a| a.value().ok())
            .and_then(|v| attr_to_f64(&v))
    }

    /// Read a whole variable as f64 values (scalar variables yield one
    /// element). Fails with `Schema` if the variable is absent.
    pub(crate) fn read_f64s(&self, name: &str) -> Result<Vec<f64>> {
        let var = self.require_variable(name)?;
        trace!(variable = name, "reading full variable");
        var.get_values::<f64, _>(..)
            .map_err(|e| self.read_failure(name, e))
    }

    /// Read a whole variable as f32 values.
    pub(crate) fn read_f32s(&self, name: &str) -> Result<Vec<f32>> {
        let var = self.require_variable(name)?;
        trace!(variable = name, "reading full variable");
        var.get_values::<f32, _>(..)
            .map_err(|e| self.read_failure(name, e))
    }

    /// Read a whole variable as i32 values.
    pub(crate) fn read_i32s(&self, name: &str) -> Result<Vec<i32>> {
        let var = self.require_variable(name)?;
        trace!(variable = name, "reading full variable");
        var.get_values::<i32, _>(..)
            .map_err(|e| self.read_failure(name, e))
    }

    /// Read rows `start..=end` of a 2-D variable (all columns), widened
    /// to f64, without touching unrelated rows. Returns the values along
    /// with the declared column count.
    pub(crate) fn read_rows_f64(
        &self,
        name: &str,
        start: usize,
        end: usize,
    ) -> Result<(Vec<f64>, usize)> {
        let var = self.require_variable(name)?;
        let dims = var.dimensions();
        if dims.len() != 2 {
            return Err(CfRadialError::Decode {
                path: self.path.clone(),
                variable: name.to_string(),
                sweep: None,
                reason: format!("expected 2 dimensions, found {}", dims.len()),
            });
        }
        let cols = dims[1].len();
        trace!(variable = name, start, end, cols, "reading row slice");
        let values = var
            .get_values::<f64, _>((start..end + 1, ..))
            .map_err(|e| self.read_failure(name, e))?;
        Ok((values, cols))
    }

    /// Read one row of a 2-D text variable (e.g. `sweep_mode`, stored as
    /// per-sweep character arrays) as a trimmed string. Any failure —
    /// absent variable, wrong rank, unreadable payload — yields `None`;
    /// these variables are descriptive, never required.
    pub(crate) fn read_row_text(&self, name: &str, row: usize) -> Option<String> {
        let var = self.file.variable(name)?;
        if var.dimensions().len() != 2 || row >= var.dimensions()[0].len() {
            return None;
        }
        let bytes = var.get_values::<u8, _>((row..row + 1, ..)).ok()?;
        let text: String = String::from_utf8_lossy(&bytes)
            .trim_end_matches(|c| c == '\0' || c == ' ')
            .to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn require_variable(&self, name: &str) -> Result<netcdf::Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| CfRadialError::Schema {
                path: self.path.clone(),
                element: format!("variable '{name}'"),
            })
    }

    fn read_failure(&self, name: &str, e: netcdf::Error) -> CfRadialError {
        CfRadialError::Format {
            path: self.path.clone(),
            reason: format!("failed to read variable '{name}': {e}"),
        }
    }
}

/// Widen a scalar attribute value to f64. Single-element array
/// attributes are accepted; strings and longer arrays are not.
fn attr_to_f64(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Uchar(v) => Some(f64::from(*v)),
        AttributeValue::Schar(v) => Some(f64::from(*v)),
        AttributeValue::Ushort(v) => Some(f64::from(*v)),
        AttributeValue::Short(v) => Some(f64::from(*v)),
        AttributeValue::Uint(v) => Some(f64::from(*v)),
        AttributeValue::Int(v) => Some(f64::from(*v)),
        AttributeValue::Ulonglong(v) => Some(*v as f64),
        AttributeValue::Longlong(v) => Some(*v as f64),
        AttributeValue::Float(v) => Some(f64::from(*v)),
        AttributeValue::Double(v) => Some(*v),
        AttributeValue::Uchars(v) if v.len() == 1 => Some(f64::from(v[0])),
        AttributeValue::Schars(v) if v.len() == 1 => Some(f64::from(v[0])),
        AttributeValue::Ushorts(v) if v.len() == 1 => Some(f64::from(v[0])),
        AttributeValue::Shorts(v) if v.len() == 1 => Some(f64::from(v[0])),
        AttributeValue::Uints(v) if v.len() == 1 => Some(f64::from(v[0])),
        AttributeValue::Ints(v) if v.len() == 1 => Some(f64::from(v[0])),
        AttributeValue::Ulonglongs(v) if v.len() == 1 => Some(v[0] as f64),
        AttributeValue::Longlongs(v) if v.len() == 1 => Some(v[0] as f64),
        AttributeValue::Floats(v) if v.len() == 1 => Some(f64::from(v[0])),
        AttributeValue::Doubles(v) if v.len() == 1 => Some(v[0]),
        _ => None,
    }
}

/// Extract a string attribute value. Byte-array attributes (seen in
/// older writers) are decoded lossily.
fn attr_to_string(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::Str(s) => Some(s.clone()),
        AttributeValue::Strs(v) => v.first().cloned(),
        AttributeValue::Uchars(v) => Some(String::from_utf8_lossy(v).to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_to_f64_widens_numeric_variants() {
        assert_eq!(attr_to_f64(&AttributeValue::Short(-32768)), Some(-32768.0));
        assert_eq!(attr_to_f64(&AttributeValue::Float(0.01)), Some(f64::from(0.01f32)));
        assert_eq!(attr_to_f64(&AttributeValue::Double(5.5)), Some(5.5));
        assert_eq!(attr_to_f64(&AttributeValue::Shorts(vec![-99])), Some(-99.0));
        assert_eq!(attr_to_f64(&AttributeValue::Str("x".into())), None);
        assert_eq!(attr_to_f64(&AttributeValue::Shorts(vec![1, 2])), None);
    }

    #[test]
    fn attr_to_string_accepts_byte_arrays() {
        assert_eq!(
            attr_to_string(&AttributeValue::Str("SPOL".into())),
            Some("SPOL".to_string())
        );
        assert_eq!(
            attr_to_string(&AttributeValue::Uchars(b"SPOL".to_vec())),
            Some("SPOL".to_string())
        );
        assert_eq!(attr_to_string(&AttributeValue::Double(1.0)), None);
    }
}
