//! Integration tests for schema and decode failure paths.

use cfradial_parser::{read, scan, CfRadialError};
use tempfile::tempdir;
use test_utils::CfRadialFixture;

#[test]
fn read_missing_sweep_end_index_is_schema_error() {
    let dir = tempdir().unwrap();
    let path = CfRadialFixture::new()
        .without_sweep_end_index()
        .write(dir.path());

    // Never a partial volume: the read fails outright.
    let err = read(&path).unwrap_err();
    match err {
        CfRadialError::Schema { element, .. } => {
            assert!(element.contains("sweep_end_ray_index"));
        }
        other => panic!("expected Schema, got {other:?}"),
    }
}

#[test]
fn read_missing_sweep_start_index_is_schema_error() {
    let dir = tempdir().unwrap();
    let path = CfRadialFixture::new()
        .without_sweep_start_index()
        .write(dir.path());

    let err = read(&path).unwrap_err();
    assert!(
        matches!(err, CfRadialError::Schema { .. }),
        "expected Schema, got {err:?}",
    );
}

#[test]
fn read_missing_range_is_schema_error() {
    let dir = tempdir().unwrap();
    let path = CfRadialFixture::new().without_range().write(dir.path());

    let err = read(&path).unwrap_err();
    match err {
        CfRadialError::Schema { element, .. } => {
            assert!(element.contains("range"), "got '{element}'");
        }
        other => panic!("expected Schema, got {other:?}"),
    }
}

#[test]
fn scan_fails_the_same_way_as_read() {
    let dir = tempdir().unwrap();
    let path = CfRadialFixture::new()
        .without_sweep_end_index()
        .write(dir.path());

    let scan_err = scan(&path).unwrap_err();
    let read_err = read(&path).unwrap_err();
    assert!(matches!(scan_err, CfRadialError::Schema { .. }));
    assert!(matches!(read_err, CfRadialError::Schema { .. }));
}

#[test]
fn decode_error_names_variable_and_sweep() {
    let dir = tempdir().unwrap();
    // The Decode display format is part of the contract: actionable
    // failures name the file, the variable, and the sweep.
    let err = CfRadialError::Decode {
        path: dir.path().join("vol.nc"),
        variable: "DBZ".to_string(),
        sweep: Some(1),
        reason: "expected 40000 values, got 39000".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("DBZ"));
    assert!(message.contains("sweep 1"));
    assert!(message.contains("vol.nc"));
}
