//! Integration tests for full volume materialization.

use cfradial_parser::{read, read_sweep, scan, CfRadialError, SweepMode};
use tempfile::tempdir;
use test_utils::CfRadialFixture;

/// The packed-moment scenario: two sweeps spanning rays [0, 99] and
/// [100, 179], 500 gates, one i16 "DBZ" moment with scale 0.01 and fill
/// -32768.
fn packed_dbz_fixture() -> CfRadialFixture {
    let total = 180 * 500;
    let mut values = vec![500i16; total];
    // First gate of the first ray of sweep 1 is filled.
    values[100 * 500] = -32768;
    // A recognizable value in sweep 0.
    values[3] = 1500;

    CfRadialFixture::new()
        .with_gates(500)
        .with_sweep(0.5, 100)
        .with_sweep(1.5, 80)
        .with_i16_moment("DBZ", "dBZ", 0.01, 0.0, -32768, values)
}

#[test]
fn packed_moment_decodes_to_physical_values() {
    let dir = tempdir().unwrap();
    let path = packed_dbz_fixture().write(dir.path());

    let volume = read(&path).unwrap();
    assert_eq!(volume.num_sweeps(), 2);

    let sweep0 = volume.get_sweep(0).unwrap();
    let sweep1 = volume.get_sweep(1).unwrap();
    assert_eq!(sweep0.num_rays(), 100);
    assert_eq!(sweep1.num_rays(), 80);
    assert_eq!(sweep0.num_gates(), 500);

    let dbz0 = sweep0.get_moment("DBZ").unwrap();
    assert_eq!(dbz0.shape(), (100, 500));
    assert_eq!(dbz0.units, "dBZ");
    // raw 500 * 0.01 = 5.0
    assert_eq!(dbz0.data[[0, 0]], 5.0);
    // raw 1500 * 0.01 = 15.0
    assert_eq!(dbz0.data[[0, 3]], 15.0);

    let dbz1 = sweep1.get_moment("DBZ").unwrap();
    assert_eq!(dbz1.shape(), (80, 500));
    // The filled gate is the sentinel, never a finite number.
    assert!(dbz1.data[[0, 0]].is_nan());
    assert_eq!(dbz1.data[[0, 1]], 5.0);
}

#[test]
fn scan_and_read_agree() {
    let dir = tempdir().unwrap();
    let path = packed_dbz_fixture().write(dir.path());

    let meta = scan(&path).unwrap();
    let volume = read(&path).unwrap();

    assert_eq!(meta.num_sweeps, volume.num_sweeps());
    assert_eq!(meta, volume.metadata);
    let read_angles: Vec<f64> = volume.sweeps.iter().map(|s| s.fixed_angle).collect();
    assert_eq!(meta.sweep_fixed_angles, read_angles);
}

#[test]
fn coordinates_are_sliced_per_sweep() {
    let dir = tempdir().unwrap();
    let path = packed_dbz_fixture().write(dir.path());

    let volume = read(&path).unwrap();
    for sweep in &volume.sweeps {
        assert_eq!(sweep.azimuth.len(), sweep.num_rays());
        assert_eq!(sweep.elevation.len(), sweep.num_rays());
        assert_eq!(sweep.time.len(), sweep.num_rays());
        assert!(sweep.validate().is_ok());
    }

    // Sweep 1 starts at flat ray 100, so its first azimuth is 100 deg
    // with the fixture's ray-index pattern.
    let sweep1 = volume.get_sweep(1).unwrap();
    assert_eq!(sweep1.azimuth[0], CfRadialFixture::azimuth_for_ray(100));
    assert_eq!(sweep1.elevation[0], 1.5);
    // Range is shared across sweeps.
    assert_eq!(volume.get_sweep(0).unwrap().range, sweep1.range);
    assert_eq!(sweep1.range[1], 250.0);
}

#[test]
fn read_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = packed_dbz_fixture().write(dir.path());

    let first = read(&path).unwrap();
    let second = read(&path).unwrap();

    assert_eq!(first.metadata, second.metadata);
    for (a, b) in first.sweeps.iter().zip(&second.sweeps) {
        assert_eq!(a.azimuth, b.azimuth);
        let ma = a.get_moment("DBZ").unwrap();
        let mb = b.get_moment("DBZ").unwrap();
        assert_eq!(ma.shape(), mb.shape());
        // Bitwise comparison: NaN sentinels must match too.
        for (x, y) in ma.data.iter().zip(mb.data.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}

#[test]
fn get_sweep_out_of_range_is_none() {
    let dir = tempdir().unwrap();
    let path = packed_dbz_fixture().write(dir.path());

    let volume = read(&path).unwrap();
    assert!(volume.get_sweep(2).is_none());
    assert!(volume.get_sweep(usize::MAX).is_none());
}

#[test]
fn moment_names_are_ordered_and_exact() {
    let dir = tempdir().unwrap();
    let rays = 360;
    let gates = 100;
    let path = CfRadialFixture::new()
        .with_gates(gates)
        .with_f32_moment("VEL", Some("m/s"), None, vec![1.0; rays * gates])
        .with_f32_moment("DBZH", Some("dBZ"), None, vec![2.0; rays * gates])
        .write(dir.path());

    let volume = read(&path).unwrap();
    let sweep = volume.get_sweep(0).unwrap();
    assert_eq!(sweep.moment_names(), vec!["DBZH", "VEL"]);
    assert!(sweep.get_moment("DBZH").is_some());
    // Lookups are exact and case-sensitive; no alias fallback.
    assert!(sweep.get_moment("dbzh").is_none());
    assert!(sweep.get_moment("DBZ").is_none());
}

#[test]
fn coordinates_and_auxiliaries_are_not_moments() {
    let dir = tempdir().unwrap();
    let rays = 360;
    let gates = 100;
    // A bookkeeping variable dimensioned like a moment must stay out of
    // the catalog.
    let path = CfRadialFixture::new()
        .with_gates(gates)
        .with_f32_moment("ray_gate_spacing", None, None, vec![250.0; rays * gates])
        .with_f32_moment("ZDR", Some("dB"), None, vec![0.5; rays * gates])
        .write(dir.path());

    let volume = read(&path).unwrap();
    let sweep = volume.get_sweep(0).unwrap();
    assert_eq!(sweep.moment_names(), vec!["ZDR"]);
    assert!(sweep.get_moment("azimuth").is_none());
    assert!(sweep.get_moment("range").is_none());
    assert!(sweep.get_moment("ray_gate_spacing").is_none());
}

#[test]
fn units_default_to_empty_string() {
    let dir = tempdir().unwrap();
    let rays = 360;
    let gates = 100;
    let path = CfRadialFixture::new()
        .with_gates(gates)
        .with_f32_moment("RHOHV", None, None, vec![0.9; rays * gates])
        .write(dir.path());

    let volume = read(&path).unwrap();
    let moment = volume.get_sweep(0).unwrap().get_moment("RHOHV").unwrap();
    assert_eq!(moment.units, "");
    assert_eq!(moment.data[[10, 10]], 0.9);
}

#[test]
fn unpacked_moment_fill_value_becomes_sentinel() {
    let dir = tempdir().unwrap();
    let rays = 360;
    let gates = 100;
    let mut values = vec![0.75f32; rays * gates];
    values[42] = -9999.0;
    let path = CfRadialFixture::new()
        .with_gates(gates)
        .with_f32_moment("NCP", None, Some(-9999.0), values)
        .write(dir.path());

    let volume = read(&path).unwrap();
    let moment = volume.get_sweep(0).unwrap().get_moment("NCP").unwrap();
    assert!(moment.data[[0, 42]].is_nan());
    assert_eq!(moment.data[[0, 41]], 0.75);
}

#[test]
fn legacy_missing_value_attribute_is_honored() {
    let dir = tempdir().unwrap();
    let rays = 360;
    let gates = 100;
    let mut values = vec![1.25f32; rays * gates];
    values[7] = -32768.0;
    let path = CfRadialFixture::new()
        .with_gates(gates)
        .with_f32_moment_legacy_fill("KDP", Some("degrees/km"), -32768.0, values)
        .write(dir.path());

    let volume = read(&path).unwrap();
    let moment = volume.get_sweep(0).unwrap().get_moment("KDP").unwrap();
    assert!(moment.data[[0, 7]].is_nan());
    assert_eq!(moment.data[[0, 8]], 1.25);
}

#[test]
fn sweep_modes_are_parsed_per_sweep() {
    let dir = tempdir().unwrap();
    let path = CfRadialFixture::new()
        .with_sweep(0.5, 100)
        .with_sweep(90.0, 80)
        .with_sweep_modes(&["azimuth_surveillance", "rhi"])
        .write(dir.path());

    let volume = read(&path).unwrap();
    assert_eq!(volume.get_sweep(0).unwrap().sweep_mode, SweepMode::Azimuth);
    assert_eq!(volume.get_sweep(1).unwrap().sweep_mode, SweepMode::Elevation);
}

#[test]
fn missing_time_coordinate_defaults_to_zeros() {
    let dir = tempdir().unwrap();
    let path = CfRadialFixture::new()
        .with_sweep(0.5, 12)
        .without_time_coordinate()
        .write(dir.path());

    let volume = read(&path).unwrap();
    let sweep = volume.get_sweep(0).unwrap();
    assert_eq!(sweep.time, vec![0.0; 12]);
}

#[test]
fn read_sweep_decodes_one_sweep() {
    let dir = tempdir().unwrap();
    let path = packed_dbz_fixture().write(dir.path());

    let sweep = read_sweep(&path, 1).unwrap();
    assert_eq!(sweep.sweep_index, 1);
    assert_eq!(sweep.sweep_number, 1);
    assert_eq!(sweep.num_rays(), 80);
    assert_eq!(sweep.fixed_angle, 1.5);
    let dbz = sweep.get_moment("DBZ").unwrap();
    assert_eq!(dbz.shape(), (80, 500));
    assert!(dbz.data[[0, 0]].is_nan());
}

#[test]
fn read_sweep_out_of_range_is_decode_error() {
    let dir = tempdir().unwrap();
    let path = packed_dbz_fixture().write(dir.path());

    let err = read_sweep(&path, 2).unwrap_err();
    match err {
        CfRadialError::Decode { sweep, .. } => assert_eq!(sweep, Some(2)),
        other => panic!("expected Decode, got {other:?}"),
    }
}
