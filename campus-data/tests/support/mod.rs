use std::{fs, io::Write, path::PathBuf};

use tempfile::{Builder, TempPath};

/// Epsilon for floating-point coordinate comparisons in tests.
const COORDINATE_EPSILON: f64 = 1.0e-7;

/// Directory containing the OSM XML fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture from [`fixtures_dir`] into a string.
pub fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| {
        panic!("failed to read fixture {path:?}: {err}");
    })
}

/// Write `contents` to a temporary `.osm` file.
pub fn write_temp_osm(stem: &str, contents: &str) -> TempPath {
    let mut tempfile = Builder::new()
        .prefix(stem)
        .suffix(".osm")
        .tempfile()
        .unwrap_or_else(|err| {
            panic!("failed to create temporary fixture for {stem}: {err}");
        });
    tempfile.write_all(contents.as_bytes()).unwrap_or_else(|err| {
        panic!("failed to write temporary fixture for {stem}: {err}");
    });
    tempfile.flush().unwrap_or_else(|err| {
        panic!("failed to flush temporary fixture for {stem}: {err}");
    });
    tempfile.into_temp_path()
}

/// Compare floating-point coordinates within a small epsilon.
#[expect(
    clippy::float_arithmetic,
    reason = "test delta computation requires float maths"
)]
pub fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= COORDINATE_EPSILON,
        "expected {expected}, got {actual} (|Δ| = {delta})"
    );
}
