//! Shared test harness modules for the campus CLI.

use super::*;


/// Contents of the map export shared with the loader tests.
const CAMPUS_OSM: &str = include_str!("../../../campus-data/tests/fixtures/campus.osm");

fn utf8_path(path: &std::path::Path) -> camino::Utf8PathBuf {
    camino::Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("temporary paths are UTF-8")
}
