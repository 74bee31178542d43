//! Test helpers for writing GeoJSON layers to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub(super) const REFERENCE_TOWNS: &str = r#"{
  "type": "FeatureCollection",
  "name": "towns",
  "features": [
    {
      "type": "Feature",
      "properties": { "TOWN_ID": 1, "CITY": "Arlington", "POP2020": 46308 },
      "geometry": { "type": "Polygon", "coordinates": [[[-71.2, 42.4], [-71.1, 42.45], [-71.2, 42.4]]] }
    },
    {
      "type": "Feature",
      "properties": { "TOWN_ID": 2, "CITY": "Boston" },
      "geometry": { "type": "Polygon", "coordinates": [[[-71.1, 42.2], [-70.9, 42.4], [-71.1, 42.2]]] }
    }
  ]
}"#;

pub(super) const REFERENCE_AUDITS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "TOWN_ID": 1 } },
    { "type": "Feature", "properties": { "TOWN_ID": 0, "CITY/TOWN": "Boston" } },
    { "type": "Feature", "properties": { "TOWN_ID": 99, "CITY": "Nowhere" } }
  ]
}"#;

/// A scratch data directory holding `towns.geojson` and `audits.geojson`.
pub(super) struct DataDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl DataDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    /// A data directory populated with the reference towns and audits.
    pub(super) fn reference() -> Self {
        let data = Self::new();
        data.write("towns.geojson", REFERENCE_TOWNS);
        data.write("audits.geojson", REFERENCE_AUDITS);
        data
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn towns(&self) -> Utf8PathBuf {
        self.root.join("towns.geojson")
    }

    pub(super) fn audits(&self) -> Utf8PathBuf {
        self.root.join("audits.geojson")
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        write_utf8(&self.root.join(name), contents.as_bytes())
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) -> Utf8PathBuf {
    fs::write(path, contents).expect("write layer");
    path.to_path_buf()
}

/// Run the CLI with `args` after the program name, capturing the report.
pub(super) fn run_capture(args: &[&str]) -> (Result<(), crate::CliError>, String) {
    let mut invocation = vec!["walkaudit"];
    invocation.extend_from_slice(args);
    let mut output = Vec::new();
    let result = crate::run_from(invocation, &mut output);
    let text = String::from_utf8(output).expect("report is UTF-8");
    (result, text)
}
