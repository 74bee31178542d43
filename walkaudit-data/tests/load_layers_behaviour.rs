//! Behavioural tests for `load_layers`.

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::{cell::RefCell, fs};
use tempfile::TempDir;
use walkaudit_data::{Layer, Layers, LoadError, load_layers};

/// Scratch directory plus the paths chosen by the scenario.
struct LayerFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
    towns: RefCell<Option<Utf8PathBuf>>,
    audits: RefCell<Option<Utf8PathBuf>>,
}

impl LayerFiles {
    fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
        path
    }

    fn path(slot: &RefCell<Option<Utf8PathBuf>>) -> Utf8PathBuf {
        slot.borrow()
            .clone()
            .unwrap_or_else(|| panic!("layer path must be chosen first"))
    }
}

fn collection_with(features: usize) -> String {
    let feature = r#"{"type":"Feature","properties":{"TOWN_ID":1,"CITY":"SALEM"},"geometry":null}"#;
    let body = vec![feature; features].join(",");
    format!(r#"{{"type":"FeatureCollection","features":[{body}]}}"#)
}

#[fixture]
fn files() -> LayerFiles {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("create temporary directory: {err}"));
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("non UTF-8 temporary directory {path:?}"));
    LayerFiles {
        _dir: dir,
        root,
        towns: RefCell::new(None),
        audits: RefCell::new(None),
    }
}

#[fixture]
fn load_result() -> RefCell<Option<Result<Layers, LoadError>>> {
    RefCell::new(None)
}

#[given("a towns layer with {count} features")]
fn towns_layer(count: usize, #[from(files)] files: &LayerFiles) {
    let path = files.write("towns.geojson", &collection_with(count));
    files.towns.replace(Some(path));
}

#[given("an audits layer with {count} features")]
fn audits_layer(count: usize, #[from(files)] files: &LayerFiles) {
    let path = files.write("audits.geojson", &collection_with(count));
    files.audits.replace(Some(path));
}

#[given("a path to a missing towns layer")]
fn missing_towns(#[from(files)] files: &LayerFiles) {
    files.towns.replace(Some(files.root.join("absent.geojson")));
}

#[given("an audits layer containing invalid JSON")]
fn invalid_audits(#[from(files)] files: &LayerFiles) {
    let path = files.write("audits.geojson", "{ \"features\": [");
    files.audits.replace(Some(path));
}

#[when("I load the layers")]
fn load(
    #[from(files)] files: &LayerFiles,
    #[from(load_result)] result: &RefCell<Option<Result<Layers, LoadError>>>,
) {
    let towns = LayerFiles::path(&files.towns);
    let audits = LayerFiles::path(&files.audits);
    result.replace(Some(load_layers(&towns, &audits)));
}

fn expect_layers(result: &RefCell<Option<Result<Layers, LoadError>>>) -> Layers {
    match result.borrow().as_ref() {
        Some(Ok(layers)) => layers.clone(),
        Some(Err(err)) => panic!("expected layers to load, got {err}"),
        None => panic!("layers were not loaded"),
    }
}

fn expect_failure(result: &RefCell<Option<Result<Layers, LoadError>>>) -> (Layer, bool) {
    match result.borrow().as_ref() {
        Some(Err(err)) => (err.layer(), matches!(err, LoadError::Open { .. })),
        Some(Ok(_)) => panic!("expected loading to fail"),
        None => panic!("layers were not loaded"),
    }
}

#[then("the towns layer has {count} features")]
fn towns_count(
    count: usize,
    #[from(load_result)] result: &RefCell<Option<Result<Layers, LoadError>>>,
) {
    assert_eq!(expect_layers(result).towns.len(), count);
}

#[then("the audits layer has {count} features")]
fn audits_count(
    count: usize,
    #[from(load_result)] result: &RefCell<Option<Result<Layers, LoadError>>>,
) {
    assert_eq!(expect_layers(result).audits.len(), count);
}

#[then("loading fails to open the towns layer")]
fn open_failure(#[from(load_result)] result: &RefCell<Option<Result<Layers, LoadError>>>) {
    assert_eq!(expect_failure(result), (Layer::Towns, true));
}

#[then("loading fails to parse the audits layer")]
fn parse_failure(#[from(load_result)] result: &RefCell<Option<Result<Layers, LoadError>>>) {
    assert_eq!(expect_failure(result), (Layer::Audits, false));
}

#[scenario(path = "tests/features/load_layers.feature", index = 0)]
fn loading_well_formed_layers(
    files: LayerFiles,
    load_result: RefCell<Option<Result<Layers, LoadError>>>,
) {
    let _ = (files, load_result);
}

#[scenario(path = "tests/features/load_layers.feature", index = 1)]
fn reporting_missing_towns(
    files: LayerFiles,
    load_result: RefCell<Option<Result<Layers, LoadError>>>,
) {
    let _ = (files, load_result);
}

#[scenario(path = "tests/features/load_layers.feature", index = 2)]
fn rejecting_invalid_audits(
    files: LayerFiles,
    load_result: RefCell<Option<Result<Layers, LoadError>>>,
) {
    let _ = (files, load_result);
}
