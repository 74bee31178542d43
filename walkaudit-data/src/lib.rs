//! Loading of the town and audit GeoJSON layers.
//!
//! Responsibilities:
//! - Open input files through `cap-std` and decode them with `serde_json`.
//! - Map IO and decoding failures to [`LoadError`], naming the layer and path.
//!
//! Boundaries:
//! - Do not encode reconciliation rules (live in `walkaudit-core`).
//! - Irregular records inside a valid collection are not errors here.
#![forbid(unsafe_code)]

use std::fmt;
use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use log::{info, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;
use walkaudit_core::{AuditCollection, FeatureCollection, TownCollection};

mod source;

pub use source::{SourceKind, inspect_source, open_utf8_file};

/// The two input layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Municipal boundaries.
    Towns,
    /// Walk audits.
    Audits,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Towns => "towns",
            Self::Audits => "audits",
        })
    }
}

/// Errors returned when loading a layer.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to open {layer} layer at {path}")]
    Open {
        /// Layer being loaded.
        layer: Layer,
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a JSON feature collection with a `features` array.
    #[error("failed to parse {layer} layer at {path} as a GeoJSON feature collection")]
    Parse {
        /// Layer being loaded.
        layer: Layer,
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Layer the failure belongs to.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        match self {
            Self::Open { layer, .. } | Self::Parse { layer, .. } => *layer,
        }
    }
}

/// Both layers, fully loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Layers {
    /// Municipal boundaries.
    pub towns: TownCollection,
    /// Walk audits.
    pub audits: AuditCollection,
}

/// Load a feature collection of `P` properties from `path`.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use walkaudit_core::TownProperties;
/// use walkaudit_data::{Layer, load_collection};
///
/// # fn main() -> Result<(), walkaudit_data::LoadError> {
/// let towns = load_collection::<TownProperties>(Utf8Path::new("towns.geojson"), Layer::Towns)?;
/// println!("Towns Features: {}", towns.len());
/// # Ok(())
/// # }
/// ```
pub fn load_collection<P: DeserializeOwned>(
    path: &Utf8Path,
    layer: Layer,
) -> Result<FeatureCollection<P>, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::Open {
        layer,
        path: path.to_path_buf(),
        source,
    })?;
    let collection: FeatureCollection<P> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| LoadError::Parse {
            layer,
            path: path.to_path_buf(),
            source,
        })?;

    info!("loaded {} {layer} features from {path}", collection.len());
    let without_properties = collection.features_without_properties().count();
    if without_properties > 0 {
        warn!("{without_properties} {layer} features in {path} have no properties");
    }
    Ok(collection)
}

/// Load the town boundary layer.
pub fn load_towns(path: &Utf8Path) -> Result<TownCollection, LoadError> {
    load_collection(path, Layer::Towns)
}

/// Load the walk audit layer.
pub fn load_audits(path: &Utf8Path) -> Result<AuditCollection, LoadError> {
    load_collection(path, Layer::Audits)
}

/// Load both layers, towns first. The first failure aborts the load.
pub fn load_layers(towns: &Utf8Path, audits: &Utf8Path) -> Result<Layers, LoadError> {
    Ok(Layers {
        towns: load_towns(towns)?,
        audits: load_audits(audits)?,
    })
}
