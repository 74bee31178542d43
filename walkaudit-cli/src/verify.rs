//! Verify command implementation.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use walkaudit_core::{DatasetProfile, SummaryReport, reconcile};
use walkaudit_data::{Layers, SourceKind, inspect_source, load_layers};

use crate::report::{OutputFormat, write_report};
use crate::{ARG_AUDITS, ARG_DATA_DIR, ARG_FORMAT, ARG_SAMPLE_SIZE, ARG_TOWNS, CliError};

pub(crate) const DEFAULT_DATA_DIR: &str = "public/data";
pub(crate) const TOWNS_FILE: &str = "towns.geojson";
pub(crate) const AUDITS_FILE: &str = "audits.geojson";
pub(crate) const DEFAULT_SAMPLE_SIZE: usize = 5;

/// CLI arguments for the `verify` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the town boundary and walk audit GeoJSON layers, match \
                 every audit to a town by TOWN_ID or by normalised name, and \
                 report counts of matches, duplicates and unmatched audits. \
                 Paths can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Verify that walk audits reference known towns"
)]
#[ortho_config(prefix = "WALKAUDIT")]
pub(crate) struct VerifyArgs {
    /// Directory holding `towns.geojson` and `audits.geojson`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to the town boundary layer.
    #[arg(long = ARG_TOWNS, value_name = "path")]
    #[serde(default)]
    pub(crate) towns: Option<Utf8PathBuf>,
    /// Override the path to the walk audit layer.
    #[arg(long = ARG_AUDITS, value_name = "path")]
    #[serde(default)]
    pub(crate) audits: Option<Utf8PathBuf>,
    /// Report format.
    #[arg(long = ARG_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Number of leading audits whose identifiers are echoed in the report.
    #[arg(long = ARG_SAMPLE_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) sample_size: Option<usize>,
}

impl VerifyArgs {
    pub(crate) fn into_config(self) -> Result<VerifyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(VerifyConfig::from(merged))
    }
}

/// Resolved `verify` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VerifyConfig {
    /// Path to the town boundary layer.
    pub(crate) towns: Utf8PathBuf,
    /// Path to the walk audit layer.
    pub(crate) audits: Utf8PathBuf,
    /// Report format.
    pub(crate) format: OutputFormat,
    /// Number of audits to sample.
    pub(crate) sample_size: usize,
}

impl VerifyConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.towns, ARG_TOWNS)?;
        Self::require_existing(&self.audits, ARG_AUDITS)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match inspect_source(path) {
            Ok(SourceKind::File) => Ok(()),
            Ok(SourceKind::NotFile) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl From<VerifyArgs> for VerifyConfig {
    fn from(args: VerifyArgs) -> Self {
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
        let towns = args.towns.unwrap_or_else(|| data_dir.join(TOWNS_FILE));
        let audits = args.audits.unwrap_or_else(|| data_dir.join(AUDITS_FILE));
        Self {
            towns,
            audits,
            format: args.format.unwrap_or_default(),
            sample_size: args.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
        }
    }
}

/// Everything the `verify` command reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct VerifyReport {
    /// Town layer that was read.
    pub(crate) towns_path: Utf8PathBuf,
    /// Audit layer that was read.
    pub(crate) audits_path: Utf8PathBuf,
    /// Identifier and geometry diagnostics.
    pub(crate) profile: DatasetProfile,
    /// Reconciliation counts and unmatched audits.
    pub(crate) summary: SummaryReport,
}

impl VerifyReport {
    pub(crate) fn build(config: &VerifyConfig, layers: &Layers) -> Self {
        let towns = layers.towns.town_records();
        let audits = layers.audits.audit_records();
        let summary = reconcile(&towns, &audits);
        debug!(
            "reconciled {} audits: {} by id, {} by name, {} unmatched",
            summary.audits, summary.matched_by_id, summary.matched_by_name, summary.unmatched
        );
        Self {
            towns_path: config.towns.clone(),
            audits_path: config.audits.clone(),
            profile: DatasetProfile::build(&layers.towns, &layers.audits, config.sample_size),
            summary,
        }
    }
}

pub(crate) fn run_verify_with(args: VerifyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_verify_config(args)?;
    let report = execute_verify(&config)?;
    write_report(writer, &report, config.format)
}

pub(crate) fn resolve_verify_config(args: VerifyArgs) -> Result<VerifyConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_verify(config: &VerifyConfig) -> Result<VerifyReport, CliError> {
    let layers = load_layers(&config.towns, &config.audits)?;
    Ok(VerifyReport::build(config, &layers))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<VerifyConfig, CliError> {
    let merged = VerifyArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(VerifyConfig::from(merged))
}
