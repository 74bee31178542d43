//! Rendering of the verification report.

use std::fmt::Display;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use walkaudit_core::{AuditSample, IdKind, UnmatchedAudit};

use crate::CliError;
use crate::verify::VerifyReport;

/// Report formats accepted by `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One labelled line per statistic.
    #[default]
    Text,
    /// A single pretty-printed JSON document.
    Json,
}

pub(crate) fn write_report(
    writer: &mut dyn Write,
    report: &VerifyReport,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => render_text(writer, report).map_err(CliError::WriteReport),
        OutputFormat::Json => write_json(writer, report),
    }
}

fn write_json(writer: &mut dyn Write, report: &VerifyReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

fn or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "none".to_owned(), |inner| inner.to_string())
}

pub(crate) fn render_text(writer: &mut dyn Write, report: &VerifyReport) -> io::Result<()> {
    let summary = &report.summary;
    let profile = &report.profile;

    writeln!(writer, "Towns: {}", report.towns_path)?;
    writeln!(writer, "Audits: {}", report.audits_path)?;
    writeln!(writer, "Towns Features: {}", summary.towns)?;
    writeln!(writer, "Audits Features: {}", summary.audits)?;
    writeln!(writer, "Unique Town IDs: {}", summary.unique_town_ids)?;
    writeln!(writer, "Duplicate Town IDs: {}", summary.duplicate_town_ids)?;
    writeln!(writer, "Mapped Town Names: {}", summary.mapped_town_names)?;

    let kinds: Vec<&str> = profile
        .town_id_kinds
        .iter()
        .map(|kind| IdKind::as_str(*kind))
        .collect();
    writeln!(writer, "Town ID Types in Towns: [{}]", kinds.join(", "))?;
    match profile.town_id_range {
        Some(range) => writeln!(writer, "Town ID Range: {} to {}", range.min, range.max)?,
        None => writeln!(writer, "Town ID Range: none")?,
    }
    match profile.town_extent {
        Some(extent) => writeln!(
            writer,
            "Town Extent: lon {} to {}, lat {} to {}",
            extent.min().x,
            extent.max().x,
            extent.min().y,
            extent.max().y
        )?,
        None => writeln!(writer, "Town Extent: none")?,
    }

    for sample in &profile.audit_samples {
        write_sample(writer, sample)?;
    }
    for unmatched in &summary.unmatched_audits {
        write_unmatched(writer, unmatched)?;
    }

    writeln!(writer, "Matched by ID: {}", summary.matched_by_id)?;
    writeln!(writer, "Matched by Name: {}", summary.matched_by_name)?;
    writeln!(writer, "Unmatched: {}", summary.unmatched)?;
    Ok(())
}

fn write_sample(writer: &mut dyn Write, sample: &AuditSample) -> io::Result<()> {
    writeln!(
        writer,
        "Audit Sample: Raw ID={} ({}), Processed={}",
        or_none(sample.raw_id.as_ref()),
        sample.raw_kind,
        or_none(sample.processed_id)
    )
}

fn write_unmatched(writer: &mut dyn Write, unmatched: &UnmatchedAudit) -> io::Result<()> {
    write!(
        writer,
        "Unmatched Audit: ID={}, Processed={}, Name={}",
        unmatched
            .raw_id
            .as_ref()
            .map_or_else(|| IdKind::Missing.to_string(), ToString::to_string),
        or_none(unmatched.attempted_id),
        unmatched.name
    )?;
    if let Some(hint) = &unmatched.hint {
        write!(
            writer,
            ", Hint={} (ID={}, Neighbourhood={})",
            hint.city, hint.town_id, hint.neighbourhood
        )?;
    }
    writeln!(writer)
}
