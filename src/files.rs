use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::generate;
use crate::model::{DescriptionsFile, OverridesFile, SpellBatch};

/// Load one raw batch file. Batches are the pipeline's input; a batch
/// that cannot be read or parsed aborts the run.
pub fn read_batch(path: &Path) -> Result<SpellBatch> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid batch file {}", path.display()))
}

/// Load the manual corrections file. Unlike batches this file is
/// optional: a missing, unreadable, or malformed file means "no
/// overrides", never a failed run.
pub fn read_overrides(path: &Path) -> Option<OverridesFile> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("No overrides file at {}", path.display());
            return None;
        }
        Err(err) => {
            warn!("Failed to read overrides file {}: {}", path.display(), err);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(overrides) => {
            info!("Loaded overrides from {}", path.display());
            Some(overrides)
        }
        Err(err) => {
            warn!("Ignoring malformed overrides file {}: {}", path.display(), err);
            None
        }
    }
}

/// Write a descriptions file as pretty-printed JSON with a trailing
/// newline, creating parent directories as needed.
pub fn write_descriptions(path: &Path, descriptions: &DescriptionsFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(descriptions)
        .context("Failed to serialize spell descriptions")?;
    json.push('\n');
    fs::write(path, json)
        .with_context(|| format!("Failed to write descriptions file {}", path.display()))
}

/// Derive the output file name from a batch file name:
/// `wizardSpells.json` becomes `wizardSpellsDescriptions.json`.
pub fn output_name(input: &Path) -> String {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("spells");
    format!("{}Descriptions.json", stem)
}

/// Load a previously generated descriptions file, for the inspection
/// commands.
pub fn read_descriptions(path: &Path) -> Result<DescriptionsFile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptions file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid descriptions file {}", path.display()))
}

/// Per-batch outcome of a generate run, for the caller's summary lines.
#[derive(Debug)]
pub struct BatchSummary {
    pub out_path: PathBuf,
    pub spells: usize,
    pub errors: usize,
}

/// Full generate run: load overrides once, then turn each batch file
/// into a descriptions file in `out_dir`.
///
/// Every batch is read and validated before the first output is
/// written; a batch that fails to read or parse aborts the run with
/// nothing on disk.
pub fn run_generate(
    inputs: &[PathBuf],
    out_dir: &Path,
    overrides_path: &Path,
) -> Result<Vec<BatchSummary>> {
    let overrides_file = read_overrides(overrides_path);

    let mut batches = Vec::with_capacity(inputs.len());
    for input in inputs {
        batches.push((input, read_batch(input)?));
    }

    let mut summaries = Vec::with_capacity(batches.len());
    for (input, batch) in &batches {
        let out_path = out_dir.join(output_name(input));
        let descriptions = generate::generate_descriptions(batch, overrides_file.as_ref());
        write_descriptions(&out_path, &descriptions)?;
        summaries.push(BatchSummary {
            out_path,
            spells: descriptions.spells_by_title.len(),
            errors: descriptions.errors.len(),
        });
    }
    Ok(summaries)
}

// ── Tests ──
