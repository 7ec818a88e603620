use std::collections::BTreeMap;

use chrono::Utc;
use rayon::prelude::*;
use tracing::debug;

use crate::model::{
    DescriptionsFile, OverridesFile, PageError, SpellBatch, SpellDescription, SOURCE_WIKI,
};
use crate::overrides;
use crate::parser;

/// Diagnostic recorded when a later page resolves to an already-claimed
/// title identity.
pub const DUPLICATE_TITLE_MESSAGE: &str =
    "Duplicate title encountered while building spell descriptions";

/// Turn one batch (plus the optional corrections file) into one output
/// file.
///
/// The per-page transform (identity, exclusion check, parse, override
/// apply) is pure, so pages run in parallel. Results are then collected
/// sequentially in input order, which keeps "first page wins"
/// deterministic: a later page with a taken identity becomes an error
/// entry instead of a record. Page-level problems never abort the run.
pub fn generate_descriptions(
    batch: &SpellBatch,
    overrides_file: Option<&OverridesFile>,
) -> DescriptionsFile {
    let parsed: Vec<(String, SpellDescription)> = batch
        .pages
        .par_iter()
        .filter_map(|page| {
            let identity = page.title_identity();

            if let Some(ov) = overrides_file {
                if ov.exclude_titles.contains(&identity) {
                    debug!("Skipping excluded title: {}", identity);
                    return None;
                }
            }

            let mut desc = parser::parse_page(page);
            if let Some(entry) = overrides_file.and_then(|ov| ov.spells_by_title.get(&identity)) {
                overrides::apply(&mut desc, entry);
            }

            Some((identity, desc))
        })
        .collect();

    let mut spells_by_title = BTreeMap::new();
    let mut errors = Vec::new();

    for (identity, desc) in parsed {
        if spells_by_title.contains_key(&identity) {
            errors.push(PageError {
                title: identity,
                message: DUPLICATE_TITLE_MESSAGE.to_string(),
            });
            continue;
        }
        spells_by_title.insert(identity, desc);
    }

    DescriptionsFile {
        generated_at: Utc::now(),
        source: SOURCE_WIKI.to_string(),
        category_name: batch.category_name.clone(),
        spells_by_title,
        errors,
    }
}

// ── Tests ──
