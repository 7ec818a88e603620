use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin wiki the cached batches were fetched from. Recorded in every
/// output file for traceability.
pub const SOURCE_WIKI: &str = "https://adnd2e.fandom.com";

/// One fetched wiki page, as cached by the fetch stage.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub pageid: u64,
    /// MediaWiki page title; occasionally absent in cached batches.
    #[serde(default)]
    pub title: Option<String>,
    pub wikitext: String,
}

impl RawPage {
    /// Identity used to key, deduplicate, and look up overrides for this
    /// page: the title when known, else a synthetic `pageid:<id>`.
    pub fn title_identity(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("pageid:{}", self.pageid),
        }
    }
}

/// One fetch run's worth of raw pages for a single spell category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellBatch {
    pub category_name: String,
    pub pages: Vec<RawPage>,
}

/// Structured record parsed out of one page's wikitext.
///
/// `wikitext` carries the original page text verbatim so the artifact can
/// always be audited against its wiki source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellDescription {
    pub title: Option<String>,
    pub wikitext: String,
    /// Infobox fields, keyed case-sensitively as encountered on the page.
    pub infobox: BTreeMap<String, String>,
    /// Section bodies keyed by heading text; intro text lands under
    /// `"Introduction"`.
    pub sections: BTreeMap<String, String>,
}

/// Hand-curated corrections for one spell, applied after parsing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpellOverride {
    pub infobox: Option<BTreeMap<String, String>>,
    pub sections: Option<BTreeMap<String, String>>,
}

/// The optional corrections file maintained alongside the cached batches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverridesFile {
    /// Title identities to omit from output entirely.
    #[serde(default)]
    pub exclude_titles: HashSet<String>,
    /// Corrections keyed by title identity. Required: a file without this
    /// map is structurally invalid and treated as "no overrides".
    pub spells_by_title: HashMap<String, SpellOverride>,
}

/// Non-fatal problem attributed to one page of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageError {
    pub title: String,
    pub message: String,
}

/// Aggregate output for one batch: every surviving record plus the
/// non-fatal errors encountered while building them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionsFile {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub category_name: String,
    pub spells_by_title: BTreeMap<String, SpellDescription>,
    pub errors: Vec<PageError>,
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_prefers_title() {
        let page = RawPage {
            pageid: 7,
            title: Some("Fireball".into()),
            wikitext: String::new(),
        };
        assert_eq!(page.title_identity(), "Fireball");
    }

    #[test]
    fn identity_falls_back_to_pageid() {
        let page = RawPage {
            pageid: 42,
            title: None,
            wikitext: String::new(),
        };
        assert_eq!(page.title_identity(), "pageid:42");
    }

    #[test]
    fn batch_deserializes_with_null_title() {
        let json = r#"{
            "categoryName": "Wizard Spells",
            "pages": [
                { "pageid": 1, "title": "Fireball", "wikitext": "x" },
                { "pageid": 2, "title": null, "wikitext": "y" }
            ]
        }"#;
        let batch: SpellBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.category_name, "Wizard Spells");
        assert_eq!(batch.pages.len(), 2);
        assert_eq!(batch.pages[1].title, None);
    }

    #[test]
    fn overrides_file_requires_spells_map() {
        let missing = r#"{ "excludeTitles": ["Wish"] }"#;
        assert!(serde_json::from_str::<OverridesFile>(missing).is_err());

        let minimal = r#"{ "spellsByTitle": {} }"#;
        let parsed: OverridesFile = serde_json::from_str(minimal).unwrap();
        assert!(parsed.exclude_titles.is_empty());
    }
}
