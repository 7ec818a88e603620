use std::collections::{BTreeMap, HashMap};

use crate::model::{SpellDescription, SpellOverride};

/// Apply one correction entry to a parsed record.
///
/// Infobox fields merge under case-insensitive key identity; section
/// corrections replace or add by exact heading. Fields the entry does not
/// name are left alone: an override is a patch, not a wholesale
/// replacement.
pub fn apply(desc: &mut SpellDescription, entry: &SpellOverride) {
    if let Some(fields) = &entry.infobox {
        merge_infobox(&mut desc.infobox, fields);
    }
    if let Some(sections) = &entry.sections {
        for (heading, text) in sections {
            desc.sections.insert(heading.clone(), text.clone());
        }
    }
}

/// Merge override fields into the base infobox.
///
/// An override key that matches an existing key under any casing replaces
/// that key outright, so `Range` supersedes a previously extracted
/// `range` and the override's casing wins. Unmatched keys are added.
fn merge_infobox(base: &mut BTreeMap<String, String>, fields: &BTreeMap<String, String>) {
    let mut canonical: HashMap<String, String> = base
        .keys()
        .map(|key| (key.to_lowercase(), key.clone()))
        .collect();

    for (key, value) in fields {
        let lower = key.to_lowercase();
        if let Some(existing) = canonical.get(&lower) {
            if existing != key {
                base.remove(existing);
            }
        }
        base.insert(key.clone(), value.clone());
        canonical.insert(lower, key.clone());
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(infobox: &[(&str, &str)], sections: &[(&str, &str)]) -> SpellDescription {
        SpellDescription {
            title: Some("Fireball".into()),
            wikitext: String::new(),
            infobox: infobox
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            sections: sections
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn entry(infobox: &[(&str, &str)], sections: &[(&str, &str)]) -> SpellOverride {
        SpellOverride {
            infobox: (!infobox.is_empty()).then(|| {
                infobox
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            }),
            sections: (!sections.is_empty()).then(|| {
                sections
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            }),
        }
    }

    #[test]
    fn override_key_replaces_other_casing() {
        let mut d = desc(&[("range", "10 yds")], &[]);
        apply(&mut d, &entry(&[("Range", "100 yds")], &[]));

        assert_eq!(d.infobox.len(), 1);
        assert_eq!(d.infobox.get("Range").map(String::as_str), Some("100 yds"));
        assert!(!d.infobox.contains_key("range"));
    }

    #[test]
    fn unmatched_keys_are_added() {
        let mut d = desc(&[("Level", "3")], &[]);
        apply(&mut d, &entry(&[("Sphere", "Elemental")], &[]));

        assert_eq!(d.infobox.len(), 2);
        assert_eq!(d.infobox.get("Level").map(String::as_str), Some("3"));
        assert_eq!(
            d.infobox.get("Sphere").map(String::as_str),
            Some("Elemental")
        );
    }

    #[test]
    fn untouched_fields_survive() {
        let mut d = desc(&[("Level", "3"), ("Range", "10 yds")], &[("Effect", "Burns.")]);
        apply(&mut d, &entry(&[("Range", "100 yds")], &[]));

        assert_eq!(d.infobox.get("Level").map(String::as_str), Some("3"));
        assert_eq!(d.sections.get("Effect").map(String::as_str), Some("Burns."));
    }

    #[test]
    fn infobox_merge_is_idempotent() {
        let e = entry(&[("Range", "100 yds"), ("casting time", "3")], &[]);
        let mut once = desc(&[("range", "10 yds"), ("Casting Time", "1")], &[]);
        apply(&mut once, &e);
        let mut twice = once.clone();
        apply(&mut twice, &e);

        assert_eq!(once, twice);
    }

    #[test]
    fn sections_merge_by_exact_heading() {
        let mut d = desc(&[], &[("Effect", "Old text.")]);
        apply(
            &mut d,
            &entry(&[], &[("Effect", "Corrected text."), ("Errata", "New note.")]),
        );

        assert_eq!(
            d.sections.get("Effect").map(String::as_str),
            Some("Corrected text.")
        );
        assert_eq!(
            d.sections.get("Errata").map(String::as_str),
            Some("New note.")
        );
    }

    #[test]
    fn section_headings_are_case_sensitive() {
        let mut d = desc(&[], &[("Effect", "Original.")]);
        apply(&mut d, &entry(&[], &[("effect", "Lowercase twin.")]));

        assert_eq!(d.sections.len(), 2);
        assert_eq!(
            d.sections.get("Effect").map(String::as_str),
            Some("Original.")
        );
    }

    #[test]
    fn empty_entry_is_a_noop() {
        let mut d = desc(&[("Level", "3")], &[("Effect", "Burns.")]);
        let before = d.clone();
        apply(&mut d, &SpellOverride::default());

        assert_eq!(d, before);
    }
}
