pub mod infobox;
pub mod sections;

use crate::model::{RawPage, SpellDescription};

/// Two-pass pipeline: wikitext → infobox fields → body sections.
///
/// The record keeps the page's full original wikitext (not the
/// post-infobox remainder) so the artifact stays auditable against the
/// wiki source.
pub fn parse_page(page: &RawPage) -> SpellDescription {
    let (infobox, body) = infobox::extract_infobox(&page.wikitext);
    let sections = sections::split_sections(&body);

    SpellDescription {
        title: page.title.clone(),
        wikitext: page.wikitext.clone(),
        infobox,
        sections,
    }
}

// ── Tests ──
