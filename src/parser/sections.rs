use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Heading candidate: a run of two or more `=` on each side. Symmetry is
/// checked separately because the regex crate has no backreferences.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(={2,})\s*(.*?)\s*(={2,})\s*$").unwrap());

const CATEGORY_PREFIX: &str = "[[Category:";
/// Bucket for body text appearing before the first heading.
const INTRO_HEADING: &str = "Introduction";
/// Bucket name for a heading whose text trims to nothing (e.g. `====`).
const UNNAMED_HEADING: &str = "Section";

/// Group body text under its headings.
///
/// Category tag lines are dropped outright. Heading depth is not
/// preserved; only the text matters. A heading name that recurs gets its
/// later content appended to the existing bucket behind a blank line, so
/// no body text is lost when wiki pages repeat a heading.
pub fn split_sections(body: &str) -> BTreeMap<String, String> {
    let mut sections = BTreeMap::new();
    let mut heading: Option<String> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with(CATEGORY_PREFIX) {
            continue;
        }

        if let Some(name) = heading_text(trimmed) {
            flush(&mut sections, heading.as_deref(), std::mem::take(&mut buffer));
            heading = Some(name);
            continue;
        }

        buffer.push(line);
    }

    flush(&mut sections, heading.as_deref(), buffer);
    sections
}

/// Match a trimmed line as a heading, requiring equal marker runs on both
/// sides. `==Effect===` is body text, not a sloppy heading.
fn heading_text(line: &str) -> Option<String> {
    let caps = HEADING_RE.captures(line)?;
    if caps[1].len() != caps[3].len() {
        return None;
    }
    let text = caps[2].trim();
    if text.is_empty() {
        Some(UNNAMED_HEADING.to_string())
    } else {
        Some(text.to_string())
    }
}

fn flush(sections: &mut BTreeMap<String, String>, heading: Option<&str>, buffer: Vec<&str>) {
    let joined = buffer.join("\n");
    let content = joined.trim();
    if content.is_empty() {
        return;
    }

    let key = heading.unwrap_or(INTRO_HEADING);
    match sections.get_mut(key) {
        Some(existing) => {
            existing.push_str("\n\n");
            existing.push_str(content);
        }
        None => {
            sections.insert(key.to_string(), content.to_string());
        }
    }
}

// ── Tests ──
