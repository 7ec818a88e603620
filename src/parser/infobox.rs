use std::collections::BTreeMap;

/// Opening token of the spell infobox block.
const INFOBOX_OPEN: &str = "{{Infobox Spells";
/// Token terminating the block. The terminating line is consumed.
const INFOBOX_CLOSE: &str = "}}";

/// Split wikitext into the infobox field mapping and the body below the
/// block.
///
/// Pages without an infobox pass through untouched: empty mapping, full
/// original text as the body. An unterminated block consumes the rest of
/// the page, leaving an empty body. This step never fails.
pub fn extract_infobox(wikitext: &str) -> (BTreeMap<String, String>, String) {
    let lines: Vec<&str> = wikitext.lines().collect();

    let start = match lines.iter().position(|l| l.trim().starts_with(INFOBOX_OPEN)) {
        Some(i) => i,
        None => return (BTreeMap::new(), wikitext.to_string()),
    };

    let mut infobox = BTreeMap::new();
    let mut end = start;

    for (i, raw) in lines.iter().enumerate().skip(start + 1) {
        let line = raw.trim();
        end = i;

        if line.starts_with(INFOBOX_CLOSE) {
            break;
        }

        let field = match line.strip_prefix('|') {
            Some(f) => f,
            None => continue, // blank lines, comments, nested template noise
        };
        let (key, value) = match field.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => continue,
        };

        if !key.is_empty() && !value.is_empty() {
            // Duplicate keys within one block: last occurrence wins.
            infobox.insert(key.to_string(), value.to_string());
        }
    }

    let body = lines.get(end + 1..).unwrap_or_default().join("\n");
    (infobox, body)
}

// ── Tests ──
