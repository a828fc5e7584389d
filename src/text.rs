//! Portable Text resolvers: plain text, slugs, and headings.
//!
//! All functions here are pure. Absent or empty input yields an empty result,
//! never an error.
//!
//! ## Slugs
//!
//! [`slugify`] runs a fixed pipeline, in this order:
//!
//! 1. Unicode NFKD normalisation, then drop combining marks (`é` → `e`)
//! 2. Lowercase
//! 3. Dash variants (en/em dash, minus sign, underscore, …) become `-`
//! 4. Anything that is not ASCII alphanumeric, whitespace, or `-` is removed
//! 5. Whitespace and hyphen runs collapse to a single `-`, edges trimmed
//!
//! Normalising first matters: `ﬁ` decomposes to `fi` and survives step 4,
//! where the ligature itself would have been dropped. The output alphabet is
//! `[a-z0-9-]` with no doubled or edge hyphens, so the function is idempotent.
//!
//! ## Headings
//!
//! [`extract_headings`] feeds the table of contents on talk and workshop
//! pages. Only `h2`–`h4` blocks with non-empty text qualify. Each heading gets
//! an anchor id chosen by the first available of:
//!
//! ```text
//! slugify(text)  →  block _key  →  "heading-" + 8 random hex digits
//! ```

use crate::types::PortableBlock;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Characters treated as a hyphen when building slugs.
const DASH_VARIANTS: &[char] = &[
    '_',        // low line
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2015}', // horizontal bar
    '\u{2212}', // minus sign
    '\u{FE63}', // small hyphen-minus
    '\u{FF0D}', // fullwidth hyphen-minus
];

/// Join the text of every text block, separated by blank lines.
///
/// Embedded objects (images, code blocks, …) and blocks without text are
/// skipped.
pub fn to_plain_text(blocks: &[PortableBlock]) -> String {
    blocks
        .iter()
        .filter(|b| b.is_text())
        .map(|b| b.text())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build a URL-safe slug from arbitrary text.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    let chars = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase);

    for ch in chars {
        let ch = if DASH_VARIANTS.contains(&ch) { '-' } else { ch };
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch == '-' || ch.is_whitespace() {
            pending_hyphen = true;
        }
    }
    slug
}

/// A heading pulled out of a Portable Text document.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Anchor id, unique within the document.
    pub id: String,
    pub text: String,
    /// 2, 3 or 4.
    pub level: u8,
    /// Index of the source block, so the renderer can attach the same id.
    pub block: usize,
}

/// Collect `h2`–`h4` headings with non-empty text, in document order.
pub fn extract_headings(blocks: &[PortableBlock]) -> Vec<Heading> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut headings = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        if !block.is_text() {
            continue;
        }
        let Some(level) = heading_level(block.style()) else {
            continue;
        };
        let text = block.text().trim().to_string();
        if text.is_empty() {
            continue;
        }

        let base = heading_id(&text, block.key.as_deref());
        let mut id = base.clone();
        let mut n = 2;
        while taken.contains(&id) {
            id = format!("{base}-{n}");
            n += 1;
        }
        taken.insert(id.clone());

        headings.push(Heading {
            id,
            text,
            level,
            block: index,
        });
    }
    headings
}

fn heading_level(style: &str) -> Option<u8> {
    match style {
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        _ => None,
    }
}

fn heading_id(text: &str, key: Option<&str>) -> String {
    let slug = slugify(text);
    if !slug.is_empty() {
        return slug;
    }
    match key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => format!("heading-{:08x}", rand::random::<u32>()),
    }
}

/// Truncate to at most `max` characters on a char boundary, appending `…`
/// when anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
