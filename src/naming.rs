//! Display order and slug uniqueness for document collections.
//!
//! Every collection type (events, talks, workshops, projects) carries an
//! optional numeric `order` field set by the editor in the CMS and a slug
//! used in URLs. This module applies both conventions uniformly:
//!
//! - **Order**: ascending by `order`; documents without one sort last. The
//!   sort is stable, so ties keep the order the CMS returned them in.
//! - **Slugs**: a missing or blank slug is derived from the title with
//!   [`slugify`]. Within one document type slugs must be unique; later
//!   duplicates get `-2`, `-3`, … appended and a warning is logged, since
//!   two pages at the same URL would silently overwrite each other.

use crate::text::slugify;
use crate::types::Ordered;
use std::collections::HashSet;

/// Stable sort by the `order` field, missing values last.
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| (item.order().is_none(), item.order().unwrap_or_default()));
}

/// Fill in missing slugs and make them unique within `items`.
///
/// `kind` only labels the warning for duplicates (e.g. `"talk"`).
pub fn assign_slugs<T: Ordered>(items: &mut [T], kind: &str) {
    let mut taken: HashSet<String> = HashSet::new();

    for item in items.iter_mut() {
        let base = item
            .slug()
            .map(slugify)
            .filter(|s| !s.is_empty())
            .or_else(|| Some(slugify(item.title())).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| kind.to_string());

        let mut slug = base.clone();
        let mut n = 2;
        while taken.contains(&slug) {
            slug = format!("{base}-{n}");
            n += 1;
        }
        if slug != base {
            log::warn!(
                "duplicate {kind} slug '{base}' for \"{}\", using '{slug}'",
                item.title()
            );
        }
        taken.insert(slug.clone());
        item.set_slug(slug);
    }
}

/// Sort and assign slugs in one go, as the fetch stage does for each
/// collection.
pub fn normalize<T: Ordered>(items: &mut [T], kind: &str) {
    sort_by_order(items);
    assign_slugs(items, kind);
}
