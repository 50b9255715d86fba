use crate::models::{FilterSet, SchoolRecord};

/// Check if a school satisfies the categorical filters of a search
///
/// Levels and sectors are alternatives: a school passes if it matches any
/// requested level (and any requested sector). Every requested amenity must
/// be present.
#[inline]
pub fn matches_filters(school: &SchoolRecord, filters: &FilterSet) -> bool {
    if filters.is_empty() {
        return true;
    }

    if !matches_any(filters.levels(), |level| school.level == level) {
        return false;
    }

    if !matches_any(filters.sectors(), |sector| school.sector == sector) {
        return false;
    }

    if !filters.amenities().all(|amenity| school.amenities.has(amenity)) {
        return false;
    }

    // Unknown selective status counts as not selective
    if filters.requires_not_selective() && school.is_selective() {
        return false;
    }

    true
}

/// True when the iterator is empty or any item satisfies the predicate
fn matches_any<T>(mut items: impl Iterator<Item = T>, predicate: impl Fn(T) -> bool) -> bool {
    match items.next() {
        None => true,
        Some(first) => predicate(first) || items.any(predicate),
    }
}
