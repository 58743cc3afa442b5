//! Domain-specific assertion macros for dmcat harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! filter that produced an unexpected result set.

use dmcat_core::{DamageRecord, FilterState};

// ---------------------------------------------------------------------------
// Result set assertions
// ---------------------------------------------------------------------------

/// Assert that a result set has exactly these ids, in this order.
///
/// ```rust
/// assert_ids!(filter_records(&catalog, &filter), ["DM-HTHA", "DM-EROS"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($results:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $results.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "result ids differ");
    }};
}

/// Assert that `filter` selects exactly `expected` out of `catalog`, in
/// source order.
pub fn assert_selects(catalog: &[DamageRecord], filter: &FilterState, expected: &[&str]) {
    let actual: Vec<&str> = dmcat_core::filter_records(catalog, filter)
        .into_iter()
        .map(|r| r.id.as_str())
        .collect();
    pretty_assertions::assert_eq!(actual, expected, "filter: {filter:?}");
}

/// Assert that `actual` is `source` with some elements removed and none
/// reordered.
pub fn assert_subsequence(actual: &[&DamageRecord], source: &[DamageRecord]) {
    let mut rest = source.iter();
    for (i, hit) in actual.iter().enumerate() {
        if !rest.any(|r| std::ptr::eq(r, *hit)) {
            panic!(
                "assert_subsequence failed: result #{i} ({:?}) is out of source order or not from the source",
                hit.id
            );
        }
    }
}

/// Assert that a string slice is strictly ascending (sorted, no duplicates).
pub fn assert_strictly_sorted(values: &[String]) {
    for pair in values.windows(2) {
        assert!(
            pair[0] < pair[1],
            "expected strictly ascending values, found {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}
