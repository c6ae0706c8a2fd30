//! Pagination arithmetic.

/// What: Number of pages needed to show `total` items.
///
/// Inputs:
/// - `total`: Total matches reported by the catalog.
/// - `page_size`: Items per page (a zero size yields zero pages).
///
/// Output:
/// - `ceil(total / page_size)`.
#[must_use]
pub fn page_count(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}
