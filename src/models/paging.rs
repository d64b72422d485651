/// Catalog tables page five rows at a time unless the caller asks for more.
pub const DEFAULT_PAGE_SIZE: u64 = 5;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Normalize user-supplied paging inputs: pages are 1-based, limits are
/// clamped to [1, MAX_PAGE_SIZE].
pub fn normalize(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

/// Slice an already-filtered row set into one page, returning the page rows
/// plus (total, total_pages). Out-of-range pages yield an empty page with
/// the correct totals.
pub fn paginate<T>(rows: Vec<T>, page: u64, limit: u64) -> (Vec<T>, u64, u64) {
    let total = rows.len() as u64;
    let total_pages = total.div_ceil(limit);
    let start = (page - 1).saturating_mul(limit) as usize;
    let page_rows = if start >= rows.len() {
        Vec::new()
    } else {
        rows.into_iter().skip(start).take(limit as usize).collect()
    };
    (page_rows, total, total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_rows_page_three_has_two() {
        let rows: Vec<u32> = (0..12).collect();
        let (page, total, total_pages) = paginate(rows, 3, DEFAULT_PAGE_SIZE);
        assert_eq!(page, vec![10, 11]);
        assert_eq!(total, 12);
        assert_eq!(total_pages, 3);
    }

    #[test]
    fn out_of_range_page_is_empty_with_totals() {
        let rows: Vec<u32> = (0..12).collect();
        let (page, total, total_pages) = paginate(rows, 9, 5);
        assert!(page.is_empty());
        assert_eq!(total, 12);
        assert_eq!(total_pages, 3);
    }

    #[test]
    fn normalize_defaults_and_clamps() {
        assert_eq!(normalize(None, None), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(normalize(Some(0), Some(0)), (1, 1));
        assert_eq!(normalize(Some(2), Some(1_000)), (2, MAX_PAGE_SIZE));
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let rows: Vec<u32> = (0..10).collect();
        let (_, _, total_pages) = paginate(rows, 1, 5);
        assert_eq!(total_pages, 2);
    }
}
