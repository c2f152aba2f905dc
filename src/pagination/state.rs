use std::collections::BTreeMap;

use super::TableError;

/// Active filters of a table view, keyed by the query parameter name.
pub type Filters = BTreeMap<String, String>;

/// Query parameter names owned by the pagination itself, never usable as filters.
const RESERVED_KEYS: &[&str] = &["page", "per_page", "limit", "offset"];

/// Number of pages needed to show `total` items, `per_page` at a time.
///
/// There is always at least one page, even for an empty collection.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Pagination and filtering position of one table view.
///
/// The page is kept inside `[1, total_pages()]` by every mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    page: u64,
    per_page: u64,
    total: u64,
    filters: Filters,
}

impl PageState {
    pub fn new(per_page: u64) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total: 0,
            filters: Filters::new(),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }
    pub fn per_page(&self) -> u64 {
        self.per_page
    }
    pub fn total(&self) -> u64 {
        self.total
    }
    pub fn filters(&self) -> &Filters {
        &self.filters
    }
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.per_page)
    }

    /// Zero-based index of the first item of the current page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }

    /// Moves to page `n`, clamped into `[1, total_pages()]`, and returns the page retained.
    pub fn set_page(&mut self, n: i64) -> u64 {
        let last = self.total_pages();
        self.page = if n < 1 { 1 } else { (n as u64).min(last) };
        self.page
    }

    /// Records a new item count. Returns `true` if the current page had to be clamped.
    pub fn set_total(&mut self, total: u64) -> bool {
        self.total = total;
        let last = self.total_pages();
        if self.page > last {
            self.page = last;
            true
        } else {
            false
        }
    }

    /// Sets (or clears, when `value` is blank) one filter and rewinds to the first page.
    ///
    /// Returns whether the filter set actually changed.
    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<bool, TableError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(TableError::Validation("filter name cannot be empty".into()));
        }
        if RESERVED_KEYS.contains(&key) {
            return Err(TableError::Validation(
                format!("'{key}' is reserved for pagination").into(),
            ));
        }
        let value = value.trim();
        let changed = if value.is_empty() {
            self.filters.remove(key).is_some()
        } else if self.filters.get(key).map(String::as_str) == Some(value) {
            false
        } else {
            self.filters.insert(key.to_owned(), value.to_owned());
            true
        };
        self.page = 1;
        Ok(changed)
    }

    /// One-based, inclusive range of item positions covered by `shown` items of the current page.
    pub fn shown_range(&self, shown: usize) -> Option<(u64, u64)> {
        (shown > 0).then(|| {
            let start = self.offset() + 1;
            (start, self.offset() + shown as u64)
        })
    }

    /// Snapshot handed to a fetcher.
    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
            filters: self.filters.clone(),
        }
    }
}

/// What a fetcher needs to request one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u64,
    pub per_page: u64,
    pub filters: Filters,
}

impl PageQuery {
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1) * self.per_page
    }

    /// `page`/`per_page` parameters followed by the non-empty filters.
    pub fn page_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("per_page".to_owned(), self.per_page.to_string()),
        ];
        params.extend(self.filter_params());
        params
    }

    /// `limit`/`offset` parameters followed by the non-empty filters.
    pub fn offset_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("limit".to_owned(), self.per_page.to_string()),
            ("offset".to_owned(), self.offset().to_string()),
        ];
        params.extend(self.filter_params());
        params
    }

    fn filter_params(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.filters
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_at_least_one() {
        for per_page in 1..=12u64 {
            for total in 0..=100u64 {
                let expected = std::cmp::max(1, (total + per_page - 1) / per_page);
                assert_eq!(total_pages(total, per_page), expected, "{total}/{per_page}");
            }
        }
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(47, 10), 5);
        assert_eq!(total_pages(50, 10), 5);
        assert_eq!(total_pages(51, 10), 6);
    }

    #[test]
    fn set_page_always_lands_in_range() {
        let mut state = PageState::new(10);
        state.set_total(47);
        for n in [i64::MIN, -3, 0, 1, 3, 5, 6, 1_000, i64::MAX] {
            let page = state.set_page(n);
            assert!((1..=5).contains(&page), "{n} -> {page}");
            assert_eq!(page, state.page());
        }
        assert_eq!(state.set_page(0), 1);
        assert_eq!(state.set_page(-7), 1);
        assert_eq!(state.set_page(99), 5);
    }

    #[test]
    fn set_page_on_empty_collection_stays_on_first_page() {
        let mut state = PageState::new(20);
        assert_eq!(state.set_page(4), 1);
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn shrinking_total_clamps_page() {
        let mut state = PageState::new(10);
        state.set_total(47);
        state.set_page(5);
        assert!(state.set_total(12));
        assert_eq!(state.page(), 2);
        assert!(!state.set_total(15));
        assert_eq!(state.page(), 2);
        assert!(state.set_total(0));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn set_filter_rewinds_to_first_page() {
        let mut state = PageState::new(10);
        state.set_total(47);
        state.set_page(4);
        assert_eq!(state.set_filter("search", " bob "), Ok(true));
        assert_eq!(state.page(), 1);
        assert_eq!(state.filter("search"), Some("bob"));

        state.set_page(3);
        assert_eq!(state.set_filter("search", "bob"), Ok(false));
        assert_eq!(state.page(), 1);

        assert_eq!(state.set_filter("search", "  "), Ok(true));
        assert_eq!(state.filter("search"), None);
    }

    #[test]
    fn set_filter_rejects_reserved_and_blank_keys() {
        let mut state = PageState::new(10);
        assert!(matches!(
            state.set_filter("page", "3"),
            Err(TableError::Validation(_))
        ));
        assert!(matches!(
            state.set_filter(" ", "x"),
            Err(TableError::Validation(_))
        ));
        assert!(state.filters().is_empty());
    }

    #[test]
    fn shown_range_of_last_partial_page() {
        let mut state = PageState::new(10);
        state.set_total(47);
        state.set_page(5);
        assert_eq!(state.offset(), 40);
        assert_eq!(state.shown_range(7), Some((41, 47)));
        assert_eq!(state.shown_range(0), None);
    }

    #[test]
    fn query_params_carry_filters() {
        let mut state = PageState::new(10);
        state.set_total(100);
        state.set_filter("role", "editor").unwrap();
        state.set_page(3);
        let query = state.query();
        assert_eq!(
            query.page_params(),
            vec![
                ("page".to_owned(), "3".to_owned()),
                ("per_page".to_owned(), "10".to_owned()),
                ("role".to_owned(), "editor".to_owned()),
            ]
        );
        assert_eq!(
            query.offset_params(),
            vec![
                ("limit".to_owned(), "10".to_owned()),
                ("offset".to_owned(), "20".to_owned()),
                ("role".to_owned(), "editor".to_owned()),
            ]
        );
    }
}
