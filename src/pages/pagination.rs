/// Page bookkeeping for a listing. Pages are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    per_page: u32,
    total: u64,
}

impl Pager {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn last_page(&self) -> u32 {
        let pages = self.total.div_ceil(self.per_page as u64);
        pages.clamp(1, u32::MAX as u64) as u32
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }

    /// Moves to `page`, clamped to the valid range. Returns whether the page
    /// actually changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let page = page.clamp(1, self.last_page());
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn previous(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Records the backend's view after a fetch.
    pub fn update(&mut self, page: u32, total: u64) {
        self.total = total;
        self.page = page.max(1);
    }

    /// Whether the current page lies past the end, e.g. after deleting the
    /// last row of the last page.
    pub fn is_past_end(&self) -> bool {
        self.page > self.last_page()
    }

    /// "Showing 11-20 of 45".
    pub fn range_label(&self) -> String {
        if self.total == 0 {
            return "No results".to_string();
        }
        let first = (self.page as u64 - 1) * self.per_page as u64 + 1;
        let last = (first + self.per_page as u64 - 1).min(self.total);
        format!("Showing {first}-{last} of {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_disable_navigation() {
        let mut pager = Pager::new(10);
        pager.update(1, 25);
        assert_eq!(pager.last_page(), 3);
        assert!(!pager.has_previous());
        assert!(pager.has_next());
        assert!(!pager.previous());

        assert!(pager.go_to(3));
        assert!(pager.has_previous());
        assert!(!pager.has_next());
        assert!(!pager.next());
        assert_eq!(pager.range_label(), "Showing 21-25 of 25");
    }

    #[test]
    fn go_to_clamps_and_reports_change() {
        let mut pager = Pager::new(10);
        pager.update(1, 25);
        assert!(pager.go_to(99));
        assert_eq!(pager.page(), 3);
        assert!(!pager.go_to(3));
    }

    #[test]
    fn empty_listing_has_one_page() {
        let mut pager = Pager::new(0);
        assert_eq!(pager.per_page(), 1);
        assert_eq!(pager.last_page(), 1);
        assert!(!pager.has_next());
        assert_eq!(pager.range_label(), "No results");

        pager.update(3, 2);
        assert!(pager.is_past_end());
    }
}
