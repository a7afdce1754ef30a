//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Fixed-size table truncation with a showing-of caption."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use serde::Serialize;

/// The visible head of a filtered result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Rows actually shown.
    pub showing: usize,
    /// Rows matching the filter before truncation.
    pub total: usize,
}

impl<T> Page<T> {
    pub fn truncate(mut items: Vec<T>, page_size: usize) -> Self {
        let total = items.len();
        items.truncate(page_size);
        Self {
            showing: items.len(),
            rows: items,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn caption(&self, noun: &str) -> String {
        format!("Showing {} of {} {}", self.showing, self.total, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_and_reports_totals() {
        let page = Page::truncate((0..45).collect::<Vec<_>>(), 20);
        assert_eq!(page.rows.len(), 20);
        assert_eq!(page.rows[0], 0);
        assert_eq!(page.caption("employees"), "Showing 20 of 45 employees");
    }

    #[test]
    fn short_result_is_shown_whole() {
        let page = Page::truncate(vec!["a", "b"], 30);
        assert_eq!((page.showing, page.total), (2, 2));
        assert!(Page::<u8>::truncate(Vec::new(), 30).is_empty());
    }
}
