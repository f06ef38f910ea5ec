//! Client-side search and pagination over a list fetched once.

use crate::models::{Employee, PendingCandidate};

/// Anything that can be found by name in a candidate list.
pub trait Searchable {
    fn display_name(&self) -> &str;
}

impl Searchable for Employee {
    fn display_name(&self) -> &str {
        &self.basic_info.name
    }
}

impl Searchable for PendingCandidate {
    fn display_name(&self) -> &str {
        &self.basic_info.name
    }
}

/// In-memory candidate list with a name filter and fixed-size pages.
///
/// Pages are 1-based. Filtering never hits the server.
#[derive(Debug, Clone)]
pub struct CandidateList<T> {
    items: Vec<T>,
    filter: String,
    needle: String,
    page: usize,
    page_size: usize,
}

impl<T: Searchable> CandidateList<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            filter: String::new(),
            needle: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replaces the filter and always returns to page 1.
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.needle = filter.to_lowercase();
        self.page = 1;
    }

    /// Swaps in a freshly fetched list; the filter is kept, the page resets.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = 1;
    }

    pub fn matches(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().filter(move |item| {
            self.needle.is_empty() || item.display_name().to_lowercase().contains(&self.needle)
        })
    }

    pub fn match_count(&self) -> usize {
        self.matches().count()
    }

    pub fn page_count(&self) -> usize {
        self.match_count().div_ceil(self.page_size).max(1)
    }

    /// Moves to `page`, clamped into `1..=page_count()`. Returns the page shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.page_count());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn visible(&self) -> Vec<&T> {
        self.matches()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }
}
