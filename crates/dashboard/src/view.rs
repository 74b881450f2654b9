//! Search, sort and pagination over one raw transaction list.

use std::cmp::Ordering;

use api_types::transaction::{ExpenseView, IncomeView};
use chrono::NaiveDate;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Page sizes a user can pick from.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = PAGE_SIZES[0];

/// A row that can be listed, searched and sorted by date.
pub trait Searchable {
    fn id(&self) -> Uuid;
    fn date(&self) -> NaiveDate;
    /// Text fields the free-text search looks into.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for IncomeView {
    fn id(&self) -> Uuid {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.source.as_str(), self.category.as_str()];
        fields.extend(self.notes.as_deref());
        fields
    }
}

impl Searchable for ExpenseView {
    fn id(&self) -> Uuid {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.category.as_str()];
        fields.extend(self.payee.as_deref());
        fields.extend(self.notes.as_deref());
        fields
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Bounds of the visible page. `start..end` indexes the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl Pagination {
    fn compute(page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(page_size);
        let page = page.clamp(1, total_pages.max(1));
        let start = ((page - 1) * page_size).min(total_items);
        let end = (start + page_size).min(total_items);
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            start,
            end,
        }
    }
}

fn fold(text: &str) -> String {
    text.nfkc().flat_map(char::to_lowercase).collect()
}

/// Client-side view over a fetched list.
///
/// The raw items are never modified; every accessor recomputes from them.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    query: String,
    date: Option<NaiveDate>,
    order: SortOrder,
    page: usize,
    page_size: usize,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            date: None,
            order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<T: Searchable + Clone> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replaces the raw list after a fetch; search, order and page are kept.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = self.pagination().page;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
        self.page = 1;
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Only sizes from [`PAGE_SIZES`] are accepted; returns whether it changed.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !PAGE_SIZES.contains(&page_size) {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.page = self.pagination().page;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    fn matches(&self, item: &T, needle: &str) -> bool {
        let by_text = !needle.is_empty()
            && item
                .search_fields()
                .into_iter()
                .any(|field| fold(field).contains(needle));
        let by_date = self.date.is_some_and(|date| item.date() == date);

        if needle.is_empty() && self.date.is_none() {
            return true;
        }
        by_text || by_date
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        let by_date = match self.order {
            SortOrder::Ascending => a.date().cmp(&b.date()),
            SortOrder::Descending => b.date().cmp(&a.date()),
        };
        by_date.then_with(|| a.id().cmp(&b.id()))
    }

    /// Items passing the search, in the selected order.
    pub fn filtered(&self) -> Vec<T> {
        let needle = fold(self.query.trim());
        let mut filtered: Vec<T> = self
            .items
            .iter()
            .filter(|item| self.matches(item, &needle))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| self.compare(a, b));
        filtered
    }

    pub fn pagination(&self) -> Pagination {
        let needle = fold(self.query.trim());
        let total = self
            .items
            .iter()
            .filter(|item| self.matches(item, &needle))
            .count();
        Pagination::compute(self.page, self.page_size, total)
    }

    pub fn page_items(&self) -> Vec<T> {
        let filtered = self.filtered();
        let pagination = Pagination::compute(self.page, self.page_size, filtered.len());
        filtered[pagination.start..pagination.end].to_vec()
    }
}
