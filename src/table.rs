use std::collections::HashSet;
use std::ops::Range;

use crate::types::Subscription;

/// Rows of the screen that never hold table rows: borders, header, footer
/// and margins.
const CHROME_HEIGHT: u16 = 6;
/// Height of the key legend under the table.
pub const LEGEND_HEIGHT: u16 = 1;
const DEFAULT_PAGE_SIZE: usize = 10;

pub const MARK_WIDTH: u16 = 3;
const COLUMN_SPACING: u16 = 1;
const BORDER_WIDTH: u16 = 2;

/// Column widths for the mark, organization and repository columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnWidths {
    pub mark: u16,
    pub organization: u16,
    pub repository: u16,
}

/// Selectable, paged view of one snapshot.
///
/// `marked[i]` belongs to `rows[i]`; both are replaced together.
#[derive(Debug, Clone)]
pub struct SubscriptionTable {
    rows: Vec<Subscription>,
    marked: Vec<bool>,
    cursor: usize,
    page_size: usize,
    widths: ColumnWidths,
}

impl Default for SubscriptionTable {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            marked: Vec::new(),
            cursor: 0,
            page_size: DEFAULT_PAGE_SIZE,
            widths: ColumnWidths::default(),
        }
    }
}

impl SubscriptionTable {
    /// Replace the rows with a fresh snapshot.
    ///
    /// Marks and the cursor follow their subscription if it is still present.
    pub fn set_rows(&mut self, rows: Vec<Subscription>) {
        let still_marked: HashSet<Subscription> = self.marked().into_iter().collect();
        let focused = self.focused().cloned();

        self.marked = rows.iter().map(|s| still_marked.contains(s)).collect();
        self.cursor = focused
            .and_then(|f| rows.iter().position(|s| *s == f))
            .unwrap_or(self.cursor)
            .min(rows.len().saturating_sub(1));
        self.rows = rows;
    }

    /// Recompute page size and column widths for a terminal of this size.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.page_size = height
            .saturating_sub(CHROME_HEIGHT + LEGEND_HEIGHT)
            .max(1) as usize;

        let flex = width
            .saturating_sub(BORDER_WIDTH + MARK_WIDTH + 2 * COLUMN_SPACING);
        let organization = flex / 3;
        self.widths = ColumnWidths {
            mark: MARK_WIDTH,
            organization,
            repository: flex - organization,
        };
    }

    pub fn rows(&self) -> &[Subscription] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused(&self) -> Option<&Subscription> {
        self.rows.get(self.cursor)
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.get(index).copied().unwrap_or(false)
    }

    pub fn widths(&self) -> ColumnWidths {
        self.widths
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn toggle_mark(&mut self) {
        if let Some(mark) = self.marked.get_mut(self.cursor) {
            *mark = !*mark;
        }
    }

    /// Marked subscriptions in row order.
    pub fn marked(&self) -> Vec<Subscription> {
        self.rows
            .iter()
            .zip(&self.marked)
            .filter(|(_, marked)| **marked)
            .map(|(sub, _)| sub.clone())
            .collect()
    }

    pub fn marked_count(&self) -> usize {
        self.marked.iter().filter(|&&m| m).count()
    }

    /// Zero-based page holding the cursor.
    pub fn page(&self) -> usize {
        self.cursor / self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    /// Row indices shown on the current page.
    pub fn visible(&self) -> Range<usize> {
        let start = self.page() * self.page_size;
        start..(start + self.page_size).min(self.rows.len())
    }

    pub fn scroll_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size);
    }

    pub fn page_down(&mut self) {
        self.cursor = (self.cursor + self.page_size).min(self.last_index());
    }

    pub fn go_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.cursor = self.last_index();
    }

    fn last_index(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}
