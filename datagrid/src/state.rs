//! Shared table state.
//!
//! The single source of truth for options, rows, selection, the current
//! page and the measured dimensions. Every entry point takes `&mut self` and
//! finishes its write before returning, so readers never see rows, selection
//! and page out of step with the options they were derived from.

use std::ops::Range;

use log::debug;

use crate::column::Column;
use crate::dimensions::Dimensions;
use crate::notify::EventSender;
use crate::options::TableOptions;
use crate::rows::Row;
use crate::selection::{Selection, SetSelected};

/// Page change requested by the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageEvent {
    /// Zero-based page index.
    pub page: usize,
}

impl PageEvent {
    pub fn new(page: usize) -> Self {
        Self { page }
    }
}

/// Payload of a rows-updated notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsUpdate {
    /// Number of rows now held.
    pub len: usize,
    /// Number of rows held before the update.
    pub previous_len: usize,
    /// Current page after the update.
    pub page: usize,
    /// Page count after the update.
    pub page_count: usize,
}

/// Notices emitted by [`TableState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateNotice {
    RowsUpdated(RowsUpdate),
}

/// Table state owned by one grid instance.
#[derive(Debug)]
pub struct TableState {
    options: TableOptions,
    rows: Vec<Row>,
    selected: Selection,
    /// Zero-based page index.
    page: usize,
    /// Rows visible on the current page.
    page_range: Range<usize>,
    dimensions: Dimensions,
    scrollbar_width: u32,
    dirty: bool,
    notices: EventSender<StateNotice>,
}

impl TableState {
    /// Create empty state with default options.
    pub fn new(scrollbar_width: u32, notices: EventSender<StateNotice>) -> Self {
        Self {
            options: TableOptions::default(),
            rows: Vec::new(),
            selected: Selection::new(),
            page: 0,
            page_range: 0..0,
            dimensions: Dimensions::default(),
            scrollbar_width,
            dirty: false,
            notices,
        }
    }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Replace the options.
    ///
    /// Column widths are not recomputed; follow with a dimensioning pass.
    pub fn set_options(&mut self, options: TableOptions) -> &mut Self {
        self.options = options;
        self.repaginate();
        self.dirty = true;
        self
    }

    /// Replace the rows and emit [`StateNotice::RowsUpdated`].
    pub fn set_rows(&mut self, rows: Vec<Row>) -> &mut Self {
        let previous_len = self.rows.len();
        self.rows = rows;
        if let Some(size) = self.page_size()
            && !self.rows.is_empty()
        {
            // Pull the page back when it lies past the last page.
            self.page = self.page.min(self.rows.len().div_ceil(size) - 1);
        }
        self.repaginate();
        self.dirty = true;

        let update = RowsUpdate {
            len: self.rows.len(),
            previous_len,
            page: self.page,
            page_count: self.page_count(),
        };
        debug!("Rows updated: {} -> {}", previous_len, update.len);
        self.notices.send(StateNotice::RowsUpdated(update));
        self
    }

    /// Replace or toggle the selection.
    pub fn set_selected(&mut self, update: impl Into<SetSelected>) -> &mut Self {
        self.selected.apply(update.into());
        self.dirty = true;
        self
    }

    /// Move to another page. The index is stored as given; the visible
    /// [`page_range`](Self::page_range) is clamped to the rows held.
    pub fn set_page(&mut self, event: PageEvent) -> &mut Self {
        self.page = event.page;
        self.repaginate();
        self.dirty = true;
        self
    }

    /// Store the result of a dimensioning pass.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) -> &mut Self {
        self.dimensions = dimensions;
        self.dirty = true;
        self
    }

    /// Columns, for the allocator to resize in place.
    pub fn columns_mut(&mut self) -> &mut [Column] {
        self.dirty = true;
        &mut self.options.columns
    }

    // -------------------------------------------------------------------------
    // Readers
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn columns(&self) -> &[Column] {
        &self.options.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected(&self) -> &Selection {
        &self.selected
    }

    pub fn is_selected(&self, row: &Row) -> bool {
        self.selected.is_selected(row)
    }

    /// Zero-based current page, as last requested.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages; 1 when pagination is off.
    pub fn page_count(&self) -> usize {
        match self.page_size() {
            Some(size) => self.rows.len().div_ceil(size),
            None => 1,
        }
    }

    /// Index range of the rows on the current page.
    pub fn page_range(&self) -> Range<usize> {
        self.page_range.clone()
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> &[Row] {
        &self.rows[self.page_range.clone()]
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn inner_width(&self) -> u32 {
        self.dimensions.inner_width
    }

    /// Body height; `None` unless vertical scrolling is enabled.
    pub fn body_height(&self) -> Option<u32> {
        self.dimensions.body_height
    }

    pub fn scrollbar_width(&self) -> u32 {
        self.scrollbar_width
    }

    /// Check if the state has been modified since last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn page_size(&self) -> Option<usize> {
        self.options.page_size.filter(|&size| size > 0)
    }

    fn repaginate(&mut self) {
        let len = self.rows.len();
        self.page_range = match self.page_size() {
            Some(size) => {
                let page = self.page.min(self.page_count().saturating_sub(1));
                let start = (page * size).min(len);
                start..(start + size).min(len)
            }
            None => 0..len,
        };
    }
}
