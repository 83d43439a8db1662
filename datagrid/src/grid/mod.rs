//! Grid coordinator.
//!
//! [`DataGrid`] owns the table state and sequences the engine in response to
//! host triggers:
//!
//! - layout ready / became visible: run a dimensioning pass immediately
//! - resize: run a dimensioning pass once the debounce window elapses
//! - change-detection cycle: push rows into state when they changed
//!   structurally
//! - page change, row click, row select: update state and notify observers
//!
//! A dimensioning pass measures the host, resolves the content dimensions,
//! reallocates column widths and stores the result in one write.
//!
//! # Example
//!
//! ```
//! use datagrid::prelude::*;
//!
//! struct Fixed;
//!
//! impl Host for Fixed {
//!     fn bounding_rect(&self) -> Rect {
//!         Rect::new(400.0, 300.0)
//!     }
//!     fn scrollbar_width(&self) -> u32 {
//!         0
//!     }
//! }
//!
//! let options = TableOptions::new(vec![Column::new("a", 100), Column::new("b", 100)])
//!     .column_mode(ColumnMode::Force);
//! let rows = RowCollection::default();
//! let (mut grid, _events) = DataGrid::new(Fixed, options, &rows, Vec::new(), GridConfig::default());
//! grid.attach();
//!
//! let widths: Vec<u32> = grid.state().columns().iter().map(|c| c.width).collect();
//! assert_eq!(widths, vec![200, 200]);
//! ```

mod events;
pub mod runtime;

pub use events::{GridEvent, RowClick, Trigger};

use log::{debug, trace};
use tokio::time::{Duration, Instant};

use crate::allocator::{Allocation, allocate};
use crate::debounce::Debouncer;
use crate::dimensions::{Dimensions, Rect, resolve};
use crate::notify::{self, EventReceiver, EventSender};
use crate::options::TableOptions;
use crate::rows::{Row, RowCollection, RowDiffer, RowsChange};
use crate::selection::SetSelected;
use crate::state::{PageEvent, StateNotice, TableState};

/// Default resize debounce window.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(10);

/// Capabilities the host environment provides to the grid.
pub trait Host {
    /// Current bounding rectangle of the grid element.
    fn bounding_rect(&self) -> Rect;

    /// Width of the platform's vertical scrollbar track.
    fn scrollbar_width(&self) -> u32;
}

impl<T: Host + ?Sized> Host for &T {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }

    fn scrollbar_width(&self) -> u32 {
        (**self).scrollbar_width()
    }
}

/// Grid behavior settings.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Resize signals closer together than this collapse into one pass.
    pub resize_debounce: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resize_debounce: RESIZE_DEBOUNCE,
        }
    }
}

impl GridConfig {
    /// Set the resize debounce window.
    pub fn resize_debounce(mut self, window: Duration) -> Self {
        self.resize_debounce = window;
        self
    }
}

/// Grid instance: exclusive owner of the table state.
#[derive(Debug)]
pub struct DataGrid<H: Host> {
    host: H,
    state: TableState,
    notices: EventReceiver<StateNotice>,
    events: EventSender<GridEvent>,
    differ: RowDiffer,
    resize: Debouncer,
    layout_ready: bool,
    passes: u64,
}

impl<H: Host> DataGrid<H> {
    /// Create a grid and push the initial options, rows and selection into
    /// its state.
    ///
    /// Returns the grid and the receiver its observer reads events from.
    /// The initial push is not reported to the observer. No dimensioning
    /// pass runs until [`attach`](Self::attach) or a visibility trigger.
    pub fn new(
        host: H,
        options: TableOptions,
        rows: &RowCollection,
        selected: Vec<Row>,
        config: GridConfig,
    ) -> (Self, EventReceiver<GridEvent>) {
        let (notice_tx, notices) = notify::channel();
        let (events, observer) = notify::channel();

        let mut state = TableState::new(host.scrollbar_width(), notice_tx);
        state
            .set_options(options)
            .set_rows(rows.rows())
            .set_selected(SetSelected::Replace(selected));

        let mut differ = RowDiffer::new();
        differ.diff(rows);

        let mut grid = Self {
            host,
            state,
            notices,
            events,
            differ,
            resize: Debouncer::new(config.resize_debounce),
            layout_ready: false,
            passes: 0,
        };
        grid.notices.drain();
        (grid, observer)
    }

    /// Read-only view of the table state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Whether the host has laid the grid out.
    pub fn is_layout_ready(&self) -> bool {
        self.layout_ready
    }

    /// Number of dimensioning passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    // -------------------------------------------------------------------------
    // Triggers
    // -------------------------------------------------------------------------

    /// Handle one trigger to completion.
    pub fn handle(&mut self, trigger: Trigger, now: Instant) {
        match trigger {
            Trigger::LayoutReady => self.attach(),
            Trigger::Visibility(visible) => self.on_visibility(visible),
            Trigger::Resize => self.on_resize(now),
            Trigger::Check(rows) => {
                self.check(&rows);
            }
            Trigger::Options(options) => self.set_options(options),
            Trigger::Selected(rows) => self.set_selected(rows),
            Trigger::PageChange(event) => self.on_page_change(event),
            Trigger::RowClick(click) => self.on_row_click(click),
            Trigger::RowSelect(row) => self.on_row_select(row),
        }
    }

    /// The host finished its first layout.
    pub fn attach(&mut self) {
        self.layout_ready = true;
        self.adjust_sizes();
    }

    /// The grid became visible or hidden. Becoming visible re-runs the
    /// dimensioning pass, which corrects a measurement taken while hidden.
    pub fn on_visibility(&mut self, visible: bool) {
        if visible {
            self.layout_ready = true;
            self.adjust_sizes();
        }
    }

    /// Schedule a debounced dimensioning pass.
    pub fn on_resize(&mut self, now: Instant) {
        self.resize.signal(now);
        trace!("Resize signal, pass due at {:?}", self.resize.deadline());
    }

    /// Deadline of the pending resize pass, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Run the pending resize pass if it is due. Returns true if a pass ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.resize.fire(now) {
            Some(collapsed) => {
                trace!("Debounced {} resize signal(s) into one pass", collapsed);
                self.adjust_sizes();
                true
            }
            None => false,
        }
    }

    /// Run the pending resize pass now, if there is one.
    pub fn flush(&mut self) -> bool {
        if self.resize.flush().is_some() {
            self.adjust_sizes();
            true
        } else {
            false
        }
    }

    /// Change-detection cycle. Pushes the rows into state only when the
    /// collection was replaced or gained or lost rows.
    pub fn check(&mut self, rows: &RowCollection) -> Option<RowsChange> {
        let Some(change) = self.differ.diff(rows) else {
            trace!("Rows unchanged ({})", rows.id());
            return None;
        };
        debug!(
            "Rows changed ({:?}): {} -> {} rows",
            change.kind, change.previous_len, change.len
        );
        self.state.set_rows(rows.rows());
        self.forward_notices();
        Some(change)
    }

    /// Replace the options and re-run the dimensioning pass.
    pub fn set_options(&mut self, options: TableOptions) {
        self.state.set_options(options);
        self.adjust_sizes();
    }

    /// Replace the selection with a set supplied by the host.
    pub fn set_selected(&mut self, rows: Vec<Row>) {
        self.state.set_selected(SetSelected::Replace(rows));
    }

    /// Footer page change: update state, then notify the observer.
    pub fn on_page_change(&mut self, event: PageEvent) {
        self.state.set_page(event);
        self.events.send(GridEvent::PageChanged(event));
    }

    /// Body row click: forwarded to the observer untouched.
    pub fn on_row_click(&mut self, click: RowClick) {
        self.events.send(GridEvent::RowClicked(click));
    }

    /// Body row select: toggle the row, then notify the observer.
    pub fn on_row_select(&mut self, row: Row) {
        self.state.set_selected(SetSelected::Toggle(row));
        let selected = self.state.selected().rows().to_vec();
        self.events.send(GridEvent::SelectionChanged(selected));
    }

    // -------------------------------------------------------------------------
    // Dimensioning
    // -------------------------------------------------------------------------

    /// Measure the host, resolve dimensions and reallocate column widths.
    pub fn adjust_sizes(&mut self) -> Dimensions {
        let rect = self.host.bounding_rect();
        let dimensions = resolve(rect, self.state.options(), self.state.scrollbar_width());
        let allocation = self.adjust_columns(dimensions.allocation_width);
        self.state.set_dimensions(dimensions);
        self.passes += 1;

        debug!(
            "Dimensioning pass {}: {}x{} -> inner {}, body {:?}, columns {:?}",
            self.passes,
            rect.width,
            rect.height,
            dimensions.inner_width,
            dimensions.body_height,
            allocation
        );
        self.events.send(GridEvent::DimensionsChanged(dimensions));
        dimensions
    }

    fn adjust_columns(&mut self, width: u32) -> Allocation {
        let mode = self.state.options().column_mode;
        let force_index = self.state.options().force_index;
        allocate(self.state.columns_mut(), width, mode, force_index)
    }

    fn forward_notices(&mut self) {
        for notice in self.notices.drain() {
            match notice {
                StateNotice::RowsUpdated(update) => {
                    self.events.send(GridEvent::RowsUpdated(update));
                }
            }
        }
    }
}
