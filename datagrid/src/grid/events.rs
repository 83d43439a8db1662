//! Grid inputs and outputs.

use crate::dimensions::Dimensions;
use crate::options::TableOptions;
use crate::rows::{Row, RowCollection};
use crate::state::{PageEvent, RowsUpdate};

/// A row click reported by the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClick {
    pub row: Row,
    /// Index of the row within the full collection.
    pub index: usize,
}

/// External trigger handled by [`DataGrid::handle`](super::DataGrid::handle).
#[derive(Debug, Clone)]
pub enum Trigger {
    /// The host laid the grid out for the first time.
    LayoutReady,
    /// The visibility observer reported a change.
    Visibility(bool),
    /// The window or container was resized.
    Resize,
    /// Change-detection cycle with the current host rows.
    Check(RowCollection),
    /// New options from the host.
    Options(TableOptions),
    /// Bulk selection from the host.
    Selected(Vec<Row>),
    /// The footer changed page.
    PageChange(PageEvent),
    /// The body reported a row click.
    RowClick(RowClick),
    /// The body toggled a row's selection.
    RowSelect(Row),
}

/// Event delivered to the grid's observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// The row collection was replaced or changed structurally.
    RowsUpdated(RowsUpdate),
    /// The page changed; carries the event as the footer sent it.
    PageChanged(PageEvent),
    /// A row was clicked.
    RowClicked(RowClick),
    /// The body toggled a row; carries the selection afterwards.
    SelectionChanged(Vec<Row>),
    /// A dimensioning pass finished.
    DimensionsChanged(Dimensions),
}
