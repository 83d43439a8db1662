//! Column-width distribution, viewport dimensioning and state
//! synchronization for a tabular grid widget.
//!
//! The crate renders nothing. A host owns a [`DataGrid`], feeds it layout,
//! visibility, resize, pagination and row-interaction triggers, and reads
//! column widths and content dimensions back from its [`TableState`].

pub mod allocator;
pub mod column;
pub mod debounce;
pub mod dimensions;
pub mod grid;
pub mod notify;
pub mod options;
pub mod rows;
pub mod selection;
pub mod state;

pub use allocator::{Allocation, adjust_column_widths, allocate, force_fill_column_widths};
pub use column::{Column, ColumnMode, total_width};
pub use dimensions::{Dimensions, Rect};
pub use grid::{DataGrid, GridConfig, GridEvent, Host, RowClick, Trigger};
pub use options::{Height, HostFlags, OptionsError, TableOptions};
pub use rows::{ChangeKind, Record, Row, RowCollection, RowDiffer, RowsChange};
pub use selection::{Selection, SetSelected};
pub use state::{PageEvent, RowsUpdate, StateNotice, TableState};

pub mod prelude {
    pub use crate::column::{Column, ColumnMode};
    pub use crate::dimensions::{Dimensions, Rect};
    pub use crate::grid::{DataGrid, GridConfig, GridEvent, Host, RowClick, Trigger};
    pub use crate::options::{Height, TableOptions};
    pub use crate::rows::{Row, RowCollection};
    pub use crate::selection::SetSelected;
    pub use crate::state::{PageEvent, TableState};
}
