//! Column definitions and sizing modes.

use serde::{Deserialize, Serialize};

/// Column sizing policy applied on every dimensioning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMode {
    /// Widths are stretched or shrunk so they exactly fill the viewport.
    Force,
    /// Widths are proportional to each column's flex weight.
    Flex,
    /// Widths are left alone; the grid may overflow horizontally.
    #[default]
    #[serde(other)]
    Standard,
}

/// A grid column.
///
/// # Examples
///
/// ```
/// use datagrid::Column;
///
/// let columns = vec![
///     Column::new("id", 80).min_width(40),
///     Column::new("name", 200).flex_grow(2.0),
///     Column::new("actions", 60).fixed(),
/// ];
/// assert_eq!(columns[1].name, "name");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier for this column.
    pub id: String,
    /// Header label. Defaults to the id.
    #[serde(default)]
    pub name: String,
    /// Current width in pixels.
    pub width: u32,
    /// Width floor honored by every allocation pass.
    #[serde(default)]
    pub min_width: Option<u32>,
    /// Weight used in flex mode. Missing weights count as 1.
    #[serde(default)]
    pub flex_grow: Option<f64>,
    /// Whether allocation passes may change this column's width.
    #[serde(default = "default_can_auto_resize")]
    pub can_auto_resize: bool,
    /// Width this column had at the start of the last force-fill pass that
    /// saw a nonzero total. Only read when every current width is zero.
    #[serde(skip)]
    pub(crate) basis: Option<u32>,
}

fn default_can_auto_resize() -> bool {
    true
}

impl Column {
    /// Create a resizable column with an initial width.
    pub fn new(id: impl Into<String>, width: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            width,
            min_width: None,
            flex_grow: None,
            can_auto_resize: true,
            basis: None,
        }
    }

    /// Set the header label.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the minimum width.
    pub fn min_width(mut self, min: u32) -> Self {
        self.min_width = Some(min);
        self
    }

    /// Set the flex weight.
    pub fn flex_grow(mut self, weight: f64) -> Self {
        self.flex_grow = Some(weight);
        self
    }

    /// Exclude this column from redistribution.
    pub fn fixed(mut self) -> Self {
        self.can_auto_resize = false;
        self
    }

    /// Minimum width, or zero when none is configured.
    pub fn floor(&self) -> u32 {
        self.min_width.unwrap_or(0)
    }

    /// Set a new width, never below the minimum.
    pub fn resize(&mut self, width: u32) {
        self.width = width.max(self.floor());
    }
}

/// Sum of the current widths.
pub fn total_width(columns: &[Column]) -> u32 {
    columns.iter().fold(0, |sum, c| sum.saturating_add(c.width))
}
