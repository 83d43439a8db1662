//! Table configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::column::{Column, ColumnMode};

/// Header or row height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHeight", into = "RawHeight")]
pub enum Height {
    /// Fixed height in pixels.
    Fixed(u32),
    /// Sized by content.
    Auto,
}

impl Height {
    /// The fixed pixel height, if any.
    pub fn fixed(self) -> Option<u32> {
        match self {
            Height::Fixed(px) => Some(px),
            Height::Auto => None,
        }
    }

    pub fn is_auto(self) -> bool {
        self == Height::Auto
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawHeight {
    Px(u32),
    Keyword(String),
}

impl TryFrom<RawHeight> for Height {
    type Error = String;

    fn try_from(raw: RawHeight) -> Result<Self, Self::Error> {
        match raw {
            RawHeight::Px(px) => Ok(Height::Fixed(px)),
            RawHeight::Keyword(word) if word == "auto" => Ok(Height::Auto),
            RawHeight::Keyword(word) => Err(format!(
                "expected a pixel height or \"auto\", got \"{word}\""
            )),
        }
    }
}

impl From<Height> for RawHeight {
    fn from(height: Height) -> Self {
        match height {
            Height::Fixed(px) => RawHeight::Px(px),
            Height::Auto => RawHeight::Keyword("auto".to_string()),
        }
    }
}

/// Errors raised while loading or validating options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options document could not be parsed.
    #[error("Invalid options document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two columns share an id.
    #[error("Duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// The force index points past the last column.
    #[error("Force index {index} out of range for {len} columns")]
    ForceIndexOutOfRange {
        /// The configured index.
        index: usize,
        /// Number of columns.
        len: usize,
    },

    /// Pagination was enabled with a page size of zero.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    /// A flex weight is negative, NaN or infinite.
    #[error("Column '{column}' has invalid flex weight {weight}")]
    InvalidFlexWeight {
        /// Offending column id.
        column: String,
        /// The configured weight.
        weight: f64,
    },
}

/// Configuration snapshot read by the engine on every dimensioning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    /// Visible columns, in display order.
    pub columns: Vec<Column>,
    /// Header height.
    pub header_height: Height,
    /// Body row height.
    pub row_height: Height,
    /// Footer height in pixels, if the footer is shown.
    pub footer_height: Option<u32>,
    /// Vertical scrolling (fixed body height).
    #[serde(rename = "scrollbarV")]
    pub scrollbar_v: bool,
    /// Horizontal scrolling.
    #[serde(rename = "scrollbarH")]
    pub scrollbar_h: bool,
    /// Rows can be selected.
    pub selectable: bool,
    /// Rows show a selection checkbox.
    pub checkboxable: bool,
    /// Column sizing policy.
    pub column_mode: ColumnMode,
    /// Rows per page. `None` disables pagination.
    #[serde(rename = "limit")]
    pub page_size: Option<usize>,
    /// Column absorbing the rounding remainder in force mode.
    pub force_index: Option<usize>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            header_height: Height::Fixed(30),
            row_height: Height::Fixed(30),
            footer_height: None,
            scrollbar_v: false,
            scrollbar_h: false,
            selectable: false,
            checkboxable: false,
            column_mode: ColumnMode::Standard,
            page_size: None,
            force_index: None,
        }
    }
}

impl TableOptions {
    /// Create options with the given columns and defaults for the rest.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Parse and validate a JSON options document.
    pub fn from_json(source: &str) -> Result<Self, OptionsError> {
        let mut options: TableOptions = serde_json::from_str(source)?;
        for column in &mut options.columns {
            if column.name.is_empty() {
                column.name = column.id.clone();
            }
        }
        options.validate()?;
        Ok(options)
    }

    /// Check the options for inconsistencies the engine cannot absorb.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.id.as_str()) {
                return Err(OptionsError::DuplicateColumn(column.id.clone()));
            }
            if let Some(weight) = column.flex_grow
                && (!weight.is_finite() || weight < 0.0)
            {
                return Err(OptionsError::InvalidFlexWeight {
                    column: column.id.clone(),
                    weight,
                });
            }
        }

        if let Some(index) = self.force_index
            && index >= self.columns.len()
        {
            return Err(OptionsError::ForceIndexOutOfRange {
                index,
                len: self.columns.len(),
            });
        }

        if self.page_size == Some(0) {
            return Err(OptionsError::ZeroPageSize);
        }

        Ok(())
    }

    pub fn header_height(mut self, height: Height) -> Self {
        self.header_height = height;
        self
    }

    pub fn row_height(mut self, height: Height) -> Self {
        self.row_height = height;
        self
    }

    pub fn footer_height(mut self, px: u32) -> Self {
        self.footer_height = Some(px);
        self
    }

    /// Enable vertical scrolling.
    pub fn scrollbar_v(mut self) -> Self {
        self.scrollbar_v = true;
        self
    }

    /// Enable horizontal scrolling.
    pub fn scrollbar_h(mut self) -> Self {
        self.scrollbar_h = true;
        self
    }

    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn checkboxable(mut self) -> Self {
        self.checkboxable = true;
        self
    }

    pub fn column_mode(mut self, mode: ColumnMode) -> Self {
        self.column_mode = mode;
        self
    }

    /// Enable pagination.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn force_index(mut self, index: usize) -> Self {
        self.force_index = Some(index);
        self
    }

    /// Container style flags a renderer applies to the grid element.
    pub fn host_flags(&self) -> HostFlags {
        HostFlags {
            fixed_header: !self.header_height.is_auto(),
            fixed_row: !self.row_height.is_auto(),
            scroll_vertical: self.scrollbar_v,
            scroll_horz: self.scrollbar_h,
            selectable: self.selectable,
            checkboxable: self.checkboxable,
        }
    }
}

/// Style flags derived from [`TableOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostFlags {
    pub fixed_header: bool,
    pub fixed_row: bool,
    pub scroll_vertical: bool,
    pub scroll_horz: bool,
    pub selectable: bool,
    pub checkboxable: bool,
}

impl HostFlags {
    /// CSS-style class names for the enabled flags.
    pub fn class_names(&self) -> Vec<&'static str> {
        let flags = [
            (self.fixed_header, "fixed-header"),
            (self.fixed_row, "fixed-row"),
            (self.scroll_vertical, "scroll-vertical"),
            (self.scroll_horz, "scroll-horz"),
            (self.selectable, "selectable"),
            (self.checkboxable, "checkboxable"),
        ];
        flags
            .into_iter()
            .filter_map(|(on, name)| on.then_some(name))
            .collect()
    }
}
