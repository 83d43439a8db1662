//! Viewport dimensioning.

use crate::options::TableOptions;

/// A measured bounding rectangle, as reported by the host layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when the host has not laid the widget out yet.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.width.is_finite() && self.height.is_finite();
        !finite || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Space available to the grid content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    /// Content width.
    pub inner_width: u32,
    /// Body height; only tracked when vertical scrolling is enabled.
    pub body_height: Option<u32>,
    /// Width handed to the column allocator.
    pub allocation_width: u32,
}

/// Resolve the content dimensions for a measured rectangle.
///
/// Non-finite or negative measurements resolve to zero rather than failing;
/// the next valid measurement corrects them.
pub fn resolve(rect: Rect, options: &TableOptions, scrollbar_width: u32) -> Dimensions {
    let inner_width = to_px(rect.width);

    let body_height = options.scrollbar_v.then(|| {
        let mut height = to_px(rect.height);
        if let Some(header) = options.header_height.fixed() {
            height = height.saturating_sub(header);
        }
        if let Some(footer) = options.footer_height {
            height = height.saturating_sub(footer);
        }
        height
    });

    let allocation_width = if options.scrollbar_v {
        inner_width.saturating_sub(scrollbar_width)
    } else {
        inner_width
    };

    Dimensions {
        inner_width,
        body_height,
        allocation_width,
    }
}

fn to_px(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
