//! Row selection.

use std::collections::HashSet;

use crate::rows::Row;

/// A selection update routed into the table state.
#[derive(Debug, Clone)]
pub enum SetSelected {
    /// Replace the whole selection.
    Replace(Vec<Row>),
    /// Add the row if absent, remove it if present.
    Toggle(Row),
}

impl From<Vec<Row>> for SetSelected {
    fn from(rows: Vec<Row>) -> Self {
        SetSelected::Replace(rows)
    }
}

impl From<Row> for SetSelected {
    fn from(row: Row) -> Self {
        SetSelected::Toggle(row)
    }
}

/// Selected rows, by identity, in the order they were selected.
///
/// Membership in the current row collection is not required.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    members: HashSet<Row>,
    order: Vec<Row>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update.
    pub fn apply(&mut self, update: SetSelected) {
        match update {
            SetSelected::Replace(rows) => self.replace(rows),
            SetSelected::Toggle(row) => {
                self.toggle(row);
            }
        }
    }

    /// Replace the selection; duplicate handles collapse.
    pub fn replace(&mut self, rows: Vec<Row>) {
        self.members.clear();
        self.order.clear();
        for row in rows {
            if self.members.insert(row.clone()) {
                self.order.push(row);
            }
        }
    }

    /// Toggle a row. Returns true if the row is selected afterwards.
    pub fn toggle(&mut self, row: Row) -> bool {
        if self.members.remove(&row) {
            self.order.retain(|r| !r.same(&row));
            false
        } else {
            self.members.insert(row.clone());
            self.order.push(row);
            true
        }
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, row: &Row) -> bool {
        self.members.contains(row)
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected rows in selection order.
    pub fn rows(&self) -> &[Row] {
        &self.order
    }
}
