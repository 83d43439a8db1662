//! Column width allocation.
//!
//! Two policies redistribute widths to a target total:
//!
//! - **force-fill** scales each column in proportion to its current width
//!   and hands the rounding remainder to one column (the force index), so
//!   the widths sum to exactly the target.
//! - **flex** splits the target by flex weight and hands the rounding
//!   remainder to the last column.
//!
//! Both honor minimum widths by clamping violators and re-splitting what is
//! left over the unclamped columns until nothing violates its floor. When the
//! floors alone exceed the target, every column sits at its floor and the
//! grid overflows. Columns that cannot auto-resize keep their width and are
//! taken off the budget first.

use log::warn;

use crate::column::{Column, ColumnMode};

/// Result of an allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// No redistribution happened (standard mode or nothing resizable).
    Unchanged,
    /// Widths sum to the target exactly.
    Filled,
    /// Floors or fixed columns exceed the target by `excess` pixels.
    Overflow { excess: u32 },
}

/// Apply the sizing policy for `mode`.
pub fn allocate(
    columns: &mut [Column],
    width: u32,
    mode: ColumnMode,
    force_index: Option<usize>,
) -> Allocation {
    match mode {
        ColumnMode::Force => force_fill_column_widths(columns, width, force_index),
        ColumnMode::Flex => adjust_column_widths(columns, width),
        ColumnMode::Standard => Allocation::Unchanged,
    }
}

/// Stretch or shrink columns so their widths sum to `width`.
///
/// `force_index` names the column that absorbs the rounding remainder; it
/// defaults to the last resizable column.
pub fn force_fill_column_widths(
    columns: &mut [Column],
    width: u32,
    force_index: Option<usize>,
) -> Allocation {
    let slots = resizable(columns);
    if slots.is_empty() {
        return Allocation::Unchanged;
    }

    let current: u64 = slots.iter().map(|&i| u64::from(columns[i].width)).sum();
    let weights: Vec<f64> = if current > 0 {
        for &i in &slots {
            columns[i].basis = Some(columns[i].width);
        }
        slots.iter().map(|&i| f64::from(columns[i].width)).collect()
    } else {
        // A zero-width pass (hidden grid) wiped the widths; fall back to the
        // proportions seen before it.
        slots
            .iter()
            .map(|&i| f64::from(columns[i].basis.unwrap_or(0)))
            .collect()
    };
    let absorber = force_index
        .and_then(|f| slots.iter().position(|&i| i == f))
        .unwrap_or(slots.len() - 1);

    apply(columns, &slots, &weights, width, absorber)
}

/// Split `width` across columns in proportion to their flex weights.
///
/// Missing weights count as 1; the last resizable column absorbs the
/// rounding remainder.
pub fn adjust_column_widths(columns: &mut [Column], width: u32) -> Allocation {
    let slots = resizable(columns);
    if slots.is_empty() {
        return Allocation::Unchanged;
    }

    let weights: Vec<f64> = slots
        .iter()
        .map(|&i| match columns[i].flex_grow {
            Some(w) if w.is_finite() && w > 0.0 => w,
            Some(_) => 0.0,
            None => 1.0,
        })
        .collect();
    let absorber = slots.len() - 1;

    apply(columns, &slots, &weights, width, absorber)
}

fn resizable(columns: &[Column]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.can_auto_resize)
        .map(|(i, _)| i)
        .collect()
}

fn apply(
    columns: &mut [Column],
    slots: &[usize],
    weights: &[f64],
    width: u32,
    absorber: usize,
) -> Allocation {
    let fixed: u64 = columns
        .iter()
        .filter(|c| !c.can_auto_resize)
        .map(|c| u64::from(c.width))
        .sum();
    let budget = width.saturating_sub(u32::try_from(fixed).unwrap_or(u32::MAX));
    let floors: Vec<u32> = slots.iter().map(|&i| columns[i].floor()).collect();

    let widths = distribute(&floors, weights, budget, absorber);
    for (&i, w) in slots.iter().zip(widths) {
        columns[i].width = w;
    }

    let total: u64 = columns.iter().map(|c| u64::from(c.width)).sum();
    if total > u64::from(width) {
        warn!("Column floors exceed available width: {} > {}", total, width);
        Allocation::Overflow {
            excess: u32::try_from(total - u64::from(width)).unwrap_or(u32::MAX),
        }
    } else {
        Allocation::Filled
    }
}

/// Split `budget` over slots in proportion to `weights`, never going below
/// `floors`. The slot at `absorber` takes the rounding remainder unless it
/// was clamped, in which case the last unclamped slot does.
fn distribute(floors: &[u32], weights: &[f64], budget: u32, absorber: usize) -> Vec<u32> {
    let floor_total: u64 = floors.iter().map(|&f| u64::from(f)).sum();
    if floor_total > u64::from(budget) {
        return floors.to_vec();
    }

    let mut widths = vec![0u32; floors.len()];
    let mut clamped = vec![false; floors.len()];
    let mut remaining = budget;

    loop {
        let free: Vec<usize> = (0..floors.len()).filter(|&i| !clamped[i]).collect();
        let Some(&last_free) = free.last() else {
            // Every slot sits on its floor; keep the total exact.
            widths[absorber] += remaining;
            break;
        };

        let weight_total: f64 = free.iter().map(|&i| weights[i]).sum();
        let share = |i: usize| {
            if weight_total > 0.0 {
                f64::from(remaining) * weights[i] / weight_total
            } else {
                f64::from(remaining) / free.len() as f64
            }
        };

        let violators: Vec<usize> = free
            .iter()
            .copied()
            .filter(|&i| share(i) < f64::from(floors[i]))
            .collect();

        if violators.is_empty() {
            let mut assigned = 0u32;
            for &i in &free {
                let w = share(i).floor() as u32;
                widths[i] = w;
                assigned += w;
            }
            let target = if clamped[absorber] { last_free } else { absorber };
            widths[target] += remaining.saturating_sub(assigned);
            break;
        }

        for i in violators {
            clamped[i] = true;
            widths[i] = floors[i];
            remaining = remaining.saturating_sub(floors[i]);
        }
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribute_equal_split_without_weights() {
        let widths = distribute(&[0, 0, 0], &[0.0, 0.0, 0.0], 10, 2);
        assert_eq!(widths, vec![3, 3, 4]);
    }

    #[test]
    fn test_distribute_clamps_in_rounds() {
        // Clamping slot 0 shrinks what is left, which pushes slot 1 under
        // its floor on the second round.
        let widths = distribute(&[50, 25, 0], &[1.0, 3.0, 6.0], 100, 2);
        assert_eq!(widths, vec![50, 25, 25]);
    }

    #[test]
    fn test_distribute_floors_equal_budget() {
        let widths = distribute(&[40, 60], &[1.0, 1.0], 100, 1);
        assert_eq!(widths, vec![40, 60]);
    }

    #[test]
    fn test_distribute_floors_over_budget() {
        let widths = distribute(&[40, 70], &[1.0, 1.0], 100, 1);
        assert_eq!(widths, vec![40, 70]);
    }
}
