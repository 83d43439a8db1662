//! Async driver for a grid.
//!
//! Feeds triggers from a channel into the grid and wakes up when the resize
//! debounce window elapses. Everything runs on the calling task; the grid is
//! never touched from two places at once.

use log::{debug, info};
use tokio::time::{Instant, sleep_until};

use crate::notify::EventReceiver;

use super::{DataGrid, Host, Trigger};

/// Drive `grid` until the trigger channel closes.
///
/// A resize still pending when the channel closes runs before returning.
/// Returns the grid so the caller can inspect its final state.
pub async fn run<H: Host>(
    mut grid: DataGrid<H>,
    mut triggers: EventReceiver<Trigger>,
) -> DataGrid<H> {
    info!("Grid runtime started");

    loop {
        let deadline = grid.next_deadline();
        let timer = sleep_until(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            trigger = triggers.recv() => match trigger {
                Some(trigger) => grid.handle(trigger, Instant::now()),
                None => break,
            },
            _ = timer, if deadline.is_some() => {
                grid.poll(Instant::now());
            }
        }
    }

    if grid.flush() {
        debug!("Flushed pending resize on shutdown");
    }
    info!("Grid runtime stopped after {} dimensioning passes", grid.passes());
    grid
}
