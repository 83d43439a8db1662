//! Resize example - a simulated window drag against a force-fill grid
//!
//! A burst of resize signals arrives a few milliseconds apart, the way a
//! window manager reports a drag. The grid collapses the burst into one
//! dimensioning pass and prints the resulting column widths.
//!
//! Logs go to `resize.log`.

use std::cell::Cell;
use std::fs::File;
use std::rc::Rc;

use datagrid::grid::runtime::run;
use datagrid::notify;
use datagrid::prelude::*;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use tokio::time::{Duration, sleep};

// =============================================================================
// Host
// =============================================================================

#[derive(Clone)]
struct Window {
    rect: Rc<Cell<Rect>>,
}

impl Window {
    fn drag_to(&self, width: f64) {
        let height = self.rect.get().height;
        self.rect.set(Rect::new(width, height));
    }
}

impl Host for Window {
    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn scrollbar_width(&self) -> u32 {
        17
    }
}

// =============================================================================
// Table
// =============================================================================

const OPTIONS: &str = r#"{
    "columns": [
        { "id": "name", "name": "Name", "width": 200, "minWidth": 120 },
        { "id": "gender", "name": "Gender", "width": 100 },
        { "id": "company", "name": "Company", "width": 300 }
    ],
    "headerHeight": 40,
    "footerHeight": 30,
    "scrollbarV": true,
    "columnMode": "force",
    "limit": 10
}"#;

fn print_widths(label: &str, grid: &DataGrid<Window>) {
    let columns: Vec<String> = grid
        .state()
        .columns()
        .iter()
        .map(|c| format!("{}={}", c.name, c.width))
        .collect();
    println!(
        "{label:>8}: inner {:>4}  body {:?}  [{}]",
        grid.state().inner_width(),
        grid.state().body_height(),
        columns.join(", ")
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("resize.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, Config::default(), log_file);
    }

    let options = match TableOptions::from_json(OPTIONS) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Invalid options: {e}");
            return;
        }
    };

    let window = Window {
        rect: Rc::new(Cell::new(Rect::new(800.0, 400.0))),
    };
    let rows: RowCollection = (0..25)
        .map(|i| Row::from_value(serde_json::json!({ "name": format!("Person {i}") })))
        .collect();

    let (mut grid, mut events) =
        DataGrid::new(window.clone(), options, &rows, Vec::new(), GridConfig::default());
    grid.attach();
    print_widths("attach", &grid);

    let (tx, triggers) = notify::channel();
    let drag = {
        let window = window.clone();
        async move {
            for width in [820.0, 870.0, 930.0, 1024.0] {
                window.drag_to(width);
                tx.send(Trigger::Resize);
                sleep(Duration::from_millis(3)).await;
            }
            sleep(Duration::from_millis(20)).await;
            tx.send(Trigger::PageChange(PageEvent::new(2)));
        }
    };

    let (grid, ()) = tokio::join!(run(grid, triggers), drag);
    print_widths("drag", &grid);
    println!("  passes: {}", grid.passes());

    for event in events.drain() {
        println!("   event: {event:?}");
    }
}
