use std::cell::Cell;
use std::rc::Rc;

use datagrid::notify::EventReceiver;
use datagrid::prelude::*;
use datagrid::{RowsUpdate, total_width};
use serde_json::json;
use tokio::time::{Duration, Instant};

#[derive(Clone)]
struct TestHost {
    rect: Rc<Cell<Rect>>,
    scrollbar: u32,
}

impl TestHost {
    fn new(width: f64, height: f64) -> Self {
        Self {
            rect: Rc::new(Cell::new(Rect::new(width, height))),
            scrollbar: 17,
        }
    }

    fn set(&self, width: f64, height: f64) {
        self.rect.set(Rect::new(width, height));
    }
}

impl Host for TestHost {
    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn scrollbar_width(&self) -> u32 {
        self.scrollbar
    }
}

fn force_options() -> TableOptions {
    TableOptions::new(vec![
        Column::new("a", 100),
        Column::new("b", 100),
        Column::new("c", 100),
    ])
    .column_mode(ColumnMode::Force)
}

fn rows(n: usize) -> RowCollection {
    (0..n).map(|i| Row::from_value(json!({ "id": i }))).collect()
}

fn widths(grid: &DataGrid<TestHost>) -> Vec<u32> {
    grid.state().columns().iter().map(|c| c.width).collect()
}

fn grid_with(
    host: &TestHost,
    options: TableOptions,
    rows: &RowCollection,
) -> (DataGrid<TestHost>, EventReceiver<GridEvent>) {
    DataGrid::new(host.clone(), options, rows, Vec::new(), GridConfig::default())
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn test_new_pushes_initial_state_without_events() {
    let host = TestHost::new(310.0, 200.0);
    let data = rows(4);
    let first = data.get(0).unwrap();
    let (grid, mut events) = DataGrid::new(
        host.clone(),
        force_options(),
        &data,
        vec![first.clone()],
        GridConfig::default(),
    );

    assert_eq!(grid.state().rows().len(), 4);
    assert!(grid.state().is_selected(&first));
    assert_eq!(grid.state().scrollbar_width(), 17);
    assert_eq!(widths(&grid), vec![100, 100, 100], "no pass before layout");
    assert_eq!(grid.passes(), 0);
    assert!(!grid.is_layout_ready());
    assert!(events.drain().is_empty());
}

#[test]
fn test_attach_runs_dimensioning_pass() {
    let host = TestHost::new(310.0, 200.0);
    let (mut grid, mut events) = grid_with(&host, force_options(), &rows(1));

    grid.attach();
    assert!(grid.is_layout_ready());
    assert_eq!(grid.passes(), 1);
    assert_eq!(grid.state().inner_width(), 310);
    assert_eq!(widths(&grid), vec![103, 103, 104]);
    assert_eq!(
        events.drain(),
        vec![GridEvent::DimensionsChanged(grid.state().dimensions())]
    );
}

#[test]
fn test_vertical_scroll_reserves_scrollbar() {
    let host = TestHost::new(500.0, 300.0);
    let options = force_options()
        .header_height(Height::Fixed(30))
        .footer_height(20)
        .scrollbar_v();
    let (mut grid, _events) = grid_with(&host, options, &rows(1));

    grid.attach();
    assert_eq!(grid.state().inner_width(), 500);
    assert_eq!(grid.state().body_height(), Some(250));
    assert_eq!(total_width(grid.state().columns()), 483);
}

#[test]
fn test_flex_mode_pass() {
    let host = TestHost::new(400.0, 100.0);
    let options = TableOptions::new(vec![
        Column::new("a", 10).flex_grow(1.0),
        Column::new("b", 10).flex_grow(3.0),
    ])
    .column_mode(ColumnMode::Flex);
    let (mut grid, _events) = grid_with(&host, options, &rows(1));

    grid.attach();
    assert_eq!(widths(&grid), vec![100, 300]);
}

#[test]
fn test_standard_mode_pass_keeps_widths() {
    let host = TestHost::new(1000.0, 100.0);
    let options = TableOptions::new(vec![Column::new("a", 120), Column::new("b", 80)]);
    let (mut grid, _events) = grid_with(&host, options, &rows(1));

    grid.attach();
    assert_eq!(widths(&grid), vec![120, 80]);
    assert_eq!(grid.state().inner_width(), 1000);
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_hidden_init_corrects_on_visibility() {
    let host = TestHost::new(0.0, 0.0);
    let (mut grid, _events) = grid_with(&host, force_options(), &rows(1));

    grid.attach();
    assert_eq!(grid.state().inner_width(), 0);
    assert_eq!(widths(&grid), vec![0, 0, 0]);

    host.set(600.0, 400.0);
    grid.handle(Trigger::Visibility(true), Instant::now());
    assert_eq!(grid.state().inner_width(), 600);
    assert_eq!(widths(&grid), vec![200, 200, 200]);
}

#[test]
fn test_becoming_hidden_does_nothing() {
    let host = TestHost::new(300.0, 100.0);
    let (mut grid, mut events) = grid_with(&host, force_options(), &rows(1));

    grid.handle(Trigger::Visibility(false), Instant::now());
    assert_eq!(grid.passes(), 0);
    assert!(events.drain().is_empty());
}

// ============================================================================
// Resize debounce
// ============================================================================

#[test]
fn test_resize_signals_collapse_into_one_pass() {
    let host = TestHost::new(300.0, 100.0);
    let (mut grid, _events) = grid_with(&host, force_options(), &rows(1));
    grid.attach();
    let t0 = Instant::now();

    host.set(400.0, 100.0);
    grid.on_resize(t0);
    host.set(610.0, 100.0);
    grid.on_resize(t0 + Duration::from_millis(3));

    assert!(!grid.poll(t0 + Duration::from_millis(10)), "window was reset");
    assert_eq!(grid.passes(), 1);

    assert!(grid.poll(t0 + Duration::from_millis(13)));
    assert_eq!(grid.passes(), 2);
    assert_eq!(grid.state().inner_width(), 610);
    assert_eq!(widths(&grid), vec![203, 203, 204]);

    assert!(!grid.poll(t0 + Duration::from_millis(50)));
    assert_eq!(grid.passes(), 2);
}

#[test]
fn test_resize_deadline() {
    let host = TestHost::new(300.0, 100.0);
    let (mut grid, _events) = grid_with(&host, force_options(), &rows(1));
    let t0 = Instant::now();

    assert_eq!(grid.next_deadline(), None);
    grid.handle(Trigger::Resize, t0);
    assert_eq!(grid.next_deadline(), Some(t0 + Duration::from_millis(10)));
}

#[test]
fn test_custom_debounce_window() {
    let host = TestHost::new(300.0, 100.0);
    let config = GridConfig::default().resize_debounce(Duration::from_millis(50));
    let (mut grid, _events) =
        DataGrid::new(host.clone(), force_options(), &rows(1), Vec::new(), config);
    let t0 = Instant::now();

    grid.on_resize(t0);
    assert!(!grid.poll(t0 + Duration::from_millis(20)));
    assert!(grid.poll(t0 + Duration::from_millis(50)));
}

#[test]
fn test_flush_runs_pending_resize() {
    let host = TestHost::new(300.0, 100.0);
    let (mut grid, _events) = grid_with(&host, force_options(), &rows(1));

    assert!(!grid.flush());
    grid.on_resize(Instant::now());
    assert!(grid.flush());
    assert_eq!(grid.passes(), 1);
    assert_eq!(grid.next_deadline(), None);
}

// ============================================================================
// Change detection
// ============================================================================

#[test]
fn test_check_unchanged_rows_is_quiet() {
    let host = TestHost::new(300.0, 100.0);
    let data = rows(3);
    let (mut grid, mut events) = grid_with(&host, force_options(), &data);

    assert!(grid.check(&data).is_none());
    assert!(events.drain().is_empty());
}

#[test]
fn test_check_replaced_rows_updates_state() {
    let host = TestHost::new(300.0, 100.0);
    let data = rows(3);
    let (mut grid, mut events) = grid_with(&host, force_options(), &data);

    let replacement = rows(5);
    grid.handle(Trigger::Check(replacement.clone()), Instant::now());

    assert_eq!(grid.state().rows(), replacement.rows().as_slice());
    assert_eq!(
        events.drain(),
        vec![GridEvent::RowsUpdated(RowsUpdate {
            len: 5,
            previous_len: 3,
            page: 0,
            page_count: 1,
        })]
    );
    assert!(grid.check(&replacement).is_none());
}

#[test]
fn test_check_detects_push_on_same_collection() {
    let host = TestHost::new(300.0, 100.0);
    let data = rows(2);
    let (mut grid, _events) = grid_with(&host, force_options(), &data);

    data.push(Row::from_value(json!({ "id": 9 })));
    assert!(grid.check(&data).is_some());
    assert_eq!(grid.state().rows().len(), 3);
}

#[test]
fn test_check_ignores_field_edits() {
    let host = TestHost::new(300.0, 100.0);
    let data = rows(2);
    let (mut grid, _events) = grid_with(&host, force_options(), &data);

    data.get(1).unwrap().set("id", json!("changed"));
    assert!(grid.check(&data).is_none());
    assert_eq!(grid.state().rows()[1].get("id"), Some(json!("changed")));
}

// ============================================================================
// Pagination, clicks and selection
// ============================================================================

#[test]
fn test_page_change_updates_state_then_notifies() {
    let host = TestHost::new(300.0, 100.0);
    let (mut grid, mut events) = grid_with(&host, force_options().page_size(10), &rows(25));

    grid.handle(Trigger::PageChange(PageEvent::new(2)), Instant::now());
    assert_eq!(grid.state().page(), 2);
    assert_eq!(grid.state().page_range(), 20..25);
    assert_eq!(events.drain(), vec![GridEvent::PageChanged(PageEvent::new(2))]);
}

#[test]
fn test_page_change_without_paging_matches_event() {
    let host = TestHost::new(300.0, 100.0);
    let (mut grid, mut events) = grid_with(&host, force_options(), &rows(1));

    grid.handle(Trigger::PageChange(PageEvent::new(3)), Instant::now());
    assert_eq!(grid.state().page(), 3);
    assert_eq!(grid.state().page_range(), 0..1);
    assert_eq!(events.drain(), vec![GridEvent::PageChanged(PageEvent::new(3))]);
}

#[test]
fn test_row_click_is_forwarded() {
    let host = TestHost::new(300.0, 100.0);
    let data = rows(2);
    let (mut grid, mut events) = grid_with(&host, force_options(), &data);

    let click = RowClick {
        row: data.get(1).unwrap(),
        index: 1,
    };
    grid.handle(Trigger::RowClick(click.clone()), Instant::now());
    assert_eq!(events.drain(), vec![GridEvent::RowClicked(click)]);
    assert!(grid.state().selected().is_empty(), "clicks do not select");
}

#[test]
fn test_row_select_toggles() {
    let host = TestHost::new(300.0, 100.0);
    let data = rows(2);
    let (mut grid, mut events) = grid_with(&host, force_options(), &data);
    let row = data.get(0).unwrap();

    grid.handle(Trigger::RowSelect(row.clone()), Instant::now());
    assert!(grid.state().is_selected(&row));

    grid.handle(Trigger::RowSelect(row.clone()), Instant::now());
    assert!(!grid.state().is_selected(&row));

    assert_eq!(
        events.drain(),
        vec![
            GridEvent::SelectionChanged(vec![row.clone()]),
            GridEvent::SelectionChanged(Vec::new()),
        ]
    );
}

#[test]
fn test_bulk_selection_from_host() {
    let host = TestHost::new(300.0, 100.0);
    let data = rows(3);
    let (mut grid, mut events) = grid_with(&host, force_options(), &data);

    grid.handle(Trigger::RowSelect(data.get(0).unwrap()), Instant::now());
    grid.handle(Trigger::Selected(vec![data.get(2).unwrap()]), Instant::now());

    assert_eq!(grid.state().selected().rows(), &[data.get(2).unwrap()]);
    assert_eq!(events.drain().len(), 1, "host selection is not echoed");
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_new_options_rerun_pass() {
    let host = TestHost::new(400.0, 100.0);
    let (mut grid, _events) = grid_with(&host, force_options(), &rows(1));
    grid.attach();

    let options = TableOptions::new(vec![Column::new("x", 50), Column::new("y", 150)])
        .column_mode(ColumnMode::Force);
    grid.handle(Trigger::Options(options), Instant::now());

    assert_eq!(grid.passes(), 2);
    assert_eq!(widths(&grid), vec![100, 300]);
}
