use std::cell::RefCell;
use std::rc::Rc;

use listview::pagination::{PaginationState, page_window};
use listview::prelude::*;

fn records(n: usize) -> Vec<Record> {
    (1..=n).map(|i| Record::new(i as u64).set("code", format!("J{i:03}"))).collect()
}

fn list(items_per_page: usize) -> ListView {
    let config = ListConfig::new("Journaux", vec![Column::new("code", "Code", "code")])
        .items_per_page(items_per_page);
    ListView::new(config, Handlers::new()).unwrap()
}

fn row_ids(view: &View) -> Vec<String> {
    match &view.page().unwrap().table.body {
        TableBody::Rows(rows) => rows.iter().map(|r| r.id.clone()).collect(),
        TableBody::Empty(_) => Vec::new(),
    }
}

// ============================================================================
// Page window
// ============================================================================

#[test]
fn test_page_window_centered() {
    assert_eq!(page_window(7, 12), vec![5, 6, 7, 8, 9]);
}

#[test]
fn test_page_window_near_start() {
    assert_eq!(page_window(1, 12), vec![1, 2, 3, 4, 5]);
    assert_eq!(page_window(2, 12), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_page_window_near_end() {
    assert_eq!(page_window(11, 12), vec![8, 9, 10, 11, 12]);
    assert_eq!(page_window(12, 12), vec![8, 9, 10, 11, 12]);
}

// ============================================================================
// Pagination state
// ============================================================================

#[test]
fn test_total_pages_never_below_one() {
    let mut state = PaginationState::new(10);
    assert_eq!(state.total_pages(), 1);
    assert_eq!(state.summary(), "0-0 sur 0");

    state.set_total_items(23);
    assert_eq!(state.total_pages(), 3);
}

#[test]
fn test_navigation_bounds() {
    let mut state = PaginationState::new(10);
    state.set_total_items(23);

    assert!(!state.can_previous());
    assert!(!state.previous());
    assert!(state.go_to(3));
    assert!(!state.can_next());
    assert!(!state.next());
    assert!(!state.go_to(4));
    assert!(!state.go_to(0));
    assert!(!state.go_to(3));
    assert_eq!(state.current_page(), 3);

    assert!(state.first());
    assert_eq!(state.current_page(), 1);
    assert!(state.last());
    assert_eq!(state.current_page(), 3);
}

#[test]
fn test_items_per_page_resets_page() {
    let mut state = PaginationState::new(5);
    state.set_total_items(40);
    state.go_to(4);

    assert!(state.set_items_per_page(20));
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.total_pages(), 2);

    // Sizes outside the selector are rejected.
    assert!(!state.set_items_per_page(7));
    assert_eq!(state.items_per_page(), 20);
}

#[test]
fn test_unsupported_initial_size_falls_back() {
    let state = PaginationState::new(15);
    assert_eq!(state.items_per_page(), 10);
}

#[test]
fn test_shrinking_total_clamps_page() {
    let mut state = PaginationState::new(10);
    state.set_total_items(50);
    state.go_to(5);

    state.set_total_items(12);
    assert_eq!(state.current_page(), 2);

    state.set_total_items(0);
    assert_eq!(state.current_page(), 1);
}

// ============================================================================
// Internal mode
// ============================================================================

#[test]
fn test_internal_last_page_slice() {
    let mut list = list(10);
    list.set_data(records(23));
    list.go_to_page(3);

    let view = list.render();
    assert_eq!(row_ids(&view), vec!["21", "22", "23"]);

    let footer = &view.page().unwrap().footer;
    assert_eq!(footer.summary, "21-23 sur 23");
    assert_eq!(footer.total_pages, 3);
    assert!(footer.can_previous);
    assert!(!footer.can_next);
}

#[test]
fn test_internal_footer_window_marks_current() {
    let mut list = list(5);
    list.set_data(records(60));
    list.go_to_page(7);

    let view = list.render();
    let pages: Vec<(usize, bool)> = view
        .page()
        .unwrap()
        .footer
        .pages
        .iter()
        .map(|b| (b.page, b.current))
        .collect();
    assert_eq!(
        pages,
        vec![(5, false), (6, false), (7, true), (8, false), (9, false)]
    );
}

#[test]
fn test_internal_data_shrink_clamps_page() {
    let mut list = list(10);
    list.set_data(records(45));
    list.last_page();
    assert_eq!(list.state().pagination.current_page(), 5);

    list.set_data(records(15));
    assert_eq!(list.state().pagination.current_page(), 2);
    assert_eq!(row_ids(&list.render()).len(), 5);
}

#[test]
fn test_loading_keeps_page() {
    let mut list = list(10);
    list.set_data(records(45));
    list.go_to_page(4);

    // A refetch clears the data while it runs.
    list.set_inputs(ListInputs::loading());
    assert_eq!(list.state().pagination.current_page(), 4);

    list.set_data(records(45));
    assert_eq!(list.state().pagination.current_page(), 4);
}

#[test]
fn test_internal_items_per_page_change() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (ipp, page) = (log.clone(), log.clone());
    let handlers = Handlers::new()
        .on_items_per_page_change(move |n| ipp.borrow_mut().push(format!("ipp {n}")))
        .on_page_change(move |p| page.borrow_mut().push(format!("page {p}")));
    let config = ListConfig::new("Journaux", vec![Column::new("code", "Code", "code")]);
    let mut list = ListView::new(config, handlers).unwrap();
    list.set_data(records(23));

    list.go_to_page(3);
    list.set_items_per_page(20);

    assert_eq!(list.state().pagination.current_page(), 1);
    assert_eq!(row_ids(&list.render()).len(), 20);
    assert_eq!(*log.borrow(), vec!["page 3", "ipp 20", "page 1"]);
}

// ============================================================================
// External mode
// ============================================================================

#[test]
fn test_external_mode_uses_host_total() {
    let pages = Rc::new(RefCell::new(Vec::new()));
    let sink = pages.clone();
    let handlers = Handlers::new().on_page_change(move |p| sink.borrow_mut().push(p));
    let config = ListConfig::new("Journaux", vec![Column::new("code", "Code", "code")]);
    let mut list = ListView::new(config, handlers).unwrap();

    // The host already sliced the page: the rows are shown as given.
    list.set_inputs(ListInputs::new(records(10)).external(95));
    assert_eq!(list.state().pagination.total_pages(), 10);

    list.go_to_page(4);
    list.next_page();
    assert_eq!(*pages.borrow(), vec![4, 5]);

    list.set_inputs(ListInputs::new(records(10)).external(95));
    let view = list.render();
    assert_eq!(row_ids(&view).len(), 10);
    assert_eq!(view.page().unwrap().footer.summary, "41-50 sur 95");
}

#[test]
fn test_external_items_per_page_from_first_page() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (ipp, page) = (log.clone(), log.clone());
    let handlers = Handlers::new()
        .on_items_per_page_change(move |n| ipp.borrow_mut().push(format!("ipp {n}")))
        .on_page_change(move |p| page.borrow_mut().push(format!("page {p}")));
    let config = ListConfig::new("Journaux", vec![Column::new("code", "Code", "code")]);
    let mut list = ListView::new(config, handlers).unwrap();
    list.set_inputs(ListInputs::new(records(10)).external(95));

    list.set_items_per_page(50);
    list.set_items_per_page(50);
    assert_eq!(*log.borrow(), vec!["ipp 50"]);
}
