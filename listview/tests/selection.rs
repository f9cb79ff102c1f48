use std::cell::RefCell;
use std::rc::Rc;

use listview::prelude::*;
use listview::selection::Selection;

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn records(n: usize) -> Vec<Record> {
    (1..=n).map(|i| Record::new(i.to_string())).collect()
}

fn recording_list(items_per_page: usize) -> (ListView, Rc<RefCell<Vec<Vec<String>>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let handlers =
        Handlers::new().on_selection_change(move |ids| sink.borrow_mut().push(ids.to_vec()));
    let config = ListConfig::new("Écritures", vec![Column::new("id", "N°", "id")])
        .items_per_page(items_per_page);
    let mut list = ListView::new(config, handlers).unwrap();
    list.set_data(records(12));
    (list, calls)
}

// ============================================================================
// Selection set
// ============================================================================

#[test]
fn test_toggle() {
    let mut selection = Selection::new();
    assert!(selection.toggle("a"));
    assert!(selection.toggle("b"));
    assert!(!selection.toggle("a"));
    assert_eq!(selection.selected(), ids(&["b"]));
}

#[test]
fn test_select_all_twice_clears() {
    let page = ids(&["1", "2", "3"]);
    let mut selection = Selection::new();

    selection.select_all(&page);
    assert_eq!(selection.selected(), page);

    selection.select_all(&page);
    assert!(selection.is_empty());
}

#[test]
fn test_select_all_replaces_partial_selection() {
    let page = ids(&["1", "2", "3"]);
    let mut selection = Selection::new();
    selection.toggle("2");
    selection.toggle("9");

    selection.select_all(&page);
    assert_eq!(selection.selected(), page);
    assert!(!selection.is_selected("9"));
}

#[test]
fn test_check_state() {
    let page = ids(&["1", "2"]);
    let mut selection = Selection::new();
    assert_eq!(selection.check_state(&page), CheckState::Unchecked);

    selection.toggle("1");
    assert_eq!(selection.check_state(&page), CheckState::Partial);

    selection.toggle("2");
    assert_eq!(selection.check_state(&page), CheckState::Checked);

    assert_eq!(selection.check_state(&[]), CheckState::Unchecked);
}

#[test]
fn test_clear_reports_change() {
    let mut selection = Selection::new();
    assert!(!selection.clear());
    selection.toggle("1");
    assert!(selection.clear());
}

// ============================================================================
// List integration
// ============================================================================

#[test]
fn test_toggle_row_reports_full_selection() {
    let (mut list, calls) = recording_list(10);
    list.toggle_row("3");
    list.toggle_row("1");
    list.toggle_row("3");

    assert_eq!(
        *calls.borrow(),
        vec![ids(&["3"]), ids(&["1", "3"]), ids(&["1"])]
    );
}

#[test]
fn test_toggle_all_is_page_local() {
    let (mut list, calls) = recording_list(5);
    list.go_to_page(2);
    list.toggle_all();

    assert_eq!(calls.borrow()[0], ids(&["10", "6", "7", "8", "9"]));

    let view = list.render();
    let page = view.page().unwrap();
    assert_eq!(page.table.header.select_all, CheckState::Checked);
    assert_eq!(page.header.selected_count, 5);

    list.toggle_all();
    assert!(calls.borrow()[1].is_empty());
}

#[test]
fn test_selection_survives_page_change() {
    let (mut list, _) = recording_list(5);
    list.toggle_row("1");
    list.next_page();

    let view = list.render();
    assert_eq!(view.page().unwrap().table.header.select_all, CheckState::Unchecked);
    assert_eq!(view.page().unwrap().header.selected_count, 1);

    list.previous_page();
    let view = list.render();
    let TableBody::Rows(rows) = &view.page().unwrap().table.body else {
        panic!("expected rows");
    };
    assert!(rows[0].selected);
    assert!(!rows[1].selected);
    assert_eq!(view.page().unwrap().table.header.select_all, CheckState::Partial);
}

#[test]
fn test_selection_not_pruned_on_refresh() {
    let (mut list, _) = recording_list(10);
    list.toggle_row("12");
    list.set_data(records(3));
    assert!(list.state().selection.is_selected("12"));
}

#[test]
fn test_clear_selection_always_reports() {
    let (mut list, calls) = recording_list(10);
    list.toggle_row("2");
    list.clear_selection();
    list.clear_selection();

    assert_eq!(*calls.borrow(), vec![ids(&["2"]), vec![], vec![]]);
    assert!(list.state().selection.is_empty());
}
