use std::cell::{Cell as StdCell, RefCell};
use std::rc::Rc;

use listview::filter::FilterSet;
use listview::prelude::*;
use serde_json::json;

fn definitions() -> Vec<FilterDefinition> {
    vec![
        FilterDefinition::new("journal", "Journal", "select"),
        FilterDefinition::new("date", "Date", "date").initial_value(json!({ "from": null })),
    ]
}

/// A list with a controllable clock, recording every filter change.
fn recording_list() -> (ListView, Rc<StdCell<i64>>, Rc<RefCell<Vec<Vec<FilterInstance>>>>) {
    let now = Rc::new(StdCell::new(1_700_000_000_000));
    let calls = Rc::new(RefCell::new(Vec::new()));

    let sink = calls.clone();
    let handlers =
        Handlers::new().on_filter_change(move |filters| sink.borrow_mut().push(filters.to_vec()));

    let mut config = ListConfig::new("Écritures", vec![Column::new("code", "Code", "code")]);
    for definition in definitions() {
        config = config.filter(definition);
    }

    let clock = now.clone();
    let list = ListView::new(config, handlers)
        .unwrap()
        .with_clock(move || clock.get());
    (list, now, calls)
}

// ============================================================================
// Filter set
// ============================================================================

#[test]
fn test_add_uses_definition_and_timestamp() {
    let definition = FilterDefinition::new("date", "Date", "date").initial_value("2024-01-01");
    let mut set = FilterSet::new();

    let id = set.add(&definition, 42);
    assert_eq!(id, "date-42");

    let instance = set.get(&id).unwrap();
    assert_eq!(instance.label, "Date");
    assert_eq!(instance.kind, "date");
    assert_eq!(instance.value, json!("2024-01-01"));
}

#[test]
fn test_same_millisecond_ids_stay_unique() {
    let definition = FilterDefinition::new("journal", "Journal", "select");
    let mut set = FilterSet::new();

    let first = set.add(&definition, 100);
    let second = set.add(&definition, 100);
    let third = set.add(&definition, 100);

    assert_eq!(first, "journal-100");
    assert_eq!(second, "journal-101");
    assert_eq!(third, "journal-102");
    assert_eq!(set.len(), 3);
}

#[test]
fn test_remove_and_set_value() {
    let definition = FilterDefinition::new("journal", "Journal", "select");
    let mut set = FilterSet::new();
    let id = set.add(&definition, 1);

    assert!(set.set_value(&id, json!("VT")));
    assert!(!set.set_value(&id, json!("VT")));
    assert!(!set.set_value("missing", json!("VT")));

    assert!(set.remove(&id));
    assert!(!set.remove(&id));
    assert!(set.is_empty());
    assert!(!set.clear());
}

// ============================================================================
// List integration
// ============================================================================

#[test]
fn test_two_adds_emit_both_instances() {
    let (mut list, _now, calls) = recording_list();

    list.add_filter("journal");
    list.add_filter("journal");

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].len(), 2);
    assert_ne!(calls[1][0].id, calls[1][1].id);
    assert!(calls[1].iter().all(|f| f.id.starts_with("journal-")));
}

#[test]
fn test_add_closes_filter_menu() {
    let (mut list, _now, _calls) = recording_list();

    list.toggle_menu(MenuKind::Filter, None);
    let view = list.render();
    let picker = view.page().unwrap().menus.filter.as_ref().unwrap();
    assert_eq!(picker.len(), 2);
    assert_eq!(picker[1].definition_id, "date");

    list.add_filter("date");
    assert!(!list.state().menus.is_open(MenuKind::Filter));

    let view = list.render();
    let chips = &view.page().unwrap().filters;
    assert_eq!(chips.len(), 1);
    assert_eq!(chips[0].label, "Date");
    assert_eq!(chips[0].value, json!({ "from": null }));
}

#[test]
fn test_unknown_definition_is_ignored() {
    let (mut list, _now, calls) = recording_list();
    list.add_filter("nope");
    assert!(calls.borrow().is_empty());
    assert!(list.state().filters.is_empty());
}

#[test]
fn test_remove_set_value_and_clear() {
    let (mut list, now, calls) = recording_list();
    list.add_filter("journal");
    now.set(now.get() + 5);
    list.add_filter("date");

    let journal = list.state().filters.instances()[0].id.clone();
    list.set_filter_value(journal.clone(), json!("AC"));
    assert_eq!(calls.borrow().last().unwrap()[0].value, json!("AC"));

    list.remove_filter(journal.clone());
    assert_eq!(calls.borrow().last().unwrap().len(), 1);
    assert_eq!(calls.borrow().last().unwrap()[0].label, "Date");

    // Nothing changes, nothing is reported.
    let before = calls.borrow().len();
    list.remove_filter(journal);
    assert_eq!(calls.borrow().len(), before);

    list.clear_filters();
    assert!(calls.borrow().last().unwrap().is_empty());

    list.clear_filters();
    assert_eq!(calls.borrow().len(), before + 1);
}

#[test]
fn test_filters_reset_on_reconfigure() {
    let (mut list, _now, _calls) = recording_list();
    list.add_filter("journal");
    assert_eq!(list.state().filters.len(), 1);

    let config = list.config().clone();
    list.reconfigure(config).unwrap();
    assert!(list.state().filters.is_empty());
}

#[test]
fn test_duplicate_definitions_rejected() {
    let config = ListConfig::new("Écritures", vec![])
        .filter(FilterDefinition::new("journal", "Journal", "select"))
        .filter(FilterDefinition::new("journal", "Autre", "text"));
    assert!(matches!(
        ListView::new(config, Handlers::new()),
        Err(ListViewError::DuplicateFilter(id)) if id == "journal"
    ));
}
