//! Accounting journals list driven from a scripted session.
//!
//! The host owns the data: it filters on search and filter changes and
//! pushes the result back. The list owns everything else. The view is
//! printed as text after each step.
//!
//! Run with `cargo run --example journals`; debug logs go to `journals.log`.

use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;
use std::sync::Arc;

use listview::prelude::*;
use listview::view::Page;
use log::LevelFilter;
use serde_json::{Value, json};
use simplelog::{Config, WriteLogger};

// =============================================================================
// Host data
// =============================================================================

const JOURNALS: &str = r#"[
    { "id": 1,  "code": "AC", "label": "Achats",            "type": { "name": "Achat" },    "isActive": true },
    { "id": 2,  "code": "VT", "label": "Ventes",            "type": { "name": "Vente" },    "isActive": true },
    { "id": 3,  "code": "BQ", "label": "Banque BNP",        "type": { "name": "Trésorerie" }, "isActive": true },
    { "id": 4,  "code": "CA", "label": "Caisse",            "type": { "name": "Trésorerie" }, "isActive": false },
    { "id": 5,  "code": "OD", "label": "Opérations diverses", "isActive": true },
    { "id": 6,  "code": "AN", "label": "A nouveaux",        "type": { "name": "Situation" }, "isActive": true },
    { "id": 7,  "code": "BQ2", "label": "Banque SG",        "type": { "name": "Trésorerie" }, "isActive": true },
    { "id": 8,  "code": "SAL", "label": "Salaires",         "type": { "name": "Paie" },     "isActive": false },
    { "id": 9,  "code": "IMMO", "label": "Immobilisations", "isActive": true },
    { "id": 10, "code": "EXT", "label": "Extournes",        "type": { "name": "Situation" }, "isActive": true },
    { "id": 11, "code": "AC2", "label": "Achats import",    "type": { "name": "Achat" },    "isActive": true },
    { "id": 12, "code": "VT2", "label": "Ventes export",    "type": { "name": "Vente" },    "isActive": true }
]"#;

/// Search and filter state mirrored from the list, plus the requests it made.
#[derive(Default)]
struct Host {
    search: String,
    filters: Vec<FilterInstance>,
    requests: Vec<String>,
}

impl Host {
    fn matches(&self, record: &Record) -> bool {
        let term = self.search.to_lowercase();
        let text_match = term.is_empty()
            || ["code", "label"].iter().any(|f| {
                record
                    .get(f)
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.to_lowercase().contains(&term))
            });
        let filter_match = self.filters.iter().all(|filter| match &filter.value {
            Value::String(wanted) => record.get_path("type.name").and_then(Value::as_str) == Some(wanted.as_str()),
            _ => true,
        });
        text_match && filter_match
    }
}

fn handlers(host: &Rc<RefCell<Host>>) -> Handlers {
    let h = |host: &Rc<RefCell<Host>>| host.clone();
    let (search, filters, refresh, create) = (h(host), h(host), h(host), h(host));
    let (confirm, export, view, delete) = (h(host), h(host), h(host), h(host));

    Handlers::new()
        .on_search(move |term| search.borrow_mut().search = term.to_string())
        .on_filter_change(move |f| filters.borrow_mut().filters = f.to_vec())
        .on_refresh(move || refresh.borrow_mut().requests.push("refresh".into()))
        .on_create(move || create.borrow_mut().requests.push("create".into()))
        .on_confirm(move |ids| {
            confirm
                .borrow_mut()
                .requests
                .push(format!("confirm {}", ids.join(",")))
        })
        .on_export(move |format| {
            export
                .borrow_mut()
                .requests
                .push(format!("export {:?}", format))
        })
        .on_view(move |id| view.borrow_mut().requests.push(format!("view {id}")))
        .on_delete(move |id| delete.borrow_mut().requests.push(format!("delete {id}")))
}

fn config() -> ListConfig {
    ListConfig::new(
        "Journaux",
        vec![
            Column::new("code", "Code", "code").fixed(6),
            Column::new("label", "Libellé", "label").flex(2),
            Column::new("type", "Type", "type.name"),
            Column::new("status", "Statut", "isActive"),
            Column::actions("actions", "").fixed(24),
        ],
    )
    .filter(FilterDefinition::new("type", "Type de journal", "select"))
    .items_per_page(5)
    .empty_state(EmptyState {
        title: "Aucun journal".into(),
        description: "Créez votre premier journal comptable.".into(),
        action: Some("Nouveau journal".into()),
    })
}

// =============================================================================
// Text rendering
// =============================================================================

fn print_view(step: &str, view: &View) {
    println!("\n=== {step} ===");
    match view {
        View::Loading { message } => println!("{message}"),
        View::Error { message, retry } => {
            println!("! {message}");
            if let Some(retry) = retry {
                println!("[{retry}]");
            }
        }
        View::Ready(page) => print_page(page),
    }
}

fn print_page(page: &Page) {
    let header = &page.header;
    println!(
        "{}  [{} sélectionné(s)]  search={:?}  par page={}",
        header.title, header.selected_count, header.search.term, header.items_per_page.selected
    );
    for chip in &page.filters {
        println!("  filtre: {} = {}", chip.label, chip.value);
    }

    let labels: Vec<&str> = page.table.header.columns.iter().map(|c| c.label.as_str()).collect();
    println!("  [{:?}] {}", page.table.header.select_all, labels.join(" | "));
    match &page.table.body {
        TableBody::Rows(rows) => {
            for row in rows {
                let cells: Vec<String> = row.cells.iter().map(Cell::display).collect();
                let mark = if row.selected { "x" } else { " " };
                println!("  [{mark}] {}", cells.join(" | "));
            }
        }
        TableBody::Empty(panel) => {
            println!("  {} - {}", panel.title, panel.description);
            if let Some(action) = &panel.action {
                println!("  [{action}]");
            }
        }
    }

    let pages: Vec<String> = page
        .footer
        .pages
        .iter()
        .map(|b| if b.current { format!("[{}]", b.page) } else { b.page.to_string() })
        .collect();
    println!("  {}   {}", page.footer.summary, pages.join(" "));

    if let Some(items) = &page.menus.actions {
        let labels: Vec<&str> = items.iter().map(|i| i.label).collect();
        println!("  menu actions: {}", labels.join(", "));
    }
    if let Some(menu) = &page.menus.columns {
        let items: Vec<String> = menu
            .items
            .iter()
            .map(|i| format!("{}{}", if i.visible { "+" } else { "-" }, i.label))
            .collect();
        println!("  menu colonnes: {} @ {:?}", items.join(" "), menu.placement);
    }
}

// =============================================================================
// Main
// =============================================================================

struct Screen;

impl MeasureAnchor for Screen {
    fn trigger_rect(&self, menu: MenuKind) -> Option<Rect> {
        match menu {
            MenuKind::Actions => Some(Rect::new(820.0, 16.0, 110.0, 32.0)),
            MenuKind::Filter => Some(Rect::new(940.0, 16.0, 90.0, 32.0)),
            MenuKind::Columns => Some(Rect::new(1040.0, 16.0, 110.0, 32.0)),
        }
    }

    fn panel_rect(&self, menu: MenuKind) -> Option<Rect> {
        match menu {
            MenuKind::Columns => Some(Rect::new(930.0, 52.0, 220.0, 240.0)),
            _ => None,
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(1200.0, 720.0, 0.0)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(log_file) = File::create("journals.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let all = listview::record::records_from_json(JOURNALS)?;
    let host = Rc::new(RefCell::new(Host::default()));
    let listeners = Arc::new(PointerListeners::new());
    let mut list = ListView::new(config(), handlers(&host))?.with_pointer_events(listeners.clone());

    // Host-side filtering after every step.
    let push = |list: &mut ListView| {
        let host = host.borrow();
        let data: Vec<Record> = all.iter().filter(|r| host.matches(r)).cloned().collect();
        drop(host);
        list.set_inputs(ListInputs::new(data).unfiltered_count(all.len()));
    };

    list.set_loading(true);
    print_view("chargement", &list.render());

    push(&mut list);
    print_view("page 1", &list.render());

    list.next_page();
    list.toggle_row("6");
    list.toggle_row("7");
    print_view("page 2, deux lignes cochées", &list.render());

    list.search("ban");
    push(&mut list);
    print_view("recherche \"ban\"", &list.render());

    list.clear_search();
    list.add_filter("type");
    let filter_id = list.state().filters.instances()[0].id.clone();
    list.set_filter_value(filter_id, json!("Trésorerie"));
    push(&mut list);
    print_view("filtre trésorerie", &list.render());

    list.search("zzz");
    push(&mut list);
    print_view("aucun résultat", &list.render());

    list.clear_search();
    list.clear_filters();
    push(&mut list);
    list.toggle_menu(MenuKind::Columns, Some(&Screen));
    list.toggle_column("type");
    print_view("menu colonnes", &list.render());
    println!("  écoute pointeur: {}", listeners.is_listening());

    list.pointer_down(Point::new(10.0, 400.0), &Screen);
    list.toggle_menu(MenuKind::Actions, None);
    print_view("menu actions", &list.render());
    list.trigger_action(BulkAction::Confirm);
    list.trigger_action(BulkAction::Export(ExportFormat::Csv));
    list.row_action(RowAction::Delete, "4");
    println!("  écoute pointeur: {}", listeners.is_listening());

    println!("\n=== demandes ===");
    for request in host.borrow_mut().requests.drain(..) {
        println!("  {request}");
    }

    Ok(())
}
