//! View model composition.
//!
//! [`render`] turns the state and host context into plain data describing
//! what to draw. Hosts map it onto their toolkit; nothing here knows about
//! styling.

use serde_json::Value;

use crate::column::{Cell, ColumnWidth, resolve_cell};
use crate::config::EmptyState;
use crate::event::BulkAction;
use crate::menu::{MenuKind, MenuPlacement};
use crate::pagination::ITEMS_PER_PAGE_OPTIONS;
use crate::selection::CheckState;
use crate::state::{Context, ListState};

pub const LOADING_MESSAGE: &str = "Chargement...";
pub const RETRY_LABEL: &str = "Réessayer";
pub const CREATE_LABEL: &str = "Créer";
pub const SEARCH_PLACEHOLDER: &str = "Rechercher...";

/// Top-level view.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Placeholder only; no interactive controls.
    Loading { message: String },
    /// Error banner. `retry` is the retry button label, present when the
    /// host handles refresh.
    Error {
        message: String,
        retry: Option<String>,
    },
    Ready(Box<Page>),
}

impl View {
    /// The page, if the list is ready.
    pub fn page(&self) -> Option<&Page> {
        match self {
            View::Ready(page) => Some(page),
            _ => None,
        }
    }
}

/// A fully interactive list page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub header: HeaderBar,
    pub filters: Vec<FilterChip>,
    pub table: Table,
    pub footer: Footer,
    pub menus: OpenMenus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBar {
    pub title: String,
    /// Create button label, present when the host handles create.
    pub create: Option<String>,
    /// The title doubles as a refresh button when the host handles refresh.
    pub refresh: bool,
    /// Bulk actions trigger, present when at least one action is handled.
    pub actions_trigger: bool,
    pub selected_count: usize,
    pub search: SearchBox,
    /// Filter trigger, present when the page declares filters.
    pub filter_trigger: bool,
    pub columns_trigger: bool,
    pub items_per_page: ItemsPerPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox {
    pub term: String,
    pub placeholder: String,
    /// Show the clear button.
    pub clearable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsPerPage {
    pub options: Vec<usize>,
    pub selected: usize,
}

/// A removable active filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChip {
    pub id: String,
    pub label: String,
    pub kind: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: TableHeader,
    pub body: TableBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableHeader {
    pub select_all: CheckState,
    pub columns: Vec<HeaderCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub id: String,
    pub label: String,
    pub width: ColumnWidth,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Rows(Vec<Row>),
    Empty(EmptyPanel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub selected: bool,
    /// One cell per visible column, in header order.
    pub cells: Vec<Cell>,
}

/// Which empty-state panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyVariant {
    /// The dataset itself is empty.
    CreateFirst,
    /// Records exist but none match the current search and filters.
    NoResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPanel {
    pub variant: EmptyVariant,
    pub title: String,
    pub description: String,
    /// Call-to-action label, wired to create.
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub summary: String,
    pub pages: Vec<PageButton>,
    pub current_page: usize,
    pub total_pages: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: usize,
    pub current: bool,
}

/// Contents of the menus that are currently open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenMenus {
    pub actions: Option<Vec<ActionItem>>,
    pub filter: Option<Vec<FilterPickerItem>>,
    pub columns: Option<ColumnMenu>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionItem {
    pub action: BulkAction,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPickerItem {
    pub definition_id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMenu {
    /// Anchor and height limit computed when the menu opened; `None` if
    /// the host could not measure the trigger.
    pub placement: Option<MenuPlacement>,
    pub items: Vec<ColumnMenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMenuItem {
    pub id: String,
    pub label: String,
    pub visible: bool,
}

/// Build the view for the current state.
pub fn render(state: &ListState, ctx: &Context<'_>) -> View {
    let inputs = ctx.inputs;
    if inputs.loading {
        return View::Loading {
            message: LOADING_MESSAGE.to_string(),
        };
    }
    if let Some(message) = &inputs.error {
        return View::Error {
            message: message.clone(),
            retry: ctx.capabilities.refresh.then(|| RETRY_LABEL.to_string()),
        };
    }

    View::Ready(Box::new(Page {
        header: render_header(state, ctx),
        filters: state
            .filters
            .instances()
            .iter()
            .map(|f| FilterChip {
                id: f.id.clone(),
                label: f.label.clone(),
                kind: f.kind.clone(),
                value: f.value.clone(),
            })
            .collect(),
        table: render_table(state, ctx),
        footer: render_footer(state),
        menus: render_menus(state, ctx),
    }))
}

fn render_header(state: &ListState, ctx: &Context<'_>) -> HeaderBar {
    let caps = ctx.capabilities;
    HeaderBar {
        title: ctx.config.title.clone(),
        create: caps.create.then(|| CREATE_LABEL.to_string()),
        refresh: caps.refresh,
        actions_trigger: !caps.bulk_actions().is_empty(),
        selected_count: state.selection.len(),
        search: SearchBox {
            term: state.search.term().to_string(),
            placeholder: SEARCH_PLACEHOLDER.to_string(),
            clearable: !state.search.term().is_empty(),
        },
        filter_trigger: !ctx.config.filter_definitions.is_empty(),
        columns_trigger: !state.columns.columns().is_empty(),
        items_per_page: ItemsPerPage {
            options: ITEMS_PER_PAGE_OPTIONS.to_vec(),
            selected: state.pagination.items_per_page(),
        },
    }
}

fn render_table(state: &ListState, ctx: &Context<'_>) -> Table {
    let columns = state.columns.visible_columns();
    let records = state.page_records(ctx.inputs);
    let page_ids: Vec<String> = records.iter().map(|r| r.id()).collect();

    let header = TableHeader {
        select_all: state.selection.check_state(&page_ids),
        columns: columns
            .iter()
            .map(|c| HeaderCell {
                id: c.id.clone(),
                label: c.label.clone(),
                width: c.width.clone(),
            })
            .collect(),
    };

    if records.is_empty() {
        return Table {
            header,
            body: TableBody::Empty(empty_panel(
                ctx.inputs.unfiltered_len(),
                ctx.config.empty_state.as_ref(),
                ctx.capabilities.create,
            )),
        };
    }

    let row_actions = ctx.capabilities.row_actions();
    let rows = records
        .iter()
        .zip(page_ids)
        .map(|(record, id)| Row {
            selected: state.selection.is_selected(&id),
            id,
            cells: columns
                .iter()
                .map(|c| resolve_cell(record, c, &row_actions))
                .collect(),
        })
        .collect();

    Table {
        header,
        body: TableBody::Rows(rows),
    }
}

/// Choose the empty-state panel from the size of the unfiltered dataset.
pub fn empty_panel(
    unfiltered_len: usize,
    custom: Option<&EmptyState>,
    can_create: bool,
) -> EmptyPanel {
    if unfiltered_len > 0 {
        return EmptyPanel {
            variant: EmptyVariant::NoResults,
            title: "Aucun résultat".to_string(),
            description: "Essayez d'ajuster vos critères de recherche ou vos filtres.".to_string(),
            action: None,
        };
    }

    match custom {
        Some(custom) => EmptyPanel {
            variant: EmptyVariant::CreateFirst,
            title: custom.title.clone(),
            description: custom.description.clone(),
            action: custom.action.clone().filter(|_| can_create),
        },
        None => EmptyPanel {
            variant: EmptyVariant::CreateFirst,
            title: "Aucun enregistrement".to_string(),
            description: "Commencez par créer votre premier enregistrement.".to_string(),
            action: can_create.then(|| CREATE_LABEL.to_string()),
        },
    }
}

fn render_footer(state: &ListState) -> Footer {
    let pagination = &state.pagination;
    Footer {
        summary: pagination.summary(),
        pages: pagination
            .window()
            .into_iter()
            .map(|page| PageButton {
                page,
                current: page == pagination.current_page(),
            })
            .collect(),
        current_page: pagination.current_page(),
        total_pages: pagination.total_pages(),
        can_previous: pagination.can_previous(),
        can_next: pagination.can_next(),
    }
}

fn render_menus(state: &ListState, ctx: &Context<'_>) -> OpenMenus {
    let menus = &state.menus;

    let actions = menus.is_open(MenuKind::Actions).then(|| {
        ctx.capabilities
            .bulk_actions()
            .into_iter()
            .map(|action| ActionItem {
                action,
                label: action.label(),
            })
            .collect()
    });

    let filter = menus.is_open(MenuKind::Filter).then(|| {
        ctx.config
            .filter_definitions
            .iter()
            .map(|d| FilterPickerItem {
                definition_id: d.id.clone(),
                label: d.label.clone(),
            })
            .collect()
    });

    let columns = menus.is_open(MenuKind::Columns).then(|| ColumnMenu {
        placement: menus.column_placement(),
        items: state
            .columns
            .columns()
            .iter()
            .map(|c| ColumnMenuItem {
                id: c.id.clone(),
                label: c.label.clone(),
                visible: state.columns.is_visible(&c.id),
            })
            .collect(),
    });

    OpenMenus {
        actions,
        filter,
        columns,
    }
}
