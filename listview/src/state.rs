//! List view state and its transition function.
//!
//! [`update`] is pure: it takes the current state, the host context and one
//! [`Event`], and returns the next state plus the callback invocations to
//! perform. [`ListView`](crate::list_view::ListView) is the shell that stores
//! the state and runs the callbacks.

use log::{debug, trace, warn};

use crate::column::ColumnRegistry;
use crate::config::{ListConfig, ListInputs};
use crate::error::ListViewError;
use crate::event::{BulkAction, Emit, Event};
use crate::filter::FilterSet;
use crate::handlers::Capabilities;
use crate::menu::{MenuKind, MenuState};
use crate::pagination::{PaginationMode, PaginationState};
use crate::record::Record;
use crate::search::SearchState;
use crate::selection::Selection;

/// Everything a transition may read but never changes.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a ListConfig,
    pub inputs: &'a ListInputs,
    pub capabilities: &'a Capabilities,
}

/// View state owned by the engine.
#[derive(Debug, Clone)]
pub struct ListState {
    pub columns: ColumnRegistry,
    pub pagination: PaginationState,
    pub selection: Selection,
    pub filters: FilterSet,
    pub search: SearchState,
    pub menus: MenuState,
}

impl ListState {
    /// Fresh state for a configuration.
    pub fn new(config: &ListConfig) -> Result<Self, ListViewError> {
        config.validate_filters()?;
        Ok(Self {
            columns: ColumnRegistry::new(
                config.columns.clone(),
                config.default_visible_columns.clone(),
            )?,
            pagination: PaginationState::new(config.items_per_page),
            selection: Selection::new(),
            filters: FilterSet::new(),
            search: SearchState::new(),
            menus: MenuState::new(),
        })
    }

    /// Records rendered on the current page.
    ///
    /// Internal mode slices `data`; external mode shows it as given.
    pub fn page_records<'a>(&self, inputs: &'a ListInputs) -> &'a [Record] {
        match inputs.mode() {
            PaginationMode::External => &inputs.data,
            PaginationMode::Internal => {
                let range = self.pagination.page_range();
                let end = range.end.min(inputs.data.len());
                &inputs.data[range.start.min(end)..end]
            }
        }
    }

    /// Ids of the records rendered on the current page.
    pub fn page_ids(&self, inputs: &ListInputs) -> Vec<String> {
        self.page_records(inputs).iter().map(Record::id).collect()
    }
}

/// Apply one event.
pub fn update(state: &ListState, ctx: &Context<'_>, event: Event) -> (ListState, Vec<Emit>) {
    let mut next = state.clone();
    let mut emits = Vec::new();

    if ctx.inputs.loading && event.is_interactive() {
        trace!("Ignoring {:?} while loading", event);
        return (next, emits);
    }

    match event {
        Event::InputsChanged => {
            // A refetch in flight carries no data; keep the page until it lands.
            // No controls render while loading, so no menu stays open either.
            if ctx.inputs.loading {
                next.menus.close_all();
            } else {
                next.pagination.set_total_items(ctx.inputs.total_items());
            }
        }

        // ---------------------------------------------------------------------
        // Columns
        // ---------------------------------------------------------------------
        Event::ToggleColumn(id) => {
            next.columns.toggle_column(&id);
        }
        Event::ResetColumns => next.columns.reset_columns(),
        Event::ShowAllColumns => next.columns.show_all(),

        // ---------------------------------------------------------------------
        // Pagination
        // ---------------------------------------------------------------------
        Event::GoToPage(page) => {
            if next.pagination.go_to(page) {
                emits.push(Emit::PageChanged(page));
            }
        }
        Event::NextPage => page_moved(&mut next, &mut emits, PaginationState::next),
        Event::PreviousPage => page_moved(&mut next, &mut emits, PaginationState::previous),
        Event::FirstPage => page_moved(&mut next, &mut emits, PaginationState::first),
        Event::LastPage => page_moved(&mut next, &mut emits, PaginationState::last),
        Event::SetItemsPerPage(n) => {
            let previous_page = next.pagination.current_page();
            if next.pagination.set_items_per_page(n) {
                emits.push(Emit::ItemsPerPageChanged(n));
                if previous_page != 1 {
                    emits.push(Emit::PageChanged(1));
                }
            }
        }

        // ---------------------------------------------------------------------
        // Selection
        // ---------------------------------------------------------------------
        Event::ToggleRow(id) => {
            next.selection.toggle(&id);
            emits.push(Emit::SelectionChanged(next.selection.selected()));
        }
        Event::ToggleAll => {
            let page_ids = next.page_ids(ctx.inputs);
            next.selection.select_all(&page_ids);
            emits.push(Emit::SelectionChanged(next.selection.selected()));
        }
        Event::ClearSelection => {
            next.selection.clear();
            emits.push(Emit::SelectionChanged(Vec::new()));
        }

        // ---------------------------------------------------------------------
        // Filters
        // ---------------------------------------------------------------------
        Event::AddFilter {
            definition_id,
            at_ms,
        } => match ctx.config.filter_definition(&definition_id) {
            Some(definition) => {
                next.filters.add(definition, at_ms);
                next.menus.close(MenuKind::Filter);
                emits.push(filters_changed(&next));
            }
            None => warn!("Unknown filter definition {:?}", definition_id),
        },
        Event::RemoveFilter(id) => {
            if next.filters.remove(&id) {
                emits.push(filters_changed(&next));
            }
        }
        Event::SetFilterValue { id, value } => {
            if next.filters.set_value(&id, value) {
                emits.push(filters_changed(&next));
            }
        }
        Event::ClearFilters => {
            if next.filters.clear() {
                emits.push(filters_changed(&next));
            }
        }

        // ---------------------------------------------------------------------
        // Search
        // ---------------------------------------------------------------------
        Event::Search { term, at_ms } => {
            if let Some(term) = next.search.set(term, at_ms, ctx.config.search_policy) {
                emits.push(Emit::SearchChanged(term));
            }
        }
        Event::ClearSearch { at_ms } => {
            emits.push(Emit::SearchChanged(next.search.clear(at_ms)));
        }
        Event::Tick { at_ms } => {
            if let Some(term) = next.search.flush(at_ms, ctx.config.search_policy) {
                emits.push(Emit::SearchChanged(term));
            }
        }

        // ---------------------------------------------------------------------
        // Menus
        // ---------------------------------------------------------------------
        Event::ToggleMenu { menu, anchor } => {
            let open = next.menus.toggle(menu, anchor, &ctx.config.menu_layout);
            debug!("Menu {:?} open: {}", menu, open);
        }
        Event::CloseMenus => next.menus.close_all(),
        Event::PointerDown { at, regions } => {
            let closed = next.menus.pointer_down(at, &regions);
            if !closed.is_empty() {
                debug!("Outside click closed {:?}", closed);
            }
        }

        // ---------------------------------------------------------------------
        // Actions
        // ---------------------------------------------------------------------
        Event::TriggerAction(action) => {
            if ctx.capabilities.supports_bulk(action) {
                next.menus.close(MenuKind::Actions);
                emits.push(match action {
                    BulkAction::Export(format) => Emit::Export(format),
                    action => Emit::Bulk {
                        action,
                        selection: next.selection.selected(),
                    },
                });
            } else {
                warn!("No handler for bulk action {:?}", action);
            }
        }
        Event::RowAction { action, id } => {
            if ctx.capabilities.supports_row(action) {
                emits.push(Emit::Row { action, id });
            }
        }
        Event::RowClick(id) => {
            if ctx.capabilities.row_click {
                emits.push(Emit::RowClick(id));
            }
        }
        Event::Create => {
            if ctx.capabilities.create {
                emits.push(Emit::Create);
            }
        }
        Event::Refresh => {
            if ctx.capabilities.refresh {
                emits.push(Emit::Refresh);
            }
        }
    }

    (next, emits)
}

fn page_moved(
    state: &mut ListState,
    emits: &mut Vec<Emit>,
    navigate: fn(&mut PaginationState) -> bool,
) {
    if navigate(&mut state.pagination) {
        emits.push(Emit::PageChanged(state.pagination.current_page()));
    }
}

fn filters_changed(state: &ListState) -> Emit {
    Emit::FilterChanged(state.filters.instances().to_vec())
}
