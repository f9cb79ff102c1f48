//! The list component.
//!
//! [`ListView`] stores the configuration, the latest inputs and the view
//! state. Every user intent goes through [`ListView::dispatch`], which runs
//! the pure [`update`] transition and then invokes the host callbacks it
//! asked for.

use std::sync::Arc;

use log::{debug, trace};
use serde_json::Value;

use crate::column::RowAction;
use crate::config::{ListConfig, ListInputs};
use crate::error::ListViewError;
use crate::event::{BulkAction, Event};
use crate::handlers::{Capabilities, Handlers};
use crate::menu::{
    AnchorSnapshot, ListenerId, MeasureAnchor, MenuKind, MenuRegions, Point, PointerEvents,
    PointerSubscription,
};
use crate::record::Record;
use crate::state::{Context, ListState, update};
use crate::view::{View, render};

type Clock = Box<dyn Fn() -> i64>;

/// An entity list bound to one configuration and one set of callbacks.
///
/// # Example
///
/// ```
/// use listview::prelude::*;
///
/// let config = ListConfig::new("Banques", vec![Column::new("code", "Code", "code")]);
/// let mut list = ListView::new(config, Handlers::new()).unwrap();
/// list.set_data(vec![Record::new("1").set("code", "BNP")]);
///
/// let view = list.render();
/// assert_eq!(view.page().unwrap().footer.summary, "1-1 sur 1");
/// ```
pub struct ListView {
    config: ListConfig,
    inputs: ListInputs,
    state: ListState,
    handlers: Handlers,
    capabilities: Capabilities,
    clock: Clock,
    pointer: Option<Arc<dyn PointerEvents>>,
    subscription: Option<PointerSubscription>,
}

impl ListView {
    pub fn new(config: ListConfig, handlers: Handlers) -> Result<Self, ListViewError> {
        let state = ListState::new(&config)?;
        let capabilities = handlers.capabilities();
        Ok(Self {
            config,
            inputs: ListInputs::default(),
            state,
            handlers,
            capabilities,
            clock: Box::new(|| chrono::Utc::now().timestamp_millis()),
            pointer: None,
            subscription: None,
        })
    }

    /// Register the global pointer-down listener through `pointer` while a
    /// menu is open. Without it, menus only close through their triggers.
    pub fn with_pointer_events(mut self, pointer: Arc<dyn PointerEvents>) -> Self {
        self.pointer = Some(pointer);
        self
    }

    /// Replace the millisecond clock used for filter ids and search throttling.
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn inputs(&self) -> &ListInputs {
        &self.inputs
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Whether the global pointer listener is currently registered.
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn listener_id(&self) -> Option<ListenerId> {
        self.subscription.as_ref().map(PointerSubscription::id)
    }

    // -------------------------------------------------------------------------
    // Inputs and configuration
    // -------------------------------------------------------------------------

    /// Push a new set of inputs.
    pub fn set_inputs(&mut self, inputs: ListInputs) {
        self.inputs = inputs;
        self.dispatch(Event::InputsChanged);
    }

    /// Push records, keeping the other inputs.
    pub fn set_data(&mut self, data: Vec<Record>) {
        let inputs = ListInputs {
            data,
            loading: false,
            error: None,
            ..std::mem::take(&mut self.inputs)
        };
        self.set_inputs(inputs);
    }

    pub fn set_loading(&mut self, loading: bool) {
        let mut inputs = std::mem::take(&mut self.inputs);
        inputs.loading = loading;
        self.set_inputs(inputs);
    }

    pub fn set_error(&mut self, error: Option<String>) {
        let mut inputs = std::mem::take(&mut self.inputs);
        inputs.error = error;
        self.set_inputs(inputs);
    }

    /// Swap the configuration. Filters, selection, pagination, search and
    /// menus reset; the current inputs are kept.
    pub fn reconfigure(&mut self, config: ListConfig) -> Result<(), ListViewError> {
        let state = ListState::new(&config)?;
        debug!("Reconfiguring list {:?}", config.title);
        self.config = config;
        self.state = state;
        self.subscription = None;
        self.dispatch(Event::InputsChanged);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Dispatch and render
    // -------------------------------------------------------------------------

    /// Apply one event and run the callbacks it produces.
    pub fn dispatch(&mut self, event: Event) {
        trace!("Dispatching {:?}", event);
        let ctx = Context {
            config: &self.config,
            inputs: &self.inputs,
            capabilities: &self.capabilities,
        };
        let (next, emits) = update(&self.state, &ctx, event);
        self.state = next;
        self.sync_pointer_subscription();
        for emit in &emits {
            self.handlers.dispatch(emit);
        }
    }

    /// Build the view for the current state.
    pub fn render(&self) -> View {
        render(
            &self.state,
            &Context {
                config: &self.config,
                inputs: &self.inputs,
                capabilities: &self.capabilities,
            },
        )
    }

    fn sync_pointer_subscription(&mut self) {
        if !self.state.menus.any_open() {
            self.subscription = None;
            return;
        }
        if self.subscription.is_none()
            && let Some(pointer) = &self.pointer
        {
            self.subscription = Some(PointerSubscription::acquire(Arc::clone(pointer)));
        }
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    pub fn toggle_column(&mut self, id: impl Into<String>) {
        self.dispatch(Event::ToggleColumn(id.into()));
    }

    pub fn reset_columns(&mut self) {
        self.dispatch(Event::ResetColumns);
    }

    pub fn show_all_columns(&mut self) {
        self.dispatch(Event::ShowAllColumns);
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn go_to_page(&mut self, page: usize) {
        self.dispatch(Event::GoToPage(page));
    }

    pub fn next_page(&mut self) {
        self.dispatch(Event::NextPage);
    }

    pub fn previous_page(&mut self) {
        self.dispatch(Event::PreviousPage);
    }

    pub fn first_page(&mut self) {
        self.dispatch(Event::FirstPage);
    }

    pub fn last_page(&mut self) {
        self.dispatch(Event::LastPage);
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.dispatch(Event::SetItemsPerPage(items_per_page));
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn toggle_row(&mut self, id: impl Into<String>) {
        self.dispatch(Event::ToggleRow(id.into()));
    }

    /// Header checkbox: select the visible page, or clear if it already is.
    pub fn toggle_all(&mut self) {
        self.dispatch(Event::ToggleAll);
    }

    pub fn clear_selection(&mut self) {
        self.dispatch(Event::ClearSelection);
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    pub fn add_filter(&mut self, definition_id: impl Into<String>) {
        let at_ms = self.now();
        self.dispatch(Event::AddFilter {
            definition_id: definition_id.into(),
            at_ms,
        });
    }

    pub fn remove_filter(&mut self, id: impl Into<String>) {
        self.dispatch(Event::RemoveFilter(id.into()));
    }

    pub fn set_filter_value(&mut self, id: impl Into<String>, value: Value) {
        self.dispatch(Event::SetFilterValue {
            id: id.into(),
            value,
        });
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(Event::ClearFilters);
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    pub fn search(&mut self, term: impl Into<String>) {
        let at_ms = self.now();
        self.dispatch(Event::Search {
            term: term.into(),
            at_ms,
        });
    }

    pub fn clear_search(&mut self) {
        let at_ms = self.now();
        self.dispatch(Event::ClearSearch { at_ms });
    }

    /// Flush a throttled search term whose interval has elapsed.
    pub fn tick(&mut self) {
        let at_ms = self.now();
        self.dispatch(Event::Tick { at_ms });
    }

    // -------------------------------------------------------------------------
    // Menus
    // -------------------------------------------------------------------------

    /// Flip a menu. The column menu is positioned from `measure` when given.
    pub fn toggle_menu(&mut self, menu: MenuKind, measure: Option<&dyn MeasureAnchor>) {
        let anchor = measure.and_then(|m| AnchorSnapshot::measure(m, menu));
        self.dispatch(Event::ToggleMenu { menu, anchor });
    }

    pub fn close_menus(&mut self) {
        self.dispatch(Event::CloseMenus);
    }

    /// Forward a global pointer-down.
    pub fn pointer_down(&mut self, at: Point, measure: &dyn MeasureAnchor) {
        let regions = MenuRegions::measure(measure);
        self.dispatch(Event::PointerDown { at, regions });
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    pub fn trigger_action(&mut self, action: BulkAction) {
        self.dispatch(Event::TriggerAction(action));
    }

    pub fn row_action(&mut self, action: RowAction, id: impl Into<String>) {
        self.dispatch(Event::RowAction {
            action,
            id: id.into(),
        });
    }

    pub fn row_click(&mut self, id: impl Into<String>) {
        self.dispatch(Event::RowClick(id.into()));
    }

    pub fn create(&mut self) {
        self.dispatch(Event::Create);
    }

    pub fn refresh(&mut self) {
        self.dispatch(Event::Refresh);
    }
}

impl Drop for ListView {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            debug!("List dropped with listener {:?}", subscription.id());
        }
    }
}

impl std::fmt::Debug for ListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("title", &self.config.title)
            .field("state", &self.state)
            .field("listening", &self.is_listening())
            .finish()
    }
}
