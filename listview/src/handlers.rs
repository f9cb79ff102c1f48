//! Host callbacks.
//!
//! Every callback is optional. Which ones are present decides which controls
//! render: a missing `on_delete` removes the delete button, a missing
//! `on_create` removes the create button, and so on.

use log::trace;

use crate::column::RowAction;
use crate::event::{BulkAction, Emit, ExportFormat};
use crate::filter::FilterInstance;

type Callback = Box<dyn FnMut()>;
type IdCallback = Box<dyn FnMut(&str)>;
type IdsCallback = Box<dyn FnMut(&[String])>;
type CountCallback = Box<dyn FnMut(usize)>;

/// The callback table a host page hands to the list.
///
/// # Example
///
/// ```
/// use listview::handlers::Handlers;
///
/// let handlers = Handlers::new()
///     .on_search(|term| println!("search: {term}"))
///     .on_delete(|id| println!("delete {id}"));
///
/// assert!(handlers.capabilities().delete);
/// assert!(!handlers.capabilities().edit);
/// ```
#[derive(Default)]
pub struct Handlers {
    filter_change: Option<Box<dyn FnMut(&[FilterInstance])>>,
    search: Option<IdCallback>,
    selection_change: Option<IdsCallback>,
    items_per_page_change: Option<CountCallback>,
    page_change: Option<CountCallback>,
    refresh: Option<Callback>,
    export: Option<Box<dyn FnMut(ExportFormat)>>,
    create: Option<Callback>,
    confirm: Option<IdsCallback>,
    duplicate: Option<IdsCallback>,
    cancel: Option<IdsCallback>,
    reverse: Option<IdsCallback>,
    modify: Option<IdsCallback>,
    view: Option<IdCallback>,
    edit: Option<IdCallback>,
    delete: Option<IdCallback>,
    row_click: Option<IdCallback>,
}

/// Which callbacks a host supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub refresh: bool,
    pub export: bool,
    pub create: bool,
    pub confirm: bool,
    pub duplicate: bool,
    pub cancel: bool,
    pub reverse: bool,
    pub modify: bool,
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
    pub row_click: bool,
}

impl Capabilities {
    /// Row buttons to render in actions columns.
    pub fn row_actions(&self) -> Vec<RowAction> {
        RowAction::ALL
            .into_iter()
            .filter(|a| self.supports_row(*a))
            .collect()
    }

    /// Entries of the bulk actions menu.
    pub fn bulk_actions(&self) -> Vec<BulkAction> {
        BulkAction::ALL
            .into_iter()
            .filter(|a| self.supports_bulk(*a))
            .collect()
    }

    pub fn supports_row(&self, action: RowAction) -> bool {
        match action {
            RowAction::View => self.view,
            RowAction::Edit => self.edit,
            RowAction::Delete => self.delete,
        }
    }

    pub fn supports_bulk(&self, action: BulkAction) -> bool {
        match action {
            BulkAction::Confirm => self.confirm,
            BulkAction::Duplicate => self.duplicate,
            BulkAction::Cancel => self.cancel,
            BulkAction::Reverse => self.reverse,
            BulkAction::Modify => self.modify,
            BulkAction::Export(_) => self.export,
        }
    }
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_filter_change(mut self, f: impl FnMut(&[FilterInstance]) + 'static) -> Self {
        self.filter_change = Some(Box::new(f));
        self
    }

    pub fn on_search(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.search = Some(Box::new(f));
        self
    }

    pub fn on_selection_change(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.selection_change = Some(Box::new(f));
        self
    }

    pub fn on_items_per_page_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.items_per_page_change = Some(Box::new(f));
        self
    }

    /// Page changes; in external pagination mode the host fetches the page here.
    pub fn on_page_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.page_change = Some(Box::new(f));
        self
    }

    pub fn on_refresh(mut self, f: impl FnMut() + 'static) -> Self {
        self.refresh = Some(Box::new(f));
        self
    }

    pub fn on_export(mut self, f: impl FnMut(ExportFormat) + 'static) -> Self {
        self.export = Some(Box::new(f));
        self
    }

    pub fn on_create(mut self, f: impl FnMut() + 'static) -> Self {
        self.create = Some(Box::new(f));
        self
    }

    pub fn on_confirm(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.confirm = Some(Box::new(f));
        self
    }

    pub fn on_duplicate(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.duplicate = Some(Box::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.cancel = Some(Box::new(f));
        self
    }

    pub fn on_reverse(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.reverse = Some(Box::new(f));
        self
    }

    pub fn on_modify(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.modify = Some(Box::new(f));
        self
    }

    pub fn on_view(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.view = Some(Box::new(f));
        self
    }

    pub fn on_edit(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.edit = Some(Box::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.delete = Some(Box::new(f));
        self
    }

    pub fn on_row_click(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.row_click = Some(Box::new(f));
        self
    }

    /// Snapshot of which callbacks are present.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            refresh: self.refresh.is_some(),
            export: self.export.is_some(),
            create: self.create.is_some(),
            confirm: self.confirm.is_some(),
            duplicate: self.duplicate.is_some(),
            cancel: self.cancel.is_some(),
            reverse: self.reverse.is_some(),
            modify: self.modify.is_some(),
            view: self.view.is_some(),
            edit: self.edit.is_some(),
            delete: self.delete.is_some(),
            row_click: self.row_click.is_some(),
        }
    }

    /// Invoke the callback matching `emit`, if the host supplied one.
    pub fn dispatch(&mut self, emit: &Emit) {
        let handled = match emit {
            Emit::FilterChanged(filters) => call(&mut self.filter_change, |f| f(filters.as_slice())),
            Emit::SearchChanged(term) => call(&mut self.search, |f| f(term.as_str())),
            Emit::SelectionChanged(ids) => call(&mut self.selection_change, |f| f(ids.as_slice())),
            Emit::PageChanged(page) => call(&mut self.page_change, |f| f(*page)),
            Emit::ItemsPerPageChanged(n) => call(&mut self.items_per_page_change, |f| f(*n)),
            Emit::Refresh => call(&mut self.refresh, |f| f()),
            Emit::Create => call(&mut self.create, |f| f()),
            Emit::Export(format) => call(&mut self.export, |f| f(*format)),
            Emit::Bulk { action, selection } => {
                let slot = match action {
                    BulkAction::Confirm => &mut self.confirm,
                    BulkAction::Duplicate => &mut self.duplicate,
                    BulkAction::Cancel => &mut self.cancel,
                    BulkAction::Reverse => &mut self.reverse,
                    BulkAction::Modify => &mut self.modify,
                    BulkAction::Export(format) => {
                        return self.dispatch(&Emit::Export(*format));
                    }
                };
                call(slot, |f| f(selection.as_slice()))
            }
            Emit::Row { action, id } => {
                let slot = match action {
                    RowAction::View => &mut self.view,
                    RowAction::Edit => &mut self.edit,
                    RowAction::Delete => &mut self.delete,
                };
                call(slot, |f| f(id.as_str()))
            }
            Emit::RowClick(id) => call(&mut self.row_click, |f| f(id.as_str())),
        };
        if !handled {
            trace!("No handler for {:?}", emit);
        }
    }
}

fn call<F: ?Sized>(slot: &mut Option<Box<F>>, invoke: impl FnOnce(&mut F)) -> bool {
    match slot {
        Some(f) => {
            invoke(&mut **f);
            true
        }
        None => false,
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
