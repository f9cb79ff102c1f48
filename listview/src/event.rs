//! Input events and the callback invocations they emit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::RowAction;
use crate::filter::FilterInstance;
use crate::menu::{AnchorSnapshot, MenuKind, MenuRegions, Point};

/// Export formats offered in the actions menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

/// Entries of the bulk actions menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkAction {
    Confirm,
    Duplicate,
    Cancel,
    Reverse,
    Modify,
    Export(ExportFormat),
}

impl BulkAction {
    /// All entries, in menu order.
    pub const ALL: [BulkAction; 7] = [
        BulkAction::Confirm,
        BulkAction::Duplicate,
        BulkAction::Cancel,
        BulkAction::Reverse,
        BulkAction::Modify,
        BulkAction::Export(ExportFormat::Csv),
        BulkAction::Export(ExportFormat::Pdf),
    ];

    /// Menu entry label.
    pub fn label(&self) -> &'static str {
        match self {
            BulkAction::Confirm => "Valider",
            BulkAction::Duplicate => "Dupliquer",
            BulkAction::Cancel => "Annuler",
            BulkAction::Reverse => "Extourner",
            BulkAction::Modify => "Modifier",
            BulkAction::Export(ExportFormat::Csv) => "Exporter en CSV",
            BulkAction::Export(ExportFormat::Pdf) => "Exporter en PDF",
        }
    }
}

/// Something the user (or the host) did to the list.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The host pushed new inputs (data, loading, error, pagination).
    InputsChanged,

    // Columns
    ToggleColumn(String),
    ResetColumns,
    ShowAllColumns,

    // Pagination
    GoToPage(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    SetItemsPerPage(usize),

    // Selection
    ToggleRow(String),
    ToggleAll,
    ClearSelection,

    // Filters
    AddFilter { definition_id: String, at_ms: i64 },
    RemoveFilter(String),
    SetFilterValue { id: String, value: Value },
    ClearFilters,

    // Search
    Search { term: String, at_ms: i64 },
    ClearSearch { at_ms: i64 },
    /// Clock tick that flushes a throttled search term.
    Tick { at_ms: i64 },

    // Menus
    ToggleMenu { menu: MenuKind, anchor: Option<AnchorSnapshot> },
    CloseMenus,
    PointerDown { at: Point, regions: MenuRegions },

    // Actions
    TriggerAction(BulkAction),
    RowAction { action: RowAction, id: String },
    RowClick(String),
    Create,
    Refresh,
}

impl Event {
    /// Events caused by interacting with rendered controls.
    ///
    /// These are dropped while the list is loading, since no controls are
    /// shown then. Closing menus is always honoured.
    pub fn is_interactive(&self) -> bool {
        !matches!(
            self,
            Event::InputsChanged | Event::Tick { .. } | Event::CloseMenus
        )
    }
}

/// A host callback invocation produced by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Emit {
    FilterChanged(Vec<FilterInstance>),
    SearchChanged(String),
    SelectionChanged(Vec<String>),
    PageChanged(usize),
    ItemsPerPageChanged(usize),
    Refresh,
    Create,
    Export(ExportFormat),
    /// A bulk action applied to the selected ids.
    Bulk { action: BulkAction, selection: Vec<String> },
    Row { action: RowAction, id: String },
    RowClick(String),
}
