//! Headless entity list engine.
//!
//! A list page declares its columns, filters and page size in a
//! [`ListConfig`], registers the callbacks it handles in [`Handlers`], and
//! pushes records through [`ListInputs`]. [`ListView`] owns the view state
//! (visible columns, pagination, selection, active filters, search term,
//! open menus), turns user intents into callback invocations, and renders a
//! plain-data [`View`] the host draws with whatever toolkit it uses.

pub mod column;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod handlers;
pub mod list_view;
pub mod menu;
pub mod pagination;
pub mod record;
pub mod search;
pub mod selection;
pub mod state;
pub mod view;

pub use config::{ListConfig, ListInputs};
pub use error::ListViewError;
pub use handlers::Handlers;
pub use list_view::ListView;
pub use record::Record;
pub use view::View;

pub mod prelude {
    pub use crate::column::{Cell, Column, ColumnWidth, RowAction, Tone};
    pub use crate::config::{EmptyState, ListConfig, ListInputs};
    pub use crate::error::ListViewError;
    pub use crate::event::{BulkAction, Emit, Event, ExportFormat};
    pub use crate::filter::{FilterDefinition, FilterInstance};
    pub use crate::handlers::{Capabilities, Handlers};
    pub use crate::list_view::ListView;
    pub use crate::menu::{
        MeasureAnchor, MenuKind, MenuLayout, Point, PointerEvents, PointerListeners, Rect,
        Viewport,
    };
    pub use crate::pagination::ITEMS_PER_PAGE_OPTIONS;
    pub use crate::record::Record;
    pub use crate::search::SearchPolicy;
    pub use crate::selection::CheckState;
    pub use crate::view::{EmptyVariant, TableBody, View};
}
