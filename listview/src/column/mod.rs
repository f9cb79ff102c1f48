//! Column definitions and the visible-column registry.
//!
//! A [`Column`] is the static description of one table column. The
//! [`ColumnRegistry`] tracks which of them are currently shown; visible
//! columns are always reported in declaration order, whatever order they were
//! toggled in.

mod cell;

pub use cell::{
    Cell, PLACEHOLDER, RowAction, STATUS_FIELDS, StatusField, Tone, resolve_cell,
};

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::ListViewError;
use crate::record::Record;

/// Custom cell renderer supplied by the host page.
pub type CellRenderer = Arc<dyn Fn(&Record) -> Cell + Send + Sync>;

/// How wide a column renders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Fixed width in pixels.
    Fixed(u16),
    /// Flexible width with weight.
    Flex(u16),
    /// Sized by the host to its content.
    #[default]
    Auto,
}

/// What a column displays when it has no custom renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Shows the value at `field`.
    #[default]
    Default,
    /// Shows the row action buttons (view, edit, delete).
    Actions,
}

/// A table column definition.
///
/// Content is decided by the first of `render`, `kind == Actions` and
/// `field` that applies. Renderers cannot be deserialized; columns loaded
/// from JSON get them attached afterwards with [`Column::render`].
#[derive(Clone, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text.
    pub label: String,
    /// Dot-separated path to the displayed value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Custom renderer, takes precedence over everything else.
    #[serde(skip)]
    pub render: Option<CellRenderer>,
    #[serde(rename = "type", default)]
    pub kind: ColumnKind,
    #[serde(default)]
    pub width: ColumnWidth,
}

impl Column {
    /// Create a column showing the value at `field`.
    pub fn new(id: impl Into<String>, label: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field: Some(field.into()),
            render: None,
            kind: ColumnKind::Default,
            width: ColumnWidth::default(),
        }
    }

    /// Create the row-actions column.
    pub fn actions(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field: None,
            render: None,
            kind: ColumnKind::Actions,
            width: ColumnWidth::default(),
        }
    }

    /// Create a column rendered entirely by `render`.
    pub fn custom(
        id: impl Into<String>,
        label: impl Into<String>,
        render: impl Fn(&Record) -> Cell + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field: None,
            render: Some(Arc::new(render)),
            kind: ColumnKind::Default,
            width: ColumnWidth::default(),
        }
    }

    /// Attach a custom renderer.
    pub fn render(mut self, render: impl Fn(&Record) -> Cell + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Set a fixed width for this column.
    pub fn fixed(mut self, width: u16) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set a flex width for this column.
    pub fn flex(mut self, weight: u16) -> Self {
        self.width = ColumnWidth::Flex(weight);
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("field", &self.field)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .field("kind", &self.kind)
            .field("width", &self.width)
            .finish()
    }
}

/// Tracks the visible subset of a fixed column list.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: Arc<[Column]>,
    defaults: Option<Vec<String>>,
    visible: HashSet<String>,
}

impl ColumnRegistry {
    /// Create a registry over `columns`.
    ///
    /// `defaults` is the host's initial visible set; `None` shows every
    /// column. Column ids must be unique and every default must be declared.
    pub fn new(columns: Vec<Column>, defaults: Option<Vec<String>>) -> Result<Self, ListViewError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(ListViewError::DuplicateColumn(column.id.clone()));
            }
        }
        if let Some(ids) = &defaults {
            if let Some(unknown) = ids.iter().find(|id| !seen.contains(id.as_str())) {
                return Err(ListViewError::UnknownDefaultColumn(unknown.clone()));
            }
        }

        let mut registry = Self {
            columns: columns.into(),
            defaults,
            visible: HashSet::new(),
        };
        registry.reset_columns();
        Ok(registry)
    }

    /// All declared columns, in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Visible columns, in declaration order.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| self.visible.contains(&c.id))
            .collect()
    }

    /// Ids of the visible columns, in declaration order.
    pub fn visible_ids(&self) -> Vec<String> {
        self.visible_columns().into_iter().map(|c| c.id.clone()).collect()
    }

    /// Check if a column is visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    /// Show or hide a column. Returns true if the visible set changed.
    pub fn toggle_column(&mut self, id: &str) -> bool {
        if !self.columns.iter().any(|c| c.id == id) {
            warn!("Ignoring toggle of undeclared column {:?}", id);
            return false;
        }
        if !self.visible.remove(id) {
            self.visible.insert(id.to_string());
        }
        debug!("Column {:?} visible: {}", id, self.visible.contains(id));
        true
    }

    /// Restore the host default visible set, or every column without one.
    pub fn reset_columns(&mut self) {
        self.visible = match &self.defaults {
            Some(ids) => ids.iter().cloned().collect(),
            None => self.columns.iter().map(|c| c.id.clone()).collect(),
        };
    }

    /// Make every column visible.
    pub fn show_all(&mut self) {
        self.visible = self.columns.iter().map(|c| c.id.clone()).collect();
    }
}
