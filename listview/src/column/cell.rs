//! Cell resolution: turning a `(record, column)` pair into displayable content.

use serde_json::Value;

use super::{Column, ColumnKind};
use crate::record::{PATH_SEPARATOR, Record, display_value};

/// Text shown for missing, null or empty values.
pub const PLACEHOLDER: &str = "-";

/// Badge colour. Hosts map these onto their own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Green,
    Gray,
    Red,
}

/// Per-row action buttons rendered in an actions column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    /// All row actions, in button order.
    pub const ALL: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::View => "Voir",
            RowAction::Edit => "Modifier",
            RowAction::Delete => "Supprimer",
        }
    }
}

/// Resolved content of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// No value; shown as [`PLACEHOLDER`].
    Placeholder,
    /// A coloured status badge.
    Badge { label: String, tone: Tone },
    /// Row action buttons, only those the host handles.
    Actions(Vec<RowAction>),
}

impl Cell {
    /// Create a text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(text.into())
    }

    /// Create a badge cell.
    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            label: label.into(),
            tone,
        }
    }

    /// Plain-text rendition, used by text hosts and tests.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Placeholder => PLACEHOLDER.to_string(),
            Cell::Badge { label, .. } => label.clone(),
            Cell::Actions(actions) => actions
                .iter()
                .map(|a| a.label())
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(display_value) {
            Some(text) => Cell::Text(text),
            None => Cell::Placeholder,
        }
    }
}

/// A boolean field rendered as a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusField {
    pub field: &'static str,
    pub active_label: &'static str,
    pub inactive_label: &'static str,
    pub active_tone: Tone,
    pub inactive_tone: Tone,
}

impl StatusField {
    fn badge(&self, value: Option<&Value>) -> Cell {
        if value.is_some_and(is_truthy) {
            Cell::badge(self.active_label, self.active_tone)
        } else {
            Cell::badge(self.inactive_label, self.inactive_tone)
        }
    }
}

/// Recognized status fields, in priority order.
///
/// The inactive tone differs between the two: gray for `isActive`, red for
/// `actif`.
pub const STATUS_FIELDS: [StatusField; 2] = [
    StatusField {
        field: "isActive",
        active_label: "Actif",
        inactive_label: "Inactif",
        active_tone: Tone::Green,
        inactive_tone: Tone::Gray,
    },
    StatusField {
        field: "actif",
        active_label: "Actif",
        inactive_label: "Inactif",
        active_tone: Tone::Green,
        inactive_tone: Tone::Red,
    },
];

/// Resolve the content of `column` for `record`.
///
/// Precedence: custom renderer, actions column, status field, nested path,
/// direct field. Never fails; anything missing resolves to
/// [`Cell::Placeholder`]. `row_actions` lists the actions the host handles.
pub fn resolve_cell(record: &Record, column: &Column, row_actions: &[RowAction]) -> Cell {
    if let Some(render) = &column.render {
        return render(record);
    }

    if column.kind == ColumnKind::Actions {
        return Cell::Actions(
            RowAction::ALL
                .into_iter()
                .filter(|a| row_actions.contains(a))
                .collect(),
        );
    }

    let Some(field) = column.field.as_deref() else {
        return Cell::Placeholder;
    };

    if let Some(status) = STATUS_FIELDS.iter().find(|s| s.field == field) {
        return status.badge(record.get(field));
    }

    if field.contains(PATH_SEPARATOR) {
        Cell::from_value(record.get_path(field))
    } else {
        Cell::from_value(record.get(field))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
