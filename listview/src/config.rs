//! Host configuration and inputs.
//!
//! [`ListConfig`] is the static part a page declares once (columns, filters,
//! page size, menu sizing). [`ListInputs`] is what the host pushes on every
//! fetch (records, loading and error state, external pagination).

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::ListViewError;
use crate::filter::FilterDefinition;
use crate::menu::MenuLayout;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, ExternalPagination, PaginationMode};
use crate::record::Record;
use crate::search::SearchPolicy;

/// Override for the "no records yet" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    pub title: String,
    pub description: String,
    /// Label of the call-to-action button; `None` hides it.
    #[serde(default)]
    pub action: Option<String>,
}

/// Static configuration of one entity list.
///
/// Deserializable from JSON so pages can declare their columns and filters
/// as data. Custom cell renderers are attached after loading.
///
/// ```
/// use listview::config::ListConfig;
///
/// let config = ListConfig::from_json(r#"{
///     "title": "Banques",
///     "columns": [
///         { "id": "code", "label": "Code", "field": "code" },
///         { "id": "city", "label": "Ville", "field": "address.city" },
///         { "id": "actions", "label": "", "type": "actions" }
///     ],
///     "items_per_page": 20
/// }"#).unwrap();
///
/// assert_eq!(config.columns.len(), 3);
/// assert_eq!(config.items_per_page, 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub title: String,
    pub columns: Vec<Column>,
    /// Initially visible column ids; `None` shows every column.
    pub default_visible_columns: Option<Vec<String>>,
    pub filter_definitions: Vec<FilterDefinition>,
    /// Initial page size, one of the selector options.
    pub items_per_page: usize,
    pub search_policy: SearchPolicy,
    pub menu_layout: MenuLayout,
    pub empty_state: Option<EmptyState>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            columns: Vec::new(),
            default_visible_columns: None,
            filter_definitions: Vec::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            search_policy: SearchPolicy::default(),
            menu_layout: MenuLayout::default(),
            empty_state: None,
        }
    }
}

impl ListConfig {
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            columns,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ListViewError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn default_visible_columns(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.default_visible_columns = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn filter(mut self, definition: FilterDefinition) -> Self {
        self.filter_definitions.push(definition);
        self
    }

    pub fn items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn search_policy(mut self, policy: SearchPolicy) -> Self {
        self.search_policy = policy;
        self
    }

    pub fn menu_layout(mut self, layout: MenuLayout) -> Self {
        self.menu_layout = layout;
        self
    }

    pub fn empty_state(mut self, empty_state: EmptyState) -> Self {
        self.empty_state = Some(empty_state);
        self
    }

    /// Look up a filter definition by id.
    pub fn filter_definition(&self, id: &str) -> Option<&FilterDefinition> {
        self.filter_definitions.iter().find(|d| d.id == id)
    }

    /// Check that filter definition ids are unique.
    pub(crate) fn validate_filters(&self) -> Result<(), ListViewError> {
        for (i, definition) in self.filter_definitions.iter().enumerate() {
            if self.filter_definitions[..i].iter().any(|d| d.id == definition.id) {
                return Err(ListViewError::DuplicateFilter(definition.id.clone()));
            }
        }
        Ok(())
    }
}

/// Data the host pushes into the list.
#[derive(Debug, Clone, Default)]
pub struct ListInputs {
    /// The records to show: the full (already filtered) list in internal
    /// pagination mode, the current page in external mode.
    pub data: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
    /// Size of the dataset before host-side search and filters. Decides
    /// which empty-state panel shows. Defaults to `data.len()`.
    pub unfiltered_count: Option<usize>,
    /// Presence switches to external pagination.
    pub pagination: Option<ExternalPagination>,
}

impl ListInputs {
    pub fn new(data: Vec<Record>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn unfiltered_count(mut self, count: usize) -> Self {
        self.unfiltered_count = Some(count);
        self
    }

    /// Switch to external pagination with the host's total item count.
    pub fn external(mut self, total_items: usize) -> Self {
        self.pagination = Some(ExternalPagination { total_items });
        self
    }

    pub fn mode(&self) -> PaginationMode {
        if self.pagination.is_some() {
            PaginationMode::External
        } else {
            PaginationMode::Internal
        }
    }

    /// Item count pagination is computed from.
    pub fn total_items(&self) -> usize {
        match self.pagination {
            Some(external) => external.total_items,
            None => self.data.len(),
        }
    }

    /// Dataset size before host-side filtering.
    pub fn unfiltered_len(&self) -> usize {
        self.unfiltered_count.unwrap_or(self.data.len())
    }
}
