//! Filter definitions and the live filter set.
//!
//! The engine only manages filter instances. What a filter means, and the
//! actual record filtering, belongs to the host, which receives the full
//! list on every change.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_kind() -> String {
    "text".to_string()
}

/// A filter the user can pick from the filter menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub id: String,
    pub label: String,
    /// Host-defined filter type (`"text"`, `"date"`, `"select"`...).
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Value given to new instances.
    #[serde(default)]
    pub initial_value: Value,
}

impl FilterDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: kind.into(),
            initial_value: Value::Null,
        }
    }

    /// Set the value new instances start with.
    pub fn initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = value.into();
        self
    }
}

/// A live, removable filter created from a [`FilterDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterInstance {
    /// `"{definition id}-{creation millis}"`.
    pub id: String,
    pub label: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Ordered list of active filter instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    instances: Vec<FilterInstance>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active instances, in creation order.
    pub fn instances(&self) -> &[FilterInstance] {
        &self.instances
    }

    pub fn get(&self, id: &str) -> Option<&FilterInstance> {
        self.instances.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Append a new instance of `definition` created at `now_ms`.
    ///
    /// Several instances of one definition may coexist. Two created in the
    /// same millisecond get consecutive timestamps so ids stay unique.
    /// Returns the new instance id.
    pub fn add(&mut self, definition: &FilterDefinition, now_ms: i64) -> String {
        let mut stamp = now_ms;
        let mut id = format!("{}-{}", definition.id, stamp);
        while self.get(&id).is_some() {
            stamp += 1;
            id = format!("{}-{}", definition.id, stamp);
        }
        debug!("Adding filter {}", id);
        self.instances.push(FilterInstance {
            id: id.clone(),
            label: definition.label.clone(),
            value: definition.initial_value.clone(),
            kind: definition.kind.clone(),
        });
        id
    }

    /// Remove an instance. Returns true if it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.instances.len();
        self.instances.retain(|f| f.id != id);
        self.instances.len() != before
    }

    /// Update an instance's value. Returns true if the value changed.
    pub fn set_value(&mut self, id: &str, value: Value) -> bool {
        match self.instances.iter_mut().find(|f| f.id == id) {
            Some(instance) if instance.value != value => {
                instance.value = value;
                true
            }
            _ => false,
        }
    }

    /// Remove every instance. Returns true if any existed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.instances.is_empty();
        self.instances.clear();
        changed
    }
}
