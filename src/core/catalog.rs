//! Filter catalog: the declarative, read-only list of filters a user can pick from.
//!
//! The catalog is supplied by the embedding application (here: the config file
//! or a standalone catalog file) and is never mutated by the state machine.

use crate::core::types::{FilterId, SubItemId};
use derive_deref::Deref;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A concrete value of a filter facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct SubItem {
    pub value: SubItemId,
    pub label: String,
    /// Opaque icon handle, rendered as-is by the presentation layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A filter facet the user can filter by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct FilterItem {
    pub value: FilterId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_items: Option<Vec<SubItem>>,
}

impl SubItem {
    pub fn new(value: impl Into<SubItemId>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            icon: None,
        }
    }
}

impl FilterItem {
    pub fn new(value: impl Into<FilterId>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            label_plural: None,
            icon: None,
            sub_items: None,
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.label_plural = Some(plural.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_sub_items(mut self, sub_items: Vec<SubItem>) -> Self {
        self.sub_items = Some(sub_items);
        self
    }

    /// Sub-options in catalog order (empty when the filter has none)
    pub fn sub_items(&self) -> &[SubItem] {
        self.sub_items.as_deref().unwrap_or(&[])
    }

    /// Whether picking this filter should switch the menu into sub-item view
    pub fn has_sub_items(&self) -> bool {
        !self.sub_items().is_empty()
    }

    pub fn find_sub_item(&self, value: &str) -> Option<&SubItem> {
        self.sub_items().iter().find(|s| s.value == value)
    }

    /// Plural label, falling back to the lowercased label with an `s` appended
    pub fn plural_label(&self) -> String {
        match &self.label_plural {
            Some(plural) => plural.clone(),
            None => format!("{}s", self.label.to_lowercase()),
        }
    }
}

/// Errors raised while loading a catalog from disk
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported catalog format '{0}' (expected json, json5, yaml, yml or toml)")]
    UnsupportedFormat(String),
    #[error("failed to parse catalog: {0}")]
    Parse(String),
    #[error("filter at position {0} has an empty identifier")]
    EmptyFilterId(usize),
    #[error("duplicate filter identifier '{0}'")]
    DuplicateFilter(FilterId),
    #[error("filter '{filter}' has an empty sub-item identifier")]
    EmptySubItemId { filter: FilterId },
    #[error("filter '{filter}' lists sub-item '{sub_item}' more than once")]
    DuplicateSubItem { filter: FilterId, sub_item: SubItemId },
}

/// Ordered list of filter definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct FilterCatalog(Vec<FilterItem>);

/// On-disk wrapper so catalog files can be written as `{ filters: [...] }`
#[derive(Debug, Deserialize)]
struct CatalogFile {
    filters: FilterCatalog,
}

impl FilterCatalog {
    /// Build a catalog, rejecting duplicate or empty identifiers
    pub fn new(filters: Vec<FilterItem>) -> Result<Self, CatalogError> {
        let catalog = Self(filters);
        catalog.check()?;
        Ok(catalog)
    }

    pub fn find(&self, value: &str) -> Option<&FilterItem> {
        self.0.iter().find(|f| f.value == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    /// Ensure identifiers are usable as lookup keys
    pub fn check(&self) -> Result<(), CatalogError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for (idx, filter) in self.0.iter().enumerate() {
            if filter.value.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyFilterId(idx));
            }
            if !seen.insert(filter.value.as_str()) {
                return Err(CatalogError::DuplicateFilter(filter.value.clone()));
            }
            let mut seen_sub: HashSet<&str> = HashSet::new();
            for sub in filter.sub_items() {
                if sub.value.as_str().trim().is_empty() {
                    return Err(CatalogError::EmptySubItemId {
                        filter: filter.value.clone(),
                    });
                }
                if !seen_sub.insert(sub.value.as_str()) {
                    return Err(CatalogError::DuplicateSubItem {
                        filter: filter.value.clone(),
                        sub_item: sub.value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Load a catalog file; the format is picked from the extension.
    ///
    /// Accepts either a bare list of filters or a `{ filters: [...] }` table
    /// (TOML always needs the table form).
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let catalog = Self::parse(&content, &ext)?;
        catalog.check()?;
        tracing::info!("Loaded {} filters from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    fn parse(content: &str, ext: &str) -> Result<Self, CatalogError> {
        let parse_err = |e: &dyn std::fmt::Display| CatalogError::Parse(e.to_string());
        match ext {
            "json" => serde_json::from_str::<Self>(content)
                .or_else(|_| serde_json::from_str::<CatalogFile>(content).map(|f| f.filters))
                .map_err(|e| parse_err(&e)),
            "json5" => json5::from_str::<Self>(content)
                .or_else(|_| json5::from_str::<CatalogFile>(content).map(|f| f.filters))
                .map_err(|e| parse_err(&e)),
            "yaml" | "yml" => serde_yaml::from_str::<Self>(content)
                .or_else(|_| serde_yaml::from_str::<CatalogFile>(content).map(|f| f.filters))
                .map_err(|e| parse_err(&e)),
            "toml" => toml::from_str::<CatalogFile>(content)
                .map(|f| f.filters)
                .map_err(|e| parse_err(&e)),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn into_inner(self) -> Vec<FilterItem> {
        self.0
    }
}
