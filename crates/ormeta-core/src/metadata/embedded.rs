//! Embedded property paths.
//!
//! A column declared inside one or more embedded structures carries the chain of
//! embedding properties, outermost first. Property and database paths are derived
//! from that chain once, when the column descriptor is created.

use crate::config::RegistryConfig;
use serde::{Deserialize, Serialize};

/// One level of an embedding chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedPrefix {
    /// Property holding the embedded structure.
    pub property_name: String,
    /// Database prefix for columns of the structure.
    ///
    /// `None` uses the property name; an empty string adds no prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl EmbeddedPrefix {
    /// Embed under a property, prefixing columns with the property name.
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            prefix: None,
        }
    }

    /// Embed under a property with an explicit database prefix.
    pub fn with_prefix(property_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            prefix: Some(prefix.into()),
        }
    }

    /// Embed under a property without any database prefix.
    pub fn without_prefix(property_name: impl Into<String>) -> Self {
        Self::with_prefix(property_name, "")
    }

    /// The prefix this level contributes to database names.
    pub fn database_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(&self.property_name)
    }
}

/// Derived name and path set of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnPaths {
    pub property_path: String,
    pub property_alias_name: String,
    pub database_path: String,
    pub database_name: String,
    pub database_name_without_prefixes: String,
}

impl ColumnPaths {
    pub(crate) fn compute(
        embedded: &[EmbeddedPrefix],
        property_name: &str,
        column_name: Option<&str>,
        config: &RegistryConfig,
    ) -> Self {
        let database_name_without_prefixes = column_name.unwrap_or(property_name).to_string();

        let parents: Vec<&str> = embedded.iter().map(|e| e.property_name.as_str()).collect();
        let property_path = join_path(&parents, property_name, ".");
        let database_path = join_path(&parents, &database_name_without_prefixes, ".");
        let property_alias_name = property_path.replace('.', &config.alias_separator);

        let prefixes: Vec<&str> = embedded
            .iter()
            .map(EmbeddedPrefix::database_prefix)
            .filter(|p| !p.is_empty())
            .collect();
        let database_name = join_path(
            &prefixes,
            &database_name_without_prefixes,
            &config.prefix_separator,
        );

        Self {
            property_path,
            property_alias_name,
            database_path,
            database_name,
            database_name_without_prefixes,
        }
    }
}

fn join_path(parents: &[&str], leaf: &str, separator: &str) -> String {
    if parents.is_empty() {
        return leaf.to_string();
    }
    let mut path = parents.join(separator);
    path.push_str(separator);
    path.push_str(leaf);
    path
}
