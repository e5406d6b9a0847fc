//! Index and unique-constraint column sets, and index metadata.

use super::target::{Fragment, Target};
use crate::declare::IndexOptions;
use serde::{Deserialize, Serialize};

/// Sort direction of an indexed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

/// A property with an explicit sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedColumn {
    /// Property path of the column.
    pub property: String,
    /// Sort direction.
    #[serde(default)]
    pub order: SortOrder,
}

/// Column set of an index or unique constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexColumns {
    /// Ordered list of property paths.
    Properties(Vec<String>),
    /// Property paths mapped to sort directions.
    Ordered(Vec<OrderedColumn>),
}

impl IndexColumns {
    /// Create a plain property list.
    pub fn properties<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IndexColumns::Properties(properties.into_iter().map(Into::into).collect())
    }

    /// Create a direction mapping.
    pub fn ordered<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, SortOrder)>,
        S: Into<String>,
    {
        IndexColumns::Ordered(
            columns
                .into_iter()
                .map(|(property, order)| OrderedColumn {
                    property: property.into(),
                    order,
                })
                .collect(),
        )
    }

    /// Property paths in declaration order.
    pub fn property_names(&self) -> Vec<&str> {
        match self {
            IndexColumns::Properties(names) => names.iter().map(String::as_str).collect(),
            IndexColumns::Ordered(columns) => {
                columns.iter().map(|c| c.property.as_str()).collect()
            }
        }
    }

    /// Sort direction of a property. Plain lists are ascending.
    pub fn order_of(&self, property: &str) -> Option<SortOrder> {
        match self {
            IndexColumns::Properties(names) => names
                .iter()
                .any(|n| n == property)
                .then_some(SortOrder::Asc),
            IndexColumns::Ordered(columns) => columns
                .iter()
                .find(|c| c.property == property)
                .map(|c| c.order),
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        match self {
            IndexColumns::Properties(names) => names.len(),
            IndexColumns::Ordered(columns) => columns.len(),
        }
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Metadata of a declared index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexMetadata {
    /// Type the index was declared on.
    pub target: Target,
    /// Index name.
    pub name: Option<String>,
    /// Indexed columns.
    pub columns: Option<IndexColumns>,
    /// Whether the index is unique.
    pub is_unique: bool,
    /// SPATIAL modifier.
    pub is_spatial: bool,
    /// FULLTEXT modifier.
    pub is_fulltext: bool,
    /// Filter condition.
    pub where_clause: Option<String>,
    /// Only index documents that have the field.
    pub is_sparse: bool,
    /// Whether the index is kept in sync with the store schema.
    pub synchronize: bool,
}

impl IndexMetadata {
    /// Create index metadata from declaration options.
    pub fn new(target: Target, options: IndexOptions) -> Self {
        Self {
            target,
            name: options.name,
            columns: options.columns,
            is_unique: options.unique,
            is_spatial: options.spatial,
            is_fulltext: options.fulltext,
            where_clause: options.where_clause,
            is_sparse: options.sparse,
            synchronize: options.synchronize,
        }
    }

    /// Property paths covered by the index.
    pub fn property_names(&self) -> Vec<&str> {
        self.columns
            .as_ref()
            .map(IndexColumns::property_names)
            .unwrap_or_default()
    }
}

impl Fragment for IndexMetadata {
    fn target(&self) -> Target {
        self.target
    }
}
