//! Entity metadata.

use super::column::ColumnMetadata;
use super::index::IndexMetadata;
use super::target::{EntityId, Fragment, Target};
use super::unique::UniqueMetadata;
use serde::Serialize;

/// Correlated metadata of one entity.
///
/// The collections are empty until the registry is built. They then hold every
/// fragment declared on the entity's type or any of its ancestors, in
/// registration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityMetadata {
    /// Position in registration order.
    pub id: EntityId,
    /// Type the entity was declared on.
    pub target: Target,
    /// Correlated columns.
    pub columns: Vec<ColumnMetadata>,
    /// Correlated indices.
    pub indices: Vec<IndexMetadata>,
    /// Correlated unique constraints.
    pub uniques: Vec<UniqueMetadata>,
}

impl EntityMetadata {
    /// Create an empty entity descriptor.
    pub fn new(id: EntityId, target: Target) -> Self {
        Self {
            id,
            target,
            columns: Vec::new(),
            indices: Vec::new(),
            uniques: Vec::new(),
        }
    }

    /// Columns forming the primary key.
    pub fn primary_columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.columns.iter().filter(|c| c.is_primary)
    }

    /// Find a column by property path.
    pub fn find_column(&self, property_path: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.property_path == property_path)
    }

    /// Find a column by its database name.
    pub fn find_column_by_database_name(&self, database_name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.database_name == database_name)
    }

    /// Check if a column with the given property path exists.
    pub fn has_column(&self, property_path: &str) -> bool {
        self.find_column(property_path).is_some()
    }
}

impl Fragment for EntityMetadata {
    fn target(&self) -> Target {
        self.target
    }
}
