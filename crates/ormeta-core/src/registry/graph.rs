//! Read-only correlated metadata.

use super::inheritance::ancestor_chain;
use crate::metadata::{
    validate_entity, ColumnMetadata, EntityId, EntityMetadata, Target, TypeNode, ValidationIssue,
};

/// The frozen result of correlation.
///
/// Holds no interior mutability and can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct EntityGraph {
    types: Vec<TypeNode>,
    entities: Vec<EntityMetadata>,
    passes: u32,
}

impl EntityGraph {
    pub(crate) fn new(types: Vec<TypeNode>, entities: Vec<EntityMetadata>, passes: u32) -> Self {
        Self {
            types,
            entities,
            passes,
        }
    }

    /// All entities in registration order.
    pub fn entities(&self) -> &[EntityMetadata] {
        &self.entities
    }

    /// All declared types in declaration order.
    pub fn types(&self) -> &[TypeNode] {
        &self.types
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the graph has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of correlation passes that produced this graph.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Entity by id.
    pub fn get(&self, id: EntityId) -> Option<&EntityMetadata> {
        self.entities.get(id.index())
    }

    /// First entity registered for `target`.
    pub fn entity(&self, target: Target) -> Option<&EntityMetadata> {
        self.entities_for(target).next()
    }

    /// Every entity registered for `target`, in registration order.
    pub fn entities_for(&self, target: Target) -> impl Iterator<Item = &EntityMetadata> {
        self.entities.iter().filter(move |e| e.target == target)
    }

    /// First entity whose type has the given name.
    pub fn entity_by_name(&self, name: &str) -> Option<&EntityMetadata> {
        self.entities
            .iter()
            .find(|e| self.type_name(e.target) == Some(name))
    }

    /// Entity a correlated column belongs to.
    pub fn owner_of(&self, column: &ColumnMetadata) -> Option<&EntityMetadata> {
        column.entity_id().and_then(|id| self.get(id))
    }

    /// Declared type node.
    pub fn type_node(&self, target: Target) -> Option<&TypeNode> {
        self.types.get(target.index())
    }

    /// Declared name of a type.
    pub fn type_name(&self, target: Target) -> Option<&str> {
        self.type_node(target).map(|node| node.name.as_str())
    }

    /// First type declared with the given name.
    pub fn find_type(&self, name: &str) -> Option<Target> {
        self.types
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.target)
    }

    /// Ancestor chain of `target`, the target itself first.
    pub fn ancestor_chain(&self, target: Target) -> Vec<Target> {
        ancestor_chain(&self.types, target)
    }

    /// Run declaration checks over every entity.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        self.entities.iter().flat_map(validate_entity).collect()
    }
}
