//! Metadata registry for collecting declarations.

use super::correlate::{correlate, CorrelationReport};
use super::graph::EntityGraph;
use super::inheritance::ancestor_chain;
use crate::config::RegistryConfig;
use crate::declare::{ColumnOptions, IndexOptions, UniqueOptions};
use crate::error::{Error, Result};
use crate::metadata::{
    ColumnMetadata, EntityId, EntityMetadata, IndexMetadata, Target, TypeNode, UniqueMetadata,
};
use parking_lot::Mutex;
use tracing::{debug, info};

/// Everything registered so far.
#[derive(Debug, Default)]
pub(crate) struct Declarations {
    pub(crate) types: Vec<TypeNode>,
    pub(crate) entities: Vec<EntityMetadata>,
    pub(crate) columns: Vec<ColumnMetadata>,
    pub(crate) indices: Vec<IndexMetadata>,
    pub(crate) uniques: Vec<UniqueMetadata>,
}

impl Declarations {
    fn type_name(&self, target: Target) -> &str {
        self.types
            .get(target.index())
            .map(|node| node.name.as_str())
            .unwrap_or("<unknown>")
    }
}

/// Append-only registry of type, entity and fragment declarations.
///
/// Registration takes `&self` and may happen from several threads; all state
/// sits behind one lock. [`build`](Self::build) needs `&mut self` and correlates
/// every entity with the fragments of its inheritance chain.
/// [`freeze`](Self::freeze) turns the result into a read-only [`EntityGraph`].
pub struct MetadataRegistry {
    config: RegistryConfig,
    state: Mutex<Declarations>,
    passes: u32,
}

impl MetadataRegistry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            state: Mutex::new(Declarations::default()),
            passes: 0,
        }
    }

    /// Registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Declare a type, optionally extending an already declared parent.
    ///
    /// Each call returns a new identity, even for a name seen before. A parent
    /// this registry has not issued yet is rejected with [`Error::UnknownParent`].
    pub fn declare_type(&self, name: impl Into<String>, parent: Option<Target>) -> Result<Target> {
        let name = name.into();
        let mut state = self.state.lock();
        let target = Target::from_index(state.types.len());
        if let Some(parent) = parent {
            if parent >= target {
                return Err(Error::UnknownParent(parent.to_string()));
            }
        }
        debug!(
            type_name = %name,
            parent = parent.map(|p| state.type_name(p)).unwrap_or("-"),
            "declared type"
        );
        state.types.push(TypeNode {
            target,
            name,
            parent,
        });
        Ok(target)
    }

    /// Declare a type with no parent.
    pub fn declare_root(&self, name: impl Into<String>) -> Target {
        let name = name.into();
        let mut state = self.state.lock();
        let target = Target::from_index(state.types.len());
        debug!(type_name = %name, parent = "-", "declared type");
        state.types.push(TypeNode {
            target,
            name,
            parent: None,
        });
        target
    }

    /// Declare a type extending `parent`.
    pub fn declare_subtype(&self, name: impl Into<String>, parent: Target) -> Result<Target> {
        self.declare_type(name, Some(parent))
    }

    /// Name of a declared type.
    pub fn type_name(&self, target: Target) -> Option<String> {
        let state = self.state.lock();
        state.types.get(target.index()).map(|node| node.name.clone())
    }

    /// Ancestor chain of `target`, the target itself first.
    pub fn ancestor_chain(&self, target: Target) -> Vec<Target> {
        let state = self.state.lock();
        ancestor_chain(&state.types, target)
    }

    /// Register `target` as an entity.
    ///
    /// Registering the same target twice yields two entities unless the
    /// configuration rejects duplicates.
    pub fn register_entity(&self, target: Target) -> Result<EntityId> {
        let mut state = self.state.lock();

        if self.config.reject_duplicate_entities
            && state.entities.iter().any(|e| e.target == target)
        {
            return Err(Error::DuplicateEntity(state.type_name(target).to_string()));
        }

        let id = EntityId::from_index(state.entities.len());
        debug!(entity = %state.type_name(target), %id, "registered entity");
        state.entities.push(EntityMetadata::new(id, target));
        Ok(id)
    }

    /// Register a column fragment.
    ///
    /// A column taken from a built graph loses its entity backlink here.
    pub fn register_column(&self, mut column: ColumnMetadata) {
        column.detach();
        let mut state = self.state.lock();
        debug!(
            declared_on = %state.type_name(column.target),
            property = %column.property_path,
            "registered column"
        );
        state.columns.push(column);
    }

    /// Register an index fragment.
    pub fn register_index(&self, index: IndexMetadata) {
        let mut state = self.state.lock();
        debug!(
            declared_on = %state.type_name(index.target),
            name = index.name.as_deref().unwrap_or("-"),
            "registered index"
        );
        state.indices.push(index);
    }

    /// Register a unique constraint fragment.
    pub fn register_unique(&self, unique: UniqueMetadata) {
        let mut state = self.state.lock();
        debug!(
            declared_on = %state.type_name(unique.target),
            name = unique.name.as_deref().unwrap_or("-"),
            "registered unique"
        );
        state.uniques.push(unique);
    }

    /// Declare `target` as an entity.
    pub fn entity(&self, target: Target) -> Result<EntityId> {
        self.register_entity(target)
    }

    /// Declare a column on `target`.
    pub fn column(&self, target: Target, property_name: impl Into<String>, options: ColumnOptions) {
        let column = ColumnMetadata::with_config(target, property_name, options, &self.config);
        self.register_column(column);
    }

    /// Declare a primary column on `target`.
    pub fn primary_column(
        &self,
        target: Target,
        property_name: impl Into<String>,
        options: ColumnOptions,
    ) {
        self.column(target, property_name, options.primary());
    }

    /// Declare an index on `target`.
    pub fn index(&self, target: Target, options: IndexOptions) {
        self.register_index(IndexMetadata::new(target, options));
    }

    /// Declare a composite unique constraint on `target`.
    pub fn unique(&self, target: Target, options: UniqueOptions) {
        self.register_unique(UniqueMetadata::new(target, options));
    }

    /// Number of declared types.
    pub fn type_count(&self) -> usize {
        self.state.lock().types.len()
    }

    /// Number of registered entities.
    pub fn entity_count(&self) -> usize {
        self.state.lock().entities.len()
    }

    /// Number of registered column fragments.
    pub fn column_count(&self) -> usize {
        self.state.lock().columns.len()
    }

    /// Number of registered index fragments.
    pub fn index_count(&self) -> usize {
        self.state.lock().indices.len()
    }

    /// Number of registered unique fragments.
    pub fn unique_count(&self) -> usize {
        self.state.lock().uniques.len()
    }

    /// Number of correlation passes run so far.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Registered entities, with whatever the passes so far attached.
    pub fn entities(&mut self) -> &[EntityMetadata] {
        &self.state.get_mut().entities
    }

    /// Correlate every entity with the fragments of its ancestor chain.
    ///
    /// Meant to run once, after all declarations are registered. Attachments are
    /// not cleared between passes: running it again appends every matching
    /// fragment a second time.
    pub fn build(&mut self) -> CorrelationReport {
        self.passes += 1;
        if self.passes > 1 {
            debug!(pass = self.passes, "correlating an already built registry");
        }

        let report = correlate(self.state.get_mut(), self.passes);
        info!(
            pass = report.pass,
            entities = report.entities,
            columns = report.attached_columns,
            indices = report.attached_indices,
            uniques = report.attached_uniques,
            "metadata correlated"
        );
        if report.unattached_columns + report.unattached_indices + report.unattached_uniques > 0 {
            debug!(
                columns = report.unattached_columns,
                indices = report.unattached_indices,
                uniques = report.unattached_uniques,
                "fragments matched no entity"
            );
        }
        report
    }

    /// Freeze the registry into a read-only graph.
    pub fn freeze(self) -> EntityGraph {
        let state = self.state.into_inner();
        EntityGraph::new(state.types, state.entities, self.passes)
    }

    /// Build once and freeze.
    pub fn finish(mut self) -> EntityGraph {
        self.build();
        self.freeze()
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MetadataRegistry")
            .field("types", &state.types.len())
            .field("entities", &state.entities.len())
            .field("columns", &state.columns.len())
            .field("indices", &state.indices.len())
            .field("uniques", &state.uniques.len())
            .field("passes", &self.passes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ColumnType;

    fn property_names(entity: &EntityMetadata) -> Vec<&str> {
        entity.columns.iter().map(|c| c.property_name.as_str()).collect()
    }

    #[test]
    fn test_declare_types_have_distinct_identity() {
        let registry = MetadataRegistry::new();
        let a = registry.declare_root("Node");
        let b = registry.declare_root("Node");

        assert_ne!(a, b);
        assert_eq!(registry.type_count(), 2);
        assert_eq!(registry.type_name(b).as_deref(), Some("Node"));
    }

    #[test]
    fn test_parent_from_another_registry_rejected() {
        let other = MetadataRegistry::new();
        other.declare_root("X");
        let foreign = other.declare_root("Y");

        let registry = MetadataRegistry::new();
        let err = registry.declare_type("Z", Some(foreign)).unwrap_err();
        assert!(matches!(err, Error::UnknownParent(_)));

        // Not yet issued here either: the next target would be its own parent.
        let own = registry.declare_subtype("Self", Target::from_index(0));
        assert!(matches!(own, Err(Error::UnknownParent(_))));
        assert_eq!(registry.type_count(), 0);

        let root = registry.declare_root("Root");
        let child = registry.declare_subtype("Child", root).unwrap();
        assert_eq!(registry.ancestor_chain(child), vec![child, root]);
    }

    #[test]
    fn test_reregistered_graph_column_gets_new_backlink() {
        let first = MetadataRegistry::new();
        let user = first.declare_root("User");
        first.entity(user).unwrap();
        first.primary_column(user, "id", ColumnOptions::new());
        let graph = first.finish();
        let mut correlated = graph.entities()[0].columns[0].clone();
        assert!(correlated.entity_id().is_some());

        let mut second = MetadataRegistry::new();
        let account = second.declare_root("Account");
        second.entity(account).unwrap();
        second.entity(account).unwrap();
        correlated.target = account;
        second.register_column(correlated);
        second.build();

        let entities = second.entities();
        assert_eq!(entities[0].columns[0].entity_id(), Some(entities[0].id));
        assert_eq!(entities[1].columns[0].entity_id(), Some(entities[1].id));
    }

    #[test]
    fn test_registration_counts() {
        let registry = MetadataRegistry::new();
        let user = registry.declare_root("User");

        registry.entity(user).unwrap();
        registry.primary_column(user, "id", ColumnOptions::typed(ColumnType::Int));
        registry.column(user, "email", ColumnOptions::new());
        registry.index(user, IndexOptions::on(["email"]));
        registry.unique(user, UniqueOptions::on(["email"]));

        assert_eq!(registry.entity_count(), 1);
        assert_eq!(registry.column_count(), 2);
        assert_eq!(registry.index_count(), 1);
        assert_eq!(registry.unique_count(), 1);
        assert_eq!(registry.passes(), 0);
    }

    #[test]
    fn test_entities_empty_until_built() {
        let mut registry = MetadataRegistry::new();
        let user = registry.declare_root("User");
        registry.register_entity(user).unwrap();
        registry.column(user, "id", ColumnOptions::new());

        assert!(registry.entities()[0].columns.is_empty());

        registry.build();
        assert_eq!(property_names(&registry.entities()[0]), vec!["id"]);
    }

    #[test]
    fn test_duplicate_entity_allowed_by_default() {
        let registry = MetadataRegistry::new();
        let user = registry.declare_root("User");

        let first = registry.register_entity(user).unwrap();
        let second = registry.register_entity(user).unwrap();

        assert_ne!(first, second);
        assert_eq!(registry.entity_count(), 2);
    }

    #[test]
    fn test_duplicate_entity_rejected_when_strict() {
        let registry = MetadataRegistry::with_config(RegistryConfig::strict());
        let user = registry.declare_root("User");

        registry.register_entity(user).unwrap();
        let err = registry.register_entity(user).unwrap_err();

        assert!(matches!(err, Error::DuplicateEntity(ref name) if name == "User"));
        assert_eq!(registry.entity_count(), 1);
    }

    #[test]
    fn test_column_helper_uses_registry_separators() {
        let registry =
            MetadataRegistry::with_config(RegistryConfig::default().with_prefix_separator("__"));
        let user = registry.declare_root("User");
        registry.register_entity(user).unwrap();
        registry.column(
            user,
            "city",
            ColumnOptions::new().embedded_in(crate::metadata::EmbeddedPrefix::new("address")),
        );

        let graph = registry.finish();
        let column = &graph.entities()[0].columns[0];
        assert_eq!(column.database_name, "address__city");
        assert_eq!(column.property_alias_name, "address_city");
    }

    #[test]
    fn test_second_build_duplicates_attachments() {
        let mut registry = MetadataRegistry::new();
        let user = registry.declare_root("User");
        registry.register_entity(user).unwrap();
        registry.column(user, "id", ColumnOptions::new());
        registry.index(user, IndexOptions::on(["id"]));

        let first = registry.build();
        let second = registry.build();

        assert_eq!(first.pass, 1);
        assert_eq!(second.pass, 2);
        assert_eq!(second.attached_columns, 1);

        let entity = &registry.entities()[0];
        assert_eq!(property_names(entity), vec!["id", "id"]);
        assert_eq!(entity.indices.len(), 2);
    }
}
