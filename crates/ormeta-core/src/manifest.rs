//! JSON schema manifests.
//!
//! A manifest lists type, entity and fragment declarations by type name. List
//! order is registration order, and a type's parent must be declared before it.
//!
//! ```json
//! {
//!   "types": [{"name": "User"}, {"name": "AdminUser", "extends": "User"}],
//!   "entities": ["User", "AdminUser"],
//!   "columns": [
//!     {"target": "User", "property": "id", "type": "int", "primary": true},
//!     {"target": "AdminUser", "property": "role", "type": "varchar", "length": 32}
//!   ],
//!   "indices": [{"target": "AdminUser", "columns": ["role"]}],
//!   "uniques": []
//! }
//! ```

use crate::declare::{ColumnOptions, IndexOptions, UniqueOptions};
use crate::error::{Error, Result};
use crate::metadata::Target;
use crate::registry::MetadataRegistry;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// A declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Type name, unique within the manifest.
    pub name: String,
    /// Parent type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

/// A column declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDecl {
    /// Type the column is declared on.
    pub target: String,
    /// Property name.
    pub property: String,
    /// Column options.
    #[serde(flatten)]
    pub options: ColumnOptions,
}

/// An index declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDecl {
    /// Type the index is declared on.
    pub target: String,
    /// Index options.
    #[serde(flatten)]
    pub options: IndexOptions,
}

/// A unique constraint declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueDecl {
    /// Type the constraint is declared on.
    pub target: String,
    /// Constraint options.
    #[serde(flatten)]
    pub options: UniqueOptions,
}

/// A complete set of declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaManifest {
    /// Declared types.
    pub types: Vec<TypeDecl>,
    /// Names of types registered as entities.
    pub entities: Vec<String>,
    /// Column declarations.
    pub columns: Vec<ColumnDecl>,
    /// Index declarations.
    pub indices: Vec<IndexDecl>,
    /// Unique constraint declarations.
    pub uniques: Vec<UniqueDecl>,
}

/// Targets issued while registering a manifest, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct ManifestTargets {
    targets: HashMap<String, Target>,
}

impl ManifestTargets {
    /// Target of a type name.
    pub fn get(&self, name: &str) -> Option<Target> {
        self.targets.get(name).copied()
    }

    /// Target of a type name, or [`Error::UnknownType`].
    pub fn resolve(&self, name: &str) -> Result<Target> {
        self.get(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if no types were declared.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl SchemaManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Register every declaration into `registry`.
    ///
    /// Types are declared first so fragments may name any type in the manifest.
    /// Nothing is registered if a type reference cannot be resolved, or if the
    /// registry rejects duplicate entities and the manifest lists one twice.
    pub fn register_into(&self, registry: &MetadataRegistry) -> Result<ManifestTargets> {
        self.check_references(registry.config().reject_duplicate_entities)?;

        let mut targets = ManifestTargets::default();
        for decl in &self.types {
            let parent = decl
                .extends
                .as_deref()
                .map(|name| targets.resolve(name))
                .transpose()?;
            let target = registry.declare_type(decl.name.clone(), parent)?;
            targets.targets.insert(decl.name.clone(), target);
        }

        for name in &self.entities {
            registry.register_entity(targets.resolve(name)?)?;
        }
        for decl in &self.columns {
            registry.column(
                targets.resolve(&decl.target)?,
                decl.property.clone(),
                decl.options.clone(),
            );
        }
        for decl in &self.indices {
            registry.index(targets.resolve(&decl.target)?, decl.options.clone());
        }
        for decl in &self.uniques {
            registry.unique(targets.resolve(&decl.target)?, decl.options.clone());
        }

        debug!(
            types = self.types.len(),
            entities = self.entities.len(),
            columns = self.columns.len(),
            indices = self.indices.len(),
            uniques = self.uniques.len(),
            "manifest registered"
        );
        Ok(targets)
    }

    /// Check names before anything touches the registry.
    fn check_references(&self, reject_duplicate_entities: bool) -> Result<()> {
        let mut declared: HashSet<&str> = HashSet::new();
        for decl in &self.types {
            if let Some(parent) = decl.extends.as_deref() {
                if !declared.contains(parent) {
                    return Err(Error::UnknownType(parent.to_string()));
                }
            }
            if !declared.insert(decl.name.as_str()) {
                return Err(Error::DuplicateType(decl.name.clone()));
            }
        }

        let referenced = self
            .entities
            .iter()
            .map(String::as_str)
            .chain(self.columns.iter().map(|d| d.target.as_str()))
            .chain(self.indices.iter().map(|d| d.target.as_str()))
            .chain(self.uniques.iter().map(|d| d.target.as_str()));
        for name in referenced {
            if !declared.contains(name) {
                return Err(Error::UnknownType(name.to_string()));
            }
        }

        if reject_duplicate_entities {
            let mut entities: HashSet<&str> = HashSet::new();
            for name in &self.entities {
                if !entities.insert(name.as_str()) {
                    return Err(Error::DuplicateEntity(name.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::metadata::{ColumnType, IndexColumns, SortOrder};
    use std::io::Write;

    const BLOG: &str = r#"{
        "types": [
            {"name": "Base"},
            {"name": "Post", "extends": "Base"}
        ],
        "entities": ["Post"],
        "columns": [
            {"target": "Base", "property": "id", "type": "int", "primary": true},
            {"target": "Post", "property": "title", "type": "varchar", "length": 120},
            {"target": "Post", "property": "likes", "embedded": [{"property_name": "counters"}]}
        ],
        "indices": [
            {"target": "Post", "name": "idx_title", "columns": [{"property": "title", "order": "desc"}]}
        ],
        "uniques": [
            {"target": "Post", "columns": ["title"]}
        ]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = SchemaManifest::from_json(BLOG).unwrap();

        assert_eq!(manifest.types.len(), 2);
        assert_eq!(manifest.types[1].extends.as_deref(), Some("Base"));
        assert_eq!(manifest.columns[0].options.column_type, Some(ColumnType::Int));
        assert!(manifest.columns[0].options.primary);
        assert_eq!(manifest.columns[1].options.length, Some(120));
        assert!(manifest.indices[0].options.synchronize);
        assert_eq!(
            manifest.indices[0]
                .options
                .columns
                .as_ref()
                .and_then(|c| c.order_of("title")),
            Some(SortOrder::Desc)
        );
    }

    #[test]
    fn test_register_and_correlate_manifest() {
        let registry = MetadataRegistry::new();
        let targets = SchemaManifest::from_json(BLOG)
            .unwrap()
            .register_into(&registry)
            .unwrap();
        assert_eq!(targets.len(), 2);

        let graph = registry.finish();
        let post = graph.entity(targets.get("Post").unwrap()).unwrap();

        let paths: Vec<&str> = post.columns.iter().map(|c| c.property_path.as_str()).collect();
        assert_eq!(paths, vec!["id", "title", "counters.likes"]);
        assert_eq!(post.indices.len(), 1);
        assert_eq!(
            post.uniques[0].columns,
            Some(IndexColumns::properties(["title"]))
        );
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let manifest = SchemaManifest::from_json(
            r#"{"types": [{"name": "Child", "extends": "Parent"}, {"name": "Parent"}]}"#,
        )
        .unwrap();
        let registry = MetadataRegistry::new();

        let err = manifest.register_into(&registry).unwrap_err();
        assert!(matches!(err, Error::UnknownType(ref name) if name == "Parent"));
        assert_eq!(registry.type_count(), 0);
    }

    #[test]
    fn test_unknown_fragment_target_rejected() {
        let manifest = SchemaManifest::from_json(
            r#"{"types": [{"name": "User"}], "columns": [{"target": "Ghost", "property": "x"}]}"#,
        )
        .unwrap();
        let registry = MetadataRegistry::new();

        let err = manifest.register_into(&registry).unwrap_err();
        assert!(matches!(err, Error::UnknownType(ref name) if name == "Ghost"));
        assert_eq!(registry.column_count(), 0);
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let manifest =
            SchemaManifest::from_json(r#"{"types": [{"name": "User"}, {"name": "User"}]}"#)
                .unwrap();
        let err = manifest.register_into(&MetadataRegistry::new()).unwrap_err();
        assert!(matches!(err, Error::DuplicateType(_)));
    }

    #[test]
    fn test_strict_duplicate_entity_registers_nothing() {
        let manifest = SchemaManifest::from_json(
            r#"{
                "types": [{"name": "User"}, {"name": "Post"}],
                "entities": ["User", "Post", "User"],
                "columns": [{"target": "User", "property": "id"}]
            }"#,
        )
        .unwrap();

        let registry = MetadataRegistry::with_config(RegistryConfig::strict());
        let err = manifest.register_into(&registry).unwrap_err();
        assert!(matches!(err, Error::DuplicateEntity(ref name) if name == "User"));
        assert_eq!(registry.type_count(), 0);
        assert_eq!(registry.entity_count(), 0);

        let lenient = MetadataRegistry::new();
        manifest.register_into(&lenient).unwrap();
        assert_eq!(lenient.entity_count(), 3);
    }

    #[test]
    fn test_invalid_json() {
        let err = SchemaManifest::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Manifest(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BLOG.as_bytes()).unwrap();

        let manifest = SchemaManifest::from_path(file.path()).unwrap();
        assert_eq!(manifest.entities, vec!["Post".to_string()]);

        let missing = SchemaManifest::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
