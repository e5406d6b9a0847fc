//! ormeta core - entity metadata registry and correlation.
//!
//! Types, entities and their column, index and unique declarations are
//! registered in any order. One correlation pass attaches every fragment to the
//! entities whose inheritance chain contains its type, and the result is frozen
//! into a read-only [`EntityGraph`] for query and schema layers.

pub mod config;
pub mod declare;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod registry;
pub mod session;

pub use config::RegistryConfig;
pub use declare::{ColumnOptions, IndexOptions, UniqueOptions};
pub use error::{Error, Result};
pub use manifest::{ManifestTargets, SchemaManifest};
pub use metadata::{
    ColumnMetadata, ColumnType, DefaultValue, EmbeddedPrefix, EntityId, EntityMetadata, Fragment,
    IndexColumns, IndexMetadata, IssueKind, SortOrder, Target, TypeNode, UniqueMetadata,
    ValidationIssue,
};
pub use registry::{CorrelationReport, EntityGraph, MetadataRegistry};
pub use session::{prepare_repository, QueryRunner, Repository, RunnerBinding, RunnerSource};
