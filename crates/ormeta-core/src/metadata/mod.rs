//! Metadata descriptors.
//!
//! Columns, indices and unique constraints are fragments: each is declared against
//! one target type. Entities collect the fragments of their inheritance chain
//! when the registry is built.

mod column;
mod embedded;
mod entity;
mod index;
mod target;
mod types;
mod unique;
mod validate;

pub use column::ColumnMetadata;
pub use embedded::EmbeddedPrefix;
pub use entity::EntityMetadata;
pub use index::{IndexColumns, IndexMetadata, OrderedColumn, SortOrder};
pub use target::{EntityId, Fragment, Target, TypeNode};
pub use types::{ColumnType, DefaultValue};
pub use unique::UniqueMetadata;
pub use validate::{validate_entity, IssueKind, ValidationIssue};
