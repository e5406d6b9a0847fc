//! Column metadata.

use super::embedded::{ColumnPaths, EmbeddedPrefix};
use super::target::{EntityId, Fragment, Target};
use super::types::{ColumnType, DefaultValue};
use crate::config::RegistryConfig;
use crate::declare::ColumnOptions;
use serde::Serialize;

/// Everything known about one declared column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMetadata {
    /// Type the column was declared on.
    pub target: Target,
    /// Property the column is mapped from.
    pub property_name: String,
    /// Owning entity, written once when the column is attached.
    #[serde(rename = "entity")]
    entity_id: Option<EntityId>,
    /// Column type. `None` leaves the choice to the store driver.
    pub column_type: Option<ColumnType>,
    /// Type length.
    pub length: Option<u32>,
    /// Display width.
    pub width: Option<u32>,
    /// Numeric precision.
    pub precision: Option<u32>,
    /// Numeric scale.
    pub scale: Option<u32>,
    /// Part of the primary key.
    pub is_primary: bool,
    /// Accepts NULL.
    pub is_nullable: bool,
    /// Only written on insert.
    pub is_readonly: bool,
    /// Values must be unique.
    pub is_unique: bool,
    /// ZEROFILL attribute.
    pub zerofill: bool,
    /// UNSIGNED attribute.
    pub unsigned: bool,
    /// Default database value.
    pub default: Option<DefaultValue>,
    /// Column comment.
    pub comment: Option<String>,
    /// Character set.
    pub charset: Option<String>,
    /// Collation.
    pub collation: Option<String>,
    /// Allowed enumerated values.
    pub enum_values: Option<Vec<String>>,
    /// Embedding chain, outermost first.
    pub embedded: Vec<EmbeddedPrefix>,
    /// Dotted path to the property through embedded structures,
    /// e.g. `counters.subcounters.likes`.
    pub property_path: String,
    /// `property_path` flattened into a single identifier.
    pub property_alias_name: String,
    /// Dotted path to the database column through embedded structures.
    pub database_path: String,
    /// Column name in the store, embedded prefixes included.
    pub database_name: String,
    /// Column name in the store without embedded prefixes.
    pub database_name_without_prefixes: String,
}

impl ColumnMetadata {
    /// Create column metadata with the default path separators.
    pub fn new(target: Target, property_name: impl Into<String>, options: ColumnOptions) -> Self {
        Self::with_config(target, property_name, options, &RegistryConfig::default())
    }

    /// Create column metadata, deriving paths with the given configuration.
    pub fn with_config(
        target: Target,
        property_name: impl Into<String>,
        options: ColumnOptions,
        config: &RegistryConfig,
    ) -> Self {
        let property_name = property_name.into();
        let paths = ColumnPaths::compute(
            &options.embedded,
            &property_name,
            options.name.as_deref(),
            config,
        );

        Self {
            target,
            property_name,
            entity_id: None,
            column_type: options.column_type,
            length: options.length,
            width: options.width,
            precision: options.precision,
            scale: options.scale,
            is_primary: options.primary,
            is_nullable: options.nullable,
            is_readonly: options.readonly,
            is_unique: options.unique,
            zerofill: options.zerofill,
            unsigned: options.unsigned || options.zerofill,
            default: options.default,
            comment: options.comment,
            charset: options.charset,
            collation: options.collation,
            enum_values: options.enum_values,
            embedded: options.embedded,
            property_path: paths.property_path,
            property_alias_name: paths.property_alias_name,
            database_path: paths.database_path,
            database_name: paths.database_name,
            database_name_without_prefixes: paths.database_name_without_prefixes,
        }
    }

    /// Owning entity. `None` until correlation attaches the column.
    pub fn entity_id(&self) -> Option<EntityId> {
        self.entity_id
    }

    /// Check if the column lives inside an embedded structure.
    pub fn is_embedded(&self) -> bool {
        !self.embedded.is_empty()
    }

    pub(crate) fn build(&mut self, entity: EntityId) {
        debug_assert!(self.entity_id.is_none(), "column backlink written twice");
        self.entity_id = Some(entity);
    }

    pub(crate) fn detach(&mut self) {
        self.entity_id = None;
    }
}

impl Fragment for ColumnMetadata {
    fn target(&self) -> Target {
        self.target
    }
}
