//! Declaration options.
//!
//! One option struct per kind of declaration. Registration helpers on
//! [`MetadataRegistry`](crate::MetadataRegistry) turn them into fragments.

use crate::metadata::{ColumnType, DefaultValue, EmbeddedPrefix, IndexColumns};
use serde::{Deserialize, Serialize};

/// Options for a column declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOptions {
    /// Column type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    /// Column name in the database. Defaults to the property name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Type length, e.g. `varchar(100)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Display width for integer types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the value is only written on insert.
    pub readonly: bool,
    /// Default database value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Whether the column is part of the primary key.
    pub primary: bool,
    /// Whether the column value must be unique.
    pub unique: bool,
    /// Column comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Maximum number of stored digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Digits to the right of the decimal point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    /// ZEROFILL attribute. Implies `unsigned`.
    pub zerofill: bool,
    /// UNSIGNED attribute.
    pub unsigned: bool,
    /// Character set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    /// Collation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    /// Allowed enumerated values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Embedding chain, outermost first. Empty for top-level columns.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embedded: Vec<EmbeddedPrefix>,
}

impl ColumnOptions {
    /// Create empty column options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options with a column type.
    pub fn typed(column_type: ColumnType) -> Self {
        Self {
            column_type: Some(column_type),
            ..Default::default()
        }
    }

    /// Set the column type.
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    /// Set the database column name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the type length.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the display width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Mark as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark as readonly.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark as primary.
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Mark as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set precision and scale.
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Set the ZEROFILL attribute.
    pub fn zerofill(mut self) -> Self {
        self.zerofill = true;
        self
    }

    /// Set the UNSIGNED attribute.
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Set the character set.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Set the collation.
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Set the enumerated values.
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Nest the column one level deeper inside an embedded structure.
    ///
    /// Calls are made outermost first.
    pub fn embedded_in(mut self, prefix: EmbeddedPrefix) -> Self {
        self.embedded.push(prefix);
        self
    }
}

/// Options for an index declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Index name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Indexed columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<IndexColumns>,
    /// Whether the index is unique.
    pub unique: bool,
    /// SPATIAL modifier.
    pub spatial: bool,
    /// FULLTEXT modifier.
    pub fulltext: bool,
    /// Filter condition.
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    /// Whether the index is kept in sync with the store schema.
    pub synchronize: bool,
    /// Only index documents that have the field.
    pub sparse: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            name: None,
            columns: None,
            unique: false,
            spatial: false,
            fulltext: false,
            where_clause: None,
            synchronize: true,
            sparse: false,
        }
    }
}

impl IndexOptions {
    /// Create empty index options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options indexing the given properties in order.
    pub fn on<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: Some(IndexColumns::properties(properties)),
            ..Default::default()
        }
    }

    /// Set the index name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the indexed columns.
    pub fn with_columns(mut self, columns: IndexColumns) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Mark as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark as spatial.
    pub fn spatial(mut self) -> Self {
        self.spatial = true;
        self
    }

    /// Mark as fulltext.
    pub fn fulltext(mut self) -> Self {
        self.fulltext = true;
        self
    }

    /// Set the filter condition.
    pub fn with_where(mut self, condition: impl Into<String>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }

    /// Exclude the index from schema synchronization.
    pub fn without_synchronize(mut self) -> Self {
        self.synchronize = false;
        self
    }

    /// Mark as sparse.
    pub fn sparse(mut self) -> Self {
        self.sparse = true;
        self
    }
}

/// Options for a composite unique constraint declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniqueOptions {
    /// Constraint name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Columns that must be unique together.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<IndexColumns>,
}

impl UniqueOptions {
    /// Create options for the given properties.
    pub fn on<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            columns: Some(IndexColumns::properties(properties)),
        }
    }

    /// Set the constraint name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
