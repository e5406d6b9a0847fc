//! Declaration checks for correlated entities.
//!
//! Registration accepts any declaration. Consumers that need well-formed
//! metadata run these checks after the graph is built.

use super::column::ColumnMetadata;
use super::entity::EntityMetadata;
use super::target::{EntityId, Target};
use super::types::ColumnType;
use serde::Serialize;
use std::fmt;

/// Problem found in an entity's declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Entity the problem was found in.
    pub entity: EntityId,
    /// Type of that entity.
    pub target: Target,
    /// Property path involved, if any.
    pub property: Option<String>,
    /// What is wrong.
    pub kind: IssueKind,
}

/// Kinds of declaration problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Entity has no primary column.
    MissingPrimaryColumn,
    /// Column is both primary and nullable.
    PrimaryNullable,
    /// `length` set on a type without a length.
    LengthNotSupported {
        /// Declared type.
        column_type: ColumnType,
    },
    /// `width` set on a type without a display width.
    WidthNotSupported {
        /// Declared type.
        column_type: ColumnType,
    },
    /// `precision` or `scale` set on a type without them.
    PrecisionNotSupported {
        /// Declared type.
        column_type: ColumnType,
    },
    /// `scale` is greater than `precision`.
    ScaleExceedsPrecision {
        /// Declared precision.
        precision: u32,
        /// Declared scale.
        scale: u32,
    },
    /// Enumerated values on a column that is not an enum.
    EnumValuesNotSupported,
    /// Index names a property the entity does not have.
    UnknownIndexColumn {
        /// Index name.
        index: Option<String>,
    },
    /// Unique constraint names a property the entity does not have.
    UnknownUniqueColumn {
        /// Constraint name.
        unique: Option<String>,
    },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::MissingPrimaryColumn => write!(f, "entity has no primary column"),
            IssueKind::PrimaryNullable => write!(f, "primary column cannot be nullable"),
            IssueKind::LengthNotSupported { column_type } => {
                write!(f, "type '{}' does not take a length", column_type)
            }
            IssueKind::WidthNotSupported { column_type } => {
                write!(f, "type '{}' does not take a display width", column_type)
            }
            IssueKind::PrecisionNotSupported { column_type } => {
                write!(f, "type '{}' does not take precision or scale", column_type)
            }
            IssueKind::ScaleExceedsPrecision { precision, scale } => {
                write!(f, "scale {} exceeds precision {}", scale, precision)
            }
            IssueKind::EnumValuesNotSupported => {
                write!(f, "enumerated values require an enum column")
            }
            IssueKind::UnknownIndexColumn { index } => match index {
                Some(name) => write!(f, "index '{}' references an unknown column", name),
                None => write!(f, "index references an unknown column"),
            },
            IssueKind::UnknownUniqueColumn { unique } => match unique {
                Some(name) => write!(f, "unique '{}' references an unknown column", name),
                None => write!(f, "unique constraint references an unknown column"),
            },
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{}: {}", property, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Check one correlated entity.
pub fn validate_entity(entity: &EntityMetadata) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut report = |property: Option<&str>, kind: IssueKind| {
        issues.push(ValidationIssue {
            entity: entity.id,
            target: entity.target,
            property: property.map(str::to_string),
            kind,
        });
    };

    if entity.primary_columns().next().is_none() {
        report(None, IssueKind::MissingPrimaryColumn);
    }

    for column in &entity.columns {
        for kind in column_issues(column) {
            report(Some(&column.property_path), kind);
        }
    }

    for index in &entity.indices {
        for property in index.property_names() {
            if !entity.has_column(property) {
                report(
                    Some(property),
                    IssueKind::UnknownIndexColumn {
                        index: index.name.clone(),
                    },
                );
            }
        }
    }

    for unique in &entity.uniques {
        for property in unique.property_names() {
            if !entity.has_column(property) {
                report(
                    Some(property),
                    IssueKind::UnknownUniqueColumn {
                        unique: unique.name.clone(),
                    },
                );
            }
        }
    }

    issues
}

fn column_issues(column: &ColumnMetadata) -> Vec<IssueKind> {
    let mut issues = Vec::new();

    if column.is_primary && column.is_nullable {
        issues.push(IssueKind::PrimaryNullable);
    }

    if let Some(column_type) = &column.column_type {
        if column.length.is_some() && !column_type.supports_length() {
            issues.push(IssueKind::LengthNotSupported {
                column_type: column_type.clone(),
            });
        }
        if column.width.is_some() && !column_type.supports_width() {
            issues.push(IssueKind::WidthNotSupported {
                column_type: column_type.clone(),
            });
        }
        if (column.precision.is_some() || column.scale.is_some())
            && !column_type.supports_precision()
        {
            issues.push(IssueKind::PrecisionNotSupported {
                column_type: column_type.clone(),
            });
        }
        if column.enum_values.is_some() && *column_type != ColumnType::Enum {
            issues.push(IssueKind::EnumValuesNotSupported);
        }
    }

    if let (Some(precision), Some(scale)) = (column.precision, column.scale) {
        if scale > precision {
            issues.push(IssueKind::ScaleExceedsPrecision { precision, scale });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::{ColumnOptions, IndexOptions, UniqueOptions};
    use crate::metadata::{IndexMetadata, UniqueMetadata};

    fn entity_with(columns: Vec<ColumnMetadata>) -> EntityMetadata {
        let mut entity = EntityMetadata::new(EntityId::from_index(0), Target::from_index(0));
        entity.columns = columns;
        entity
    }

    fn column(property: &str, options: ColumnOptions) -> ColumnMetadata {
        ColumnMetadata::new(Target::from_index(0), property, options)
    }

    #[test]
    fn test_valid_entity_has_no_issues() {
        let entity = entity_with(vec![
            column("id", ColumnOptions::typed(ColumnType::Int).primary()),
            column(
                "price",
                ColumnOptions::typed(ColumnType::Decimal).with_precision(10, 2),
            ),
        ]);
        assert!(validate_entity(&entity).is_empty());
    }

    #[test]
    fn test_missing_primary_and_primary_nullable() {
        let entity = entity_with(vec![column("name", ColumnOptions::new())]);
        let issues = validate_entity(&entity);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MissingPrimaryColumn);

        let entity = entity_with(vec![column("id", ColumnOptions::new().primary().nullable())]);
        let issues = validate_entity(&entity);
        assert_eq!(issues[0].kind, IssueKind::PrimaryNullable);
        assert_eq!(issues[0].property.as_deref(), Some("id"));
    }

    #[test]
    fn test_option_type_mismatches() {
        let entity = entity_with(vec![
            column("id", ColumnOptions::new().primary()),
            column("body", ColumnOptions::typed(ColumnType::Text).with_length(10)),
            column("ratio", ColumnOptions::typed(ColumnType::Decimal).with_precision(2, 5)),
            column(
                "status",
                ColumnOptions::typed(ColumnType::Varchar).with_enum(["a", "b"]),
            ),
        ]);

        let kinds: Vec<IssueKind> = validate_entity(&entity).into_iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::LengthNotSupported {
                    column_type: ColumnType::Text
                },
                IssueKind::ScaleExceedsPrecision {
                    precision: 2,
                    scale: 5
                },
                IssueKind::EnumValuesNotSupported,
            ]
        );
    }

    #[test]
    fn test_unknown_index_and_unique_columns() {
        let target = Target::from_index(0);
        let mut entity = entity_with(vec![column("id", ColumnOptions::new().primary())]);
        entity.indices.push(IndexMetadata::new(
            target,
            IndexOptions::on(["missing"]).with_name("idx_missing"),
        ));
        entity
            .uniques
            .push(UniqueMetadata::new(target, UniqueOptions::on(["id", "other"])));

        let issues = validate_entity(&entity);
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].to_string(),
            "missing: index 'idx_missing' references an unknown column"
        );
        assert_eq!(issues[1].property.as_deref(), Some("other"));
    }
}
