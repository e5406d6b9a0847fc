//! Output formatters for correlated metadata.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use ormeta_core::{
    ColumnMetadata, EntityGraph, EntityMetadata, IndexColumns, SortOrder, Target,
    ValidationIssue,
};
use serde_json::{json, Value};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format entities with their correlated fragments.
    fn format_entities(&self, graph: &EntityGraph, entities: &[&EntityMetadata]) -> String;

    /// Format an ancestor chain.
    fn format_chain(&self, graph: &EntityGraph, chain: &[Target]) -> String;

    /// Format validation issues.
    fn format_issues(&self, graph: &EntityGraph, issues: &[ValidationIssue]) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

fn type_name(graph: &EntityGraph, target: Target) -> String {
    graph
        .type_name(target)
        .map(str::to_string)
        .unwrap_or_else(|| target.to_string())
}

fn describe_columns(columns: Option<&IndexColumns>) -> String {
    match columns {
        None => String::new(),
        Some(IndexColumns::Properties(names)) => names.join(", "),
        Some(IndexColumns::Ordered(columns)) => columns
            .iter()
            .map(|c| match c.order {
                SortOrder::Asc => format!("{} asc", c.property),
                SortOrder::Desc => format!("{} desc", c.property),
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn column_flags(column: &ColumnMetadata) -> String {
    let mut flags = Vec::new();
    if column.is_primary {
        flags.push("primary");
    }
    if column.is_nullable {
        flags.push("nullable");
    }
    if column.is_unique {
        flags.push("unique");
    }
    if column.is_readonly {
        flags.push("readonly");
    }
    if column.unsigned {
        flags.push("unsigned");
    }
    flags.join(" ")
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl TableFormatter {
    fn entity_table(&self, graph: &EntityGraph, entity: &EntityMetadata) -> String {
        let mut output = format!("{} ({})\n", type_name(graph, entity.target), entity.id);

        let mut columns = Table::new();
        columns.set_header(vec![
            "Property Path",
            "Database Name",
            "Type",
            "Flags",
            "Declared On",
        ]);
        for column in &entity.columns {
            columns.add_row(vec![
                Cell::new(&column.property_path),
                Cell::new(&column.database_name),
                Cell::new(
                    column
                        .column_type
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                ),
                Cell::new(column_flags(column)),
                Cell::new(type_name(graph, column.target)),
            ]);
        }
        output.push_str(&columns.to_string());

        if !entity.indices.is_empty() || !entity.uniques.is_empty() {
            let mut keys = Table::new();
            keys.set_header(vec!["Kind", "Name", "Columns", "Declared On"]);
            for index in &entity.indices {
                let kind = if index.is_unique { "unique index" } else { "index" };
                keys.add_row(vec![
                    Cell::new(kind),
                    Cell::new(index.name.as_deref().unwrap_or("")),
                    Cell::new(describe_columns(index.columns.as_ref())),
                    Cell::new(type_name(graph, index.target)),
                ]);
            }
            for unique in &entity.uniques {
                keys.add_row(vec![
                    Cell::new("unique"),
                    Cell::new(unique.name.as_deref().unwrap_or("")),
                    Cell::new(describe_columns(unique.columns.as_ref())),
                    Cell::new(type_name(graph, unique.target)),
                ]);
            }
            output.push('\n');
            output.push_str(&keys.to_string());
        }

        output
    }
}

impl Formatter for TableFormatter {
    fn format_entities(&self, graph: &EntityGraph, entities: &[&EntityMetadata]) -> String {
        if entities.is_empty() {
            return "No entities".to_string();
        }
        entities
            .iter()
            .map(|entity| self.entity_table(graph, entity))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_chain(&self, graph: &EntityGraph, chain: &[Target]) -> String {
        chain
            .iter()
            .map(|target| type_name(graph, *target))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    fn format_issues(&self, graph: &EntityGraph, issues: &[ValidationIssue]) -> String {
        if issues.is_empty() {
            return "No issues found".to_string();
        }

        let mut table = Table::new();
        table.set_header(vec!["Entity", "Property", "Issue"]);
        for issue in issues {
            table.add_row(vec![
                Cell::new(type_name(graph, issue.target)),
                Cell::new(issue.property.as_deref().unwrap_or("")),
                Cell::new(issue.kind.to_string()),
            ]);
        }
        table.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

fn column_to_json(graph: &EntityGraph, column: &ColumnMetadata) -> Value {
    let mut value = serde_json::to_value(column).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert("target".into(), json!(type_name(graph, column.target)));
    }
    value
}

fn entity_to_json(graph: &EntityGraph, entity: &EntityMetadata) -> Value {
    json!({
        "id": entity.id,
        "name": type_name(graph, entity.target),
        "columns": entity
            .columns
            .iter()
            .map(|c| column_to_json(graph, c))
            .collect::<Vec<_>>(),
        "indices": entity.indices,
        "uniques": entity.uniques,
    })
}

impl Formatter for JsonFormatter {
    fn format_entities(&self, graph: &EntityGraph, entities: &[&EntityMetadata]) -> String {
        let values: Vec<Value> = entities.iter().map(|e| entity_to_json(graph, e)).collect();
        serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_chain(&self, graph: &EntityGraph, chain: &[Target]) -> String {
        let names: Vec<String> = chain.iter().map(|t| type_name(graph, *t)).collect();
        serde_json::to_string_pretty(&names).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_issues(&self, graph: &EntityGraph, issues: &[ValidationIssue]) -> String {
        let values: Vec<Value> = issues
            .iter()
            .map(|issue| {
                json!({
                    "entity": type_name(graph, issue.target),
                    "property": issue.property,
                    "issue": issue.kind.to_string(),
                    "details": issue.kind,
                })
            })
            .collect();
        serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
    }
}
