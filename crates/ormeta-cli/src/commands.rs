//! Subcommand implementations.

use crate::formatter::Formatter;
use ormeta_core::{EntityGraph, ManifestTargets, MetadataRegistry, RegistryConfig, SchemaManifest};
use std::path::Path;
use tracing::info;

/// Errors raised by subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Registry or manifest failure.
    #[error(transparent)]
    Core(#[from] ormeta_core::Error),

    /// Type name not declared in the manifest.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Type name declared but never registered as an entity.
    #[error("type is not an entity: {0}")]
    NotAnEntity(String),
}

/// A correlated manifest.
pub struct Loaded {
    pub graph: EntityGraph,
    pub targets: ManifestTargets,
}

/// Rendered command output.
#[derive(Debug)]
pub struct CommandOutput {
    pub text: String,
    /// False when the command found problems worth a non-zero exit code.
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Read, register and correlate a manifest.
pub fn load(path: &Path, strict: bool) -> Result<Loaded, CommandError> {
    let manifest = SchemaManifest::from_path(path)?;
    let config = RegistryConfig::new().with_reject_duplicate_entities(strict);
    let registry = MetadataRegistry::with_config(config);
    let targets = manifest.register_into(&registry)?;
    let graph = registry.finish();

    info!(
        path = %path.display(),
        types = targets.len(),
        entities = graph.len(),
        "manifest loaded"
    );
    Ok(Loaded { graph, targets })
}

/// Render every entity, or only those of one type.
pub fn show(
    loaded: &Loaded,
    entity: Option<&str>,
    formatter: &dyn Formatter,
) -> Result<CommandOutput, CommandError> {
    let entities: Vec<_> = match entity {
        None => loaded.graph.entities().iter().collect(),
        Some(name) => {
            let target = loaded
                .targets
                .get(name)
                .ok_or_else(|| CommandError::UnknownType(name.to_string()))?;
            let found: Vec<_> = loaded.graph.entities_for(target).collect();
            if found.is_empty() {
                return Err(CommandError::NotAnEntity(name.to_string()));
            }
            found
        }
    };

    Ok(CommandOutput::ok(
        formatter.format_entities(&loaded.graph, &entities),
    ))
}

/// Render the ancestor chain of a type, nearest first.
pub fn chain(
    loaded: &Loaded,
    type_name: &str,
    formatter: &dyn Formatter,
) -> Result<CommandOutput, CommandError> {
    let target = loaded
        .targets
        .get(type_name)
        .ok_or_else(|| CommandError::UnknownType(type_name.to_string()))?;
    let chain = loaded.graph.ancestor_chain(target);
    Ok(CommandOutput::ok(formatter.format_chain(&loaded.graph, &chain)))
}

/// Validate the graph. Fails when any issue is found.
pub fn check(loaded: &Loaded, formatter: &dyn Formatter) -> CommandOutput {
    let issues = loaded.graph.validate();
    info!(issues = issues.len(), "validation finished");
    CommandOutput {
        text: formatter.format_issues(&loaded.graph, &issues),
        success: issues.is_empty(),
    }
}
