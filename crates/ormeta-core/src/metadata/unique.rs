//! Composite unique constraint metadata.

use super::index::IndexColumns;
use super::target::{Fragment, Target};
use crate::declare::UniqueOptions;
use serde::Serialize;

/// Metadata of a declared composite unique constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueMetadata {
    /// Type the constraint was declared on.
    pub target: Target,
    /// Constraint name.
    pub name: Option<String>,
    /// Columns that must be unique together.
    pub columns: Option<IndexColumns>,
}

impl UniqueMetadata {
    /// Create unique metadata from declaration options.
    pub fn new(target: Target, options: UniqueOptions) -> Self {
        Self {
            target,
            name: options.name,
            columns: options.columns,
        }
    }

    /// Property paths covered by the constraint.
    pub fn property_names(&self) -> Vec<&str> {
        self.columns
            .as_ref()
            .map(IndexColumns::property_names)
            .unwrap_or_default()
    }
}

impl Fragment for UniqueMetadata {
    fn target(&self) -> Target {
        self.target
    }
}
