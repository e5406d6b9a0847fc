//! Type identities.

use serde::Serialize;
use std::fmt;

/// Identity of a declared type.
///
/// Issued by [`MetadataRegistry::declare_type`](crate::MetadataRegistry::declare_type).
/// Equality is identity: two types declared with the same name get different targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Target(usize);

impl Target {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of an entity descriptor in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(usize);

impl EntityId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// A declared type and its explicit parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeNode {
    /// Identity of this type.
    pub target: Target,
    /// Declared type name (not required to be unique).
    pub name: String,
    /// Parent type, if any.
    pub parent: Option<Target>,
}

/// Implemented by everything that is declared against a target.
pub trait Fragment {
    /// The type this fragment was declared on.
    fn target(&self) -> Target;
}
