//! Inheritance chain resolution.

use crate::metadata::{Target, TypeNode};

/// Ancestor chain of `target`: the target itself first, then each parent in turn,
/// ending with the most distant ancestor.
///
/// A type without a parent, or a target not present in `types`, yields `[target]`.
/// The walk only steps to strictly earlier types, so it always terminates.
pub(crate) fn ancestor_chain(types: &[TypeNode], target: Target) -> Vec<Target> {
    let mut chain = vec![target];
    let mut current = target;

    while let Some(parent) = types
        .get(current.index())
        .and_then(|node| node.parent)
        .filter(|parent| *parent < current)
    {
        chain.push(parent);
        current = parent;
    }

    chain
}
