//! Declaration registry and correlation.
//!
//! Declarations arrive in any order. One correlation pass after registration
//! attaches fragments to entities by inheritance; the registry is then frozen
//! into an [`EntityGraph`].

mod correlate;
mod graph;
mod inheritance;
mod registry;

pub use correlate::CorrelationReport;
pub use graph::EntityGraph;
pub use registry::MetadataRegistry;
