//! Registry configuration.

/// Default separator used when flattening a property path into an alias.
pub const DEFAULT_ALIAS_SEPARATOR: &str = "_";

/// Default separator placed between embedded prefixes in a database name.
pub const DEFAULT_PREFIX_SEPARATOR: &str = "_";

/// Configuration for a [`MetadataRegistry`](crate::MetadataRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Reject a second entity registration for the same target.
    ///
    /// Off by default: registering a target twice yields two independent
    /// entity descriptors.
    pub reject_duplicate_entities: bool,

    /// Replaces `.` in a property path to form the property alias name.
    pub alias_separator: String,

    /// Joins embedded prefixes and the column name into the database name.
    pub prefix_separator: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            reject_duplicate_entities: false,
            alias_separator: DEFAULT_ALIAS_SEPARATOR.to_string(),
            prefix_separator: DEFAULT_PREFIX_SEPARATOR.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration that rejects duplicate entity registrations.
    pub fn strict() -> Self {
        Self {
            reject_duplicate_entities: true,
            ..Default::default()
        }
    }

    /// Set whether duplicate entity registrations are rejected.
    pub fn with_reject_duplicate_entities(mut self, reject: bool) -> Self {
        self.reject_duplicate_entities = reject;
        self
    }

    /// Set the property alias separator.
    pub fn with_alias_separator(mut self, separator: impl Into<String>) -> Self {
        self.alias_separator = separator.into();
        self
    }

    /// Set the embedded prefix separator.
    pub fn with_prefix_separator(mut self, separator: impl Into<String>) -> Self {
        self.prefix_separator = separator.into();
        self
    }
}
