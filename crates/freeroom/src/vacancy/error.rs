//! Error types for preset management.

use thiserror::Error;

/// Errors reported by user-defined preset operations. None of these mutate
/// the preset list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresetError {
    /// A preset with this name already exists; the save is rejected.
    #[error("A preset named '{name}' already exists")]
    NameCollision { name: String },

    /// No preset with this name is stored.
    #[error("No preset named '{name}'")]
    NotFound { name: String },
}
