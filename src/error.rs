//! Errors raised by the layout engine.
//!
//! Degenerate data (empty sets, zero totals, single items) is never an error; it
//! is absorbed by fallbacks. Only structurally impossible input is rejected.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The parent chain starting at `id` loops back onto itself.
    #[error("hierarchy contains a cycle through node {id:?}")]
    CyclicHierarchy { id: String },
    /// A configuration value makes the layout meaningless.
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
