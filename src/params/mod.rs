//! Typed, table-driven parameter registry.
//!
//! Three pieces:
//! - [`schema`]: descriptor types. Each parameter declares its type tag,
//!   default, bounds (numerics) or minimum length (strings), and flags.
//! - [`table`]: the static schema table, terminated by a sentinel entry.
//! - [`registry`]: the live values plus the validated setters that mirror
//!   every accepted write into the persistent store.
//!
//! Slots are owned by [`ParamRegistry`]; nothing else mutates them after
//! bootstrap.

pub mod registry;
pub mod schema;
pub mod table;

pub use registry::{ParamId, ParamRegistry, ParamValue, Persist};
pub use schema::{ParamDescriptor, ParamFlags, ParamSchema, ParamType};
pub use table::{MAX_PARAMS, PARAM_TABLE};

use crate::storage::StoreError;

/// Registry error taxonomy. All recoverable; nothing here unwinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// Name or index did not resolve to a parameter
    NotFound,
    /// Value type does not match the descriptor's type tag
    TypeMismatch,
    /// Numeric value outside the declared [min, max]
    OutOfRange,
    /// String shorter than the declared minimum length
    TooShort,
    /// Persistent store missing or failing
    StoreUnavailable,
}

impl From<StoreError> for ParamError {
    fn from(_: StoreError) -> Self {
        ParamError::StoreUnavailable
    }
}
