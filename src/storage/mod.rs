//! Persistent key-value storage behind the registry.
//!
//! The registry only sees [`ParamStore`]. On target hardware the backend
//! is ESP-IDF NVS ([`nvs::NvsParamStore`]); host builds and tests use the
//! in-memory [`mock::MockStore`] with injectable failures.

pub mod mock;
#[cfg(target_os = "espidf")]
pub mod nvs;

pub use mock::{MockState, MockStore};
#[cfg(target_os = "espidf")]
pub use nvs::NvsParamStore;

/// Backend-level failure. Carried by `Persist::Failed` and mapped to
/// `ParamError::StoreUnavailable` at the registry surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Partition init or namespace open failed
    OpenFailed,
    /// Read returned an error (not "key absent")
    ReadFailed,
    /// Write returned an error
    WriteFailed,
}

/// Namespaced key-value store for parameter mirroring.
///
/// `Ok(None)` from a getter means "key absent", which callers treat as
/// "keep the default". Strings are read through a caller-provided buffer
/// sized for the slot capacity plus NUL.
pub trait ParamStore {
    fn get_u8(&mut self, key: &str) -> Result<Option<u8>, StoreError>;
    fn get_u32(&mut self, key: &str) -> Result<Option<u32>, StoreError>;
    fn get_str<'a>(&mut self, key: &str, buf: &'a mut [u8]) -> Result<Option<&'a str>, StoreError>;
    fn set_u8(&mut self, key: &str, value: u8) -> Result<(), StoreError>;
    fn set_u32(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
    fn set_str(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
