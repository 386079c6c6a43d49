//! Live parameter values and validated, write-through setters.
//!
//! The registry owns one value slot per non-sentinel table entry. Setters
//! validate against the descriptor's schema, overwrite the slot, then
//! mirror the new value into the persistent store under the parameter
//! name. The mirror step is best-effort: a failed store write is logged
//! and reported in the `Ok` payload, but the slot keeps the new value.
//! This asymmetry is deliberate; do not turn it into a transaction.

use heapless::{String, Vec};

use super::schema::{ParamDescriptor, ParamSchema};
use super::table::{MAX_PARAMS, PARAM_TABLE};
use super::ParamError;
use crate::storage::{ParamStore, StoreError};
use crate::sys_warn;

/// Stable handle to a table entry. Doubles as the enumeration index
/// (0..count) for external protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamId(u16);

impl ParamId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A live parameter value, one variant per type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    U8(u8),
    U32(u32),
    F32(f32),
    Str20(String<20>),
    Str64(String<64>),
}

impl ParamValue {
    /// Zero value for a schema; `None` for the sentinel.
    fn zeroed(schema: &ParamSchema) -> Option<Self> {
        match schema {
            ParamSchema::None => None,
            ParamSchema::U8 { .. } => Some(ParamValue::U8(0)),
            ParamSchema::U32 { .. } => Some(ParamValue::U32(0)),
            ParamSchema::F32 { .. } => Some(ParamValue::F32(0.0)),
            ParamSchema::Str20 { .. } => Some(ParamValue::Str20(String::new())),
            ParamSchema::Str64 { .. } => Some(ParamValue::Str64(String::new())),
        }
    }

    /// Schema default: declared value for numerics, empty for strings.
    fn default_of(schema: &ParamSchema) -> Option<Self> {
        match *schema {
            ParamSchema::None => None,
            ParamSchema::U8 { default, .. } => Some(ParamValue::U8(default)),
            ParamSchema::U32 { default, .. } => Some(ParamValue::U32(default)),
            ParamSchema::F32 { default, .. } => Some(ParamValue::F32(default)),
            ParamSchema::Str20 { .. } => Some(ParamValue::Str20(String::new())),
            ParamSchema::Str64 { .. } => Some(ParamValue::Str64(String::new())),
        }
    }
}

/// Outcome of the mirror-to-store step of a successful set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persist {
    /// Value written to the persistent store
    Stored,
    /// No store attached (degraded mode); memory-only update
    NoStore,
    /// Store write failed; the in-memory slot still holds the new value
    Failed(StoreError),
}

/// The parameter registry. One instance per process, constructed before
/// bootstrap and alive for the process lifetime.
pub struct ParamRegistry<S: ParamStore> {
    slots: Vec<ParamValue, MAX_PARAMS>,
    store: Option<S>,
}

impl<S: ParamStore> ParamRegistry<S> {
    /// Create a registry with zeroed slots and no store attached.
    ///
    /// Callers run [`crate::bootstrap::run`] next, which loads defaults
    /// and attaches the store.
    pub fn new() -> Self {
        let mut slots = Vec::new();
        for d in PARAM_TABLE.iter() {
            match ParamValue::zeroed(&d.schema) {
                Some(v) => {
                    // table length is bounded by MAX_PARAMS (checked in tests)
                    if slots.push(v).is_err() {
                        break;
                    }
                }
                None => break,
            }
        }
        Self { slots, store: None }
    }

    /// Number of parameters (sentinel excluded).
    pub fn count(&self) -> u16 {
        self.slots.len() as u16
    }

    /// Attach an opened persistent store. Every accepted write from here
    /// on is mirrored into it.
    pub fn attach_store(&mut self, store: S) {
        self.store = Some(store);
    }

    /// Whether a persistent store is attached.
    pub fn store_attached(&self) -> bool {
        self.store.is_some()
    }

    /// Linear scan for an exact, case-sensitive name match.
    ///
    /// Stops at the sentinel without matching it, so the empty name never
    /// resolves.
    pub fn find_by_name(&self, name: &str) -> Option<ParamId> {
        for (i, d) in PARAM_TABLE.iter().enumerate() {
            if d.is_sentinel() {
                break;
            }
            if d.name == name {
                return Some(ParamId(i as u16));
            }
        }
        None
    }

    /// The i-th descriptor, if `i` addresses a non-sentinel entry.
    pub fn find_by_index(&self, index: u16) -> Option<ParamId> {
        if (index as usize) < self.slots.len() {
            Some(ParamId(index))
        } else {
            None
        }
    }

    /// Descriptor behind a handle.
    pub fn descriptor(&self, id: ParamId) -> &'static ParamDescriptor {
        &PARAM_TABLE[id.index()]
    }

    /// Read the live slot. No validation on read: the slot always holds a
    /// previously validated (or trusted default/persisted) value.
    pub fn get(&self, id: ParamId) -> &ParamValue {
        &self.slots[id.index()]
    }

    /// Read as u8; `TypeMismatch` for any other tag.
    pub fn get_u8(&self, id: ParamId) -> Result<u8, ParamError> {
        match self.slots[id.index()] {
            ParamValue::U8(v) => Ok(v),
            _ => Err(ParamError::TypeMismatch),
        }
    }

    /// Read as u32; `TypeMismatch` for any other tag.
    pub fn get_u32(&self, id: ParamId) -> Result<u32, ParamError> {
        match self.slots[id.index()] {
            ParamValue::U32(v) => Ok(v),
            _ => Err(ParamError::TypeMismatch),
        }
    }

    /// Read as f32; `TypeMismatch` for any other tag.
    pub fn get_f32(&self, id: ParamId) -> Result<f32, ParamError> {
        match self.slots[id.index()] {
            ParamValue::F32(v) => Ok(v),
            _ => Err(ParamError::TypeMismatch),
        }
    }

    /// Read as string slice; `TypeMismatch` for numeric tags.
    pub fn get_str(&self, id: ParamId) -> Result<&str, ParamError> {
        match &self.slots[id.index()] {
            ParamValue::Str20(s) => Ok(s.as_str()),
            ParamValue::Str64(s) => Ok(s.as_str()),
            _ => Err(ParamError::TypeMismatch),
        }
    }

    /// Set a u8 parameter. Bounds-checked, then mirrored to the store.
    pub fn set_u8(&mut self, id: ParamId, value: u8) -> Result<Persist, ParamError> {
        let d = self.descriptor(id);
        let ParamSchema::U8 { bounds, .. } = d.schema else {
            return Err(ParamError::TypeMismatch);
        };
        if let Some((min, max)) = bounds {
            if value < min || value > max {
                return Err(ParamError::OutOfRange);
            }
        }
        self.slots[id.index()] = ParamValue::U8(value);
        Ok(self.mirror(d.name, |s| s.set_u8(d.name, value)))
    }

    /// Set a u32 parameter. Bounds-checked, then mirrored to the store.
    pub fn set_u32(&mut self, id: ParamId, value: u32) -> Result<Persist, ParamError> {
        let d = self.descriptor(id);
        let ParamSchema::U32 { bounds, .. } = d.schema else {
            return Err(ParamError::TypeMismatch);
        };
        if let Some((min, max)) = bounds {
            if value < min || value > max {
                return Err(ParamError::OutOfRange);
            }
        }
        self.slots[id.index()] = ParamValue::U32(value);
        Ok(self.mirror(d.name, |s| s.set_u32(d.name, value)))
    }

    /// Set an f32 parameter.
    ///
    /// Persisted as the raw bit pattern through the store's u32 setter, so
    /// an integer/string-only store holds it losslessly.
    pub fn set_f32(&mut self, id: ParamId, value: f32) -> Result<Persist, ParamError> {
        let d = self.descriptor(id);
        let ParamSchema::F32 { bounds, .. } = d.schema else {
            return Err(ParamError::TypeMismatch);
        };
        if let Some((min, max)) = bounds {
            // negated so NaN fails the check instead of slipping past it
            if !(value >= min && value <= max) {
                return Err(ParamError::OutOfRange);
            }
        }
        self.slots[id.index()] = ParamValue::F32(value);
        Ok(self.mirror(d.name, |s| s.set_u32(d.name, value.to_bits())))
    }

    /// Set a string parameter.
    ///
    /// The minimum-length check runs against the original input; input
    /// longer than the slot capacity is then silently truncated at a
    /// UTF-8 boundary. The truncated value is what gets mirrored, keeping
    /// slot and store identical.
    pub fn set_str(&mut self, id: ParamId, value: &str) -> Result<Persist, ParamError> {
        let d = self.descriptor(id);
        let (capacity, min_len) = match d.schema {
            ParamSchema::Str20 { min_len } => (20, min_len),
            ParamSchema::Str64 { min_len } => (64, min_len),
            _ => return Err(ParamError::TypeMismatch),
        };
        if value.len() < min_len {
            return Err(ParamError::TooShort);
        }
        let truncated = truncate_utf8(value, capacity);
        match &mut self.slots[id.index()] {
            ParamValue::Str20(s) => {
                s.clear();
                let _ = s.push_str(truncated);
            }
            ParamValue::Str64(s) => {
                s.clear();
                let _ = s.push_str(truncated);
            }
            _ => return Err(ParamError::TypeMismatch),
        }
        Ok(self.mirror(d.name, |s| s.set_str(d.name, truncated)))
    }

    /// Look up by name, then set as u8.
    pub fn set_by_name_u8(&mut self, name: &str, value: u8) -> Result<Persist, ParamError> {
        let id = self.find_by_name(name).ok_or(ParamError::NotFound)?;
        self.set_u8(id, value)
    }

    /// Look up by name, then set as string.
    pub fn set_by_name_str(&mut self, name: &str, value: &str) -> Result<Persist, ParamError> {
        let id = self.find_by_name(name).ok_or(ParamError::NotFound)?;
        self.set_str(id, value)
    }

    /// True iff the minimum identification info for broadcast is present:
    /// non-empty UAS_ID, nonzero ID_TYPE, nonzero UA_TYPE.
    pub fn have_basic_id_info(&self) -> bool {
        let uas_id = self
            .find_by_name("UAS_ID")
            .and_then(|id| self.get_str(id).ok())
            .unwrap_or("");
        let id_type = self
            .find_by_name("ID_TYPE")
            .and_then(|id| self.get_u8(id).ok())
            .unwrap_or(0);
        let ua_type = self
            .find_by_name("UA_TYPE")
            .and_then(|id| self.get_u8(id).ok())
            .unwrap_or(0);
        !uas_id.is_empty() && id_type > 0 && ua_type > 0
    }

    /// Copy schema defaults into every slot. Strings become empty.
    ///
    /// No validation (defaults are trusted), no persistence. Idempotent.
    pub fn load_defaults(&mut self) {
        for (i, d) in PARAM_TABLE.iter().enumerate() {
            match ParamValue::default_of(&d.schema) {
                Some(v) => self.slots[i] = v,
                None => break,
            }
        }
    }

    /// Overlay every slot with its persisted value, where one exists.
    ///
    /// Missing keys leave the default in place; read errors are treated
    /// as missing keys. No re-validation: the store only ever receives
    /// validated values.
    pub fn pull_overrides(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        for (i, d) in PARAM_TABLE.iter().enumerate() {
            match d.schema {
                ParamSchema::None => break,
                ParamSchema::U8 { .. } => {
                    if let Ok(Some(v)) = store.get_u8(d.name) {
                        self.slots[i] = ParamValue::U8(v);
                    }
                }
                ParamSchema::U32 { .. } => {
                    if let Ok(Some(v)) = store.get_u32(d.name) {
                        self.slots[i] = ParamValue::U32(v);
                    }
                }
                ParamSchema::F32 { .. } => {
                    // stored as the raw bit pattern
                    if let Ok(Some(bits)) = store.get_u32(d.name) {
                        self.slots[i] = ParamValue::F32(f32::from_bits(bits));
                    }
                }
                ParamSchema::Str20 { .. } => {
                    let mut buf = [0u8; 21];
                    if let Ok(Some(s)) = store.get_str(d.name, &mut buf) {
                        let mut v: String<20> = String::new();
                        let _ = v.push_str(truncate_utf8(s, 20));
                        self.slots[i] = ParamValue::Str20(v);
                    }
                }
                ParamSchema::Str64 { .. } => {
                    let mut buf = [0u8; 65];
                    if let Ok(Some(s)) = store.get_str(d.name, &mut buf) {
                        let mut v: String<64> = String::new();
                        let _ = v.push_str(truncate_utf8(s, 64));
                        self.slots[i] = ParamValue::Str64(v);
                    }
                }
            }
        }
    }

    /// Re-mirror every live slot into the store.
    ///
    /// Unlike the per-set mirror this is all-or-error: the console `save`
    /// command wants a definite answer.
    pub fn persist_all(&mut self) -> Result<(), ParamError> {
        let Some(store) = self.store.as_mut() else {
            return Err(ParamError::StoreUnavailable);
        };
        for (i, d) in PARAM_TABLE.iter().enumerate() {
            if d.is_sentinel() {
                break;
            }
            match &self.slots[i] {
                ParamValue::U8(v) => store.set_u8(d.name, *v)?,
                ParamValue::U32(v) => store.set_u32(d.name, *v)?,
                ParamValue::F32(v) => store.set_u32(d.name, v.to_bits())?,
                ParamValue::Str20(s) => store.set_str(d.name, s.as_str())?,
                ParamValue::Str64(s) => store.set_str(d.name, s.as_str())?,
            }
        }
        Ok(())
    }

    /// Raw slot overwrite for bootstrap-derived values: no validation, no
    /// persistence. Not part of the public surface.
    pub(crate) fn overlay_str(&mut self, id: ParamId, value: &str) {
        match &mut self.slots[id.index()] {
            ParamValue::Str20(s) => {
                s.clear();
                let _ = s.push_str(truncate_utf8(value, 20));
            }
            ParamValue::Str64(s) => {
                s.clear();
                let _ = s.push_str(truncate_utf8(value, 64));
            }
            _ => {}
        }
    }

    /// Mirror one accepted write into the store, best-effort.
    fn mirror<F>(&mut self, name: &str, write: F) -> Persist
    where
        F: FnOnce(&mut S) -> Result<(), StoreError>,
    {
        match self.store.as_mut() {
            None => Persist::NoStore,
            Some(store) => match write(store) {
                Ok(()) => Persist::Stored,
                Err(e) => {
                    sys_warn!("param {}: store write failed ({:?})", name, e);
                    Persist::Failed(e)
                }
            },
        }
    }
}

impl<S: ParamStore> Default for ParamRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest prefix of `s` that fits `capacity` bytes without splitting a
/// UTF-8 sequence.
fn truncate_utf8(s: &str, capacity: usize) -> &str {
    if s.len() <= capacity {
        return s;
    }
    let mut end = capacity;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_utf8_ascii() {
        assert_eq!(truncate_utf8("hello", 20), "hello");
        assert_eq!(truncate_utf8("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_utf8_respects_char_boundary() {
        // 'é' is two bytes; cutting at 5 would split it
        let s = "abcdé";
        assert_eq!(truncate_utf8(s, 5), "abcd");
        assert_eq!(truncate_utf8(s, 6), "abcdé");
    }

    #[test]
    fn test_zeroed_and_default_for_sentinel() {
        assert!(ParamValue::zeroed(&ParamSchema::None).is_none());
        assert!(ParamValue::default_of(&ParamSchema::None).is_none());
    }
}
