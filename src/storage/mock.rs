//! In-memory parameter store for host builds and tests.
//!
//! State lives in a caller-owned `RefCell` so tests can seed keys before
//! boot and inspect what the registry mirrored afterwards, while the
//! registry owns the [`MockStore`] handle. Read/write failure injection
//! exercises the degraded paths.

use core::cell::RefCell;

use heapless::{String, Vec};

use super::{ParamStore, StoreError};

const MAX_ENTRIES: usize = 32;

/// One stored value.
#[derive(Debug, Clone, PartialEq)]
pub enum MockEntry {
    U8(u8),
    U32(u32),
    Str(String<64>),
}

/// Backing state, shared between the test and the store handle.
#[derive(Default)]
pub struct MockState {
    entries: Vec<(String<20>, MockEntry), MAX_ENTRIES>,
    /// Every setter fails with `WriteFailed` while true
    pub fail_writes: bool,
    /// Every getter fails with `ReadFailed` while true
    pub fail_reads: bool,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, key: &str, entry: MockEntry) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == key) {
            slot.1 = entry;
            return;
        }
        let mut k: String<20> = String::new();
        let _ = k.push_str(key);
        let _ = self.entries.push((k, entry));
    }

    fn get(&self, key: &str) -> Option<&MockEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // Seeding helpers: simulate values persisted by a previous run.

    pub fn seed_u8(&mut self, key: &str, value: u8) {
        self.put(key, MockEntry::U8(value));
    }

    pub fn seed_u32(&mut self, key: &str, value: u32) {
        self.put(key, MockEntry::U32(value));
    }

    pub fn seed_str(&mut self, key: &str, value: &str) {
        let mut s: String<64> = String::new();
        let _ = s.push_str(value);
        self.put(key, MockEntry::Str(s));
    }

    // Inspection helpers: what did the registry mirror?

    pub fn raw_u8(&self, key: &str) -> Option<u8> {
        match self.get(key) {
            Some(MockEntry::U8(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn raw_u32(&self, key: &str) -> Option<u32> {
        match self.get(key) {
            Some(MockEntry::U32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn raw_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(MockEntry::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Store handle the registry owns; all state lives in the shared cell.
pub struct MockStore<'a> {
    state: &'a RefCell<MockState>,
}

impl<'a> MockStore<'a> {
    pub fn new(state: &'a RefCell<MockState>) -> Self {
        Self { state }
    }
}

impl ParamStore for MockStore<'_> {
    fn get_u8(&mut self, key: &str) -> Result<Option<u8>, StoreError> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(StoreError::ReadFailed);
        }
        Ok(state.raw_u8(key))
    }

    fn get_u32(&mut self, key: &str) -> Result<Option<u32>, StoreError> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(StoreError::ReadFailed);
        }
        Ok(state.raw_u32(key))
    }

    fn get_str<'b>(&mut self, key: &str, buf: &'b mut [u8]) -> Result<Option<&'b str>, StoreError> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(StoreError::ReadFailed);
        }
        let Some(s) = state.raw_str(key) else {
            return Ok(None);
        };
        let n = s.len().min(buf.len());
        buf[..n].copy_from_slice(&s.as_bytes()[..n]);
        Ok(core::str::from_utf8(&buf[..n]).ok())
    }

    fn set_u8(&mut self, key: &str, value: u8) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StoreError::WriteFailed);
        }
        state.put(key, MockEntry::U8(value));
        Ok(())
    }

    fn set_u32(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StoreError::WriteFailed);
        }
        state.put(key, MockEntry::U32(value));
        Ok(())
    }

    fn set_str(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StoreError::WriteFailed);
        }
        let mut s: String<64> = String::new();
        let _ = s.push_str(value);
        state.put(key, MockEntry::Str(s));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_absent() {
        let state = RefCell::new(MockState::new());
        let mut store = MockStore::new(&state);

        assert_eq!(store.get_u8("A"), Ok(None));
        store.set_u8("A", 7).unwrap();
        assert_eq!(store.get_u8("A"), Ok(Some(7)));

        store.set_str("S", "hello").unwrap();
        let mut buf = [0u8; 21];
        assert_eq!(store.get_str("S", &mut buf), Ok(Some("hello")));
    }

    #[test]
    fn test_failure_injection() {
        let state = RefCell::new(MockState::new());
        let mut store = MockStore::new(&state);

        state.borrow_mut().fail_writes = true;
        assert_eq!(store.set_u32("B", 1), Err(StoreError::WriteFailed));
        state.borrow_mut().fail_writes = false;
        store.set_u32("B", 1).unwrap();

        state.borrow_mut().fail_reads = true;
        assert_eq!(store.get_u32("B"), Err(StoreError::ReadFailed));
    }

    #[test]
    fn test_overwrite_replaces_entry() {
        let state = RefCell::new(MockState::new());
        let mut store = MockStore::new(&state);

        store.set_u8("A", 1).unwrap();
        store.set_u8("A", 2).unwrap();
        assert_eq!(state.borrow().raw_u8("A"), Some(2));
    }
}
