//! Registry lookup, validation and write-through tests

use core::cell::RefCell;

use rust_remote_id_beacon::storage::{MockState, MockStore};
use rust_remote_id_beacon::{
    ParamError, ParamRegistry, Persist, StoreError, PARAM_TABLE,
};

fn registry_with_store(state: &RefCell<MockState>) -> ParamRegistry<MockStore<'_>> {
    let mut registry = ParamRegistry::new();
    registry.load_defaults();
    registry.attach_store(MockStore::new(state));
    registry
}

fn registry_without_store() -> ParamRegistry<MockStore<'static>> {
    let mut registry = ParamRegistry::new();
    registry.load_defaults();
    registry
}

#[test]
fn test_find_by_name_resolves_every_descriptor() {
    let registry = registry_without_store();

    for d in PARAM_TABLE.iter().filter(|d| !d.is_sentinel()) {
        let id = registry
            .find_by_name(d.name)
            .unwrap_or_else(|| panic!("{} did not resolve", d.name));
        assert_eq!(registry.descriptor(id).name, d.name);
    }
}

#[test]
fn test_find_by_name_misses() {
    let registry = registry_without_store();

    assert!(registry.find_by_name("NO_SUCH_PARAM").is_none());
    // case-sensitive, exact match only
    assert!(registry.find_by_name("baudrate").is_none());
    assert!(registry.find_by_name("BAUDRATE ").is_none());
    // the sentinel's empty name never matches
    assert!(registry.find_by_name("").is_none());
}

#[test]
fn test_find_by_index_covers_table_and_stops_before_sentinel() {
    let registry = registry_without_store();
    let count = registry.count();

    assert_eq!(count as usize, PARAM_TABLE.len() - 1);
    for i in 0..count {
        let id = registry.find_by_index(i).expect("index in range");
        assert_eq!(registry.descriptor(id).name, PARAM_TABLE[i as usize].name);
    }
    assert!(registry.find_by_index(count).is_none());
    assert!(registry.find_by_index(count + 100).is_none());
}

#[test]
fn test_numeric_round_trip() {
    let state = RefCell::new(MockState::new());
    let mut registry = registry_with_store(&state);

    let node = registry.find_by_name("CAN_NODE").unwrap();
    assert_eq!(registry.set_u8(node, 101), Ok(Persist::Stored));
    assert_eq!(registry.get_u8(node), Ok(101));

    let baud = registry.find_by_name("BAUDRATE").unwrap();
    assert_eq!(registry.set_u32(baud, 115200), Ok(Persist::Stored));
    assert_eq!(registry.get_u32(baud), Ok(115200));
}

#[test]
fn test_f32_round_trip_is_bit_exact() {
    let state = RefCell::new(MockState::new());
    let mut registry = registry_with_store(&state);

    let rate = registry.find_by_name("WIFI_NAN_RATE").unwrap();
    let value = 3.141_592_5_f32;
    assert_eq!(registry.set_f32(rate, value), Ok(Persist::Stored));
    assert_eq!(registry.get_f32(rate).unwrap().to_bits(), value.to_bits());

    // mirrored as the raw bit pattern
    assert_eq!(state.borrow().raw_u32("WIFI_NAN_RATE"), Some(value.to_bits()));
}

#[test]
fn test_bounds_rejection_leaves_slot_unchanged() {
    let state = RefCell::new(MockState::new());
    let mut registry = registry_with_store(&state);

    let lock = registry.find_by_name("LOCK_LEVEL").unwrap();
    assert_eq!(registry.set_u8(lock, 1), Ok(Persist::Stored));
    // max is 2
    assert_eq!(registry.set_u8(lock, 3), Err(ParamError::OutOfRange));
    assert_eq!(registry.get_u8(lock), Ok(1));

    let baud = registry.find_by_name("BAUDRATE").unwrap();
    assert_eq!(registry.set_u32(baud, 9599), Err(ParamError::OutOfRange));
    assert_eq!(registry.set_u32(baud, 921601), Err(ParamError::OutOfRange));
    assert_eq!(registry.get_u32(baud), Ok(57600));

    // rejected writes never reach the store
    assert!(!state.borrow().contains("BAUDRATE"));
}

#[test]
fn test_f32_bounds_including_negative_min() {
    let mut registry = registry_without_store();

    let power = registry.find_by_name("BT4_POWER").unwrap();
    assert!(registry.set_f32(power, -27.0).is_ok());
    assert!(registry.set_f32(power, 18.0).is_ok());
    assert_eq!(registry.set_f32(power, -27.5), Err(ParamError::OutOfRange));
    assert_eq!(registry.set_f32(power, 18.5), Err(ParamError::OutOfRange));
    assert_eq!(registry.get_f32(power), Ok(18.0));
}

#[test]
fn test_f32_nan_rejected_by_bounds() {
    let state = RefCell::new(MockState::new());
    let mut registry = registry_with_store(&state);

    let power = registry.find_by_name("WIFI_POWER").unwrap();
    assert_eq!(registry.set_f32(power, f32::NAN), Err(ParamError::OutOfRange));
    // slot keeps its default, nothing reaches the store
    assert_eq!(registry.get_f32(power), Ok(20.0));
    assert!(!state.borrow().contains("WIFI_POWER"));
}

#[test]
fn test_unbounded_u8_accepts_full_range() {
    let mut registry = registry_without_store();

    let done = registry.find_by_name("DONE_INIT").unwrap();
    assert!(registry.set_u8(done, 0).is_ok());
    assert!(registry.set_u8(done, 255).is_ok());
}

#[test]
fn test_type_mismatch_rejected() {
    let mut registry = registry_without_store();

    let baud = registry.find_by_name("BAUDRATE").unwrap();
    assert_eq!(registry.set_u8(baud, 1), Err(ParamError::TypeMismatch));
    assert_eq!(registry.set_str(baud, "x"), Err(ParamError::TypeMismatch));
    assert_eq!(registry.get_str(baud), Err(ParamError::TypeMismatch));

    let uas = registry.find_by_name("UAS_ID").unwrap();
    assert_eq!(registry.set_u32(uas, 1), Err(ParamError::TypeMismatch));
    assert_eq!(registry.get_u32(uas), Err(ParamError::TypeMismatch));
}

#[test]
fn test_string_min_len_checked_before_truncation() {
    let state = RefCell::new(MockState::new());
    let mut registry = registry_with_store(&state);

    let password = registry.find_by_name("WIFI_PASSWORD").unwrap();
    assert_eq!(
        registry.set_str(password, "short"),
        Err(ParamError::TooShort)
    );
    assert_eq!(registry.get_str(password), Ok(""));

    // 24 chars: longer than the 20-byte capacity, but min_len (8) is
    // checked against the original input, so it succeeds truncated
    assert_eq!(
        registry.set_str(password, "abcdefghijklmnopqrstuvwx"),
        Ok(Persist::Stored)
    );
    assert_eq!(registry.get_str(password), Ok("abcdefghijklmnopqrst"));

    // the truncated value is what was mirrored
    assert_eq!(
        state.borrow().raw_str("WIFI_PASSWORD"),
        Some("abcdefghijklmnopqrst")
    );
}

#[test]
fn test_str64_truncates_at_capacity() {
    let mut registry = registry_without_store();

    let key = registry.find_by_name("PUBLIC_KEY1").unwrap();
    let long = "k".repeat(80);
    assert!(registry.set_str(key, &long).is_ok());
    assert_eq!(registry.get_str(key).unwrap().len(), 64);
}

#[test]
fn test_set_by_name() {
    let mut registry = registry_without_store();

    assert!(registry.set_by_name_u8("ID_TYPE", 2).is_ok());
    assert!(registry.set_by_name_str("UAS_ID", "SN12345").is_ok());
    assert_eq!(
        registry.set_by_name_u8("NOPE", 1),
        Err(ParamError::NotFound)
    );
    assert_eq!(
        registry.set_by_name_str("NOPE", "x"),
        Err(ParamError::NotFound)
    );
}

#[test]
fn test_writes_mirrored_to_store() {
    let state = RefCell::new(MockState::new());
    let mut registry = registry_with_store(&state);

    registry.set_by_name_u8("UA_TYPE", 3).unwrap();
    registry.set_by_name_str("UAS_ID", "SN-0042").unwrap();

    assert_eq!(state.borrow().raw_u8("UA_TYPE"), Some(3));
    assert_eq!(state.borrow().raw_str("UAS_ID"), Some("SN-0042"));
}

#[test]
fn test_write_failure_keeps_memory_update() {
    let state = RefCell::new(MockState::new());
    let mut registry = registry_with_store(&state);

    state.borrow_mut().fail_writes = true;
    let node = registry.find_by_name("CAN_NODE").unwrap();
    assert_eq!(
        registry.set_u8(node, 42),
        Ok(Persist::Failed(StoreError::WriteFailed))
    );
    // slot updated, store not
    assert_eq!(registry.get_u8(node), Ok(42));
    assert!(!state.borrow().contains("CAN_NODE"));
}

#[test]
fn test_no_store_setters_update_memory() {
    let mut registry = registry_without_store();

    let node = registry.find_by_name("CAN_NODE").unwrap();
    assert_eq!(registry.set_u8(node, 9), Ok(Persist::NoStore));
    assert_eq!(registry.get_u8(node), Ok(9));
}

#[test]
fn test_persist_all() {
    let state = RefCell::new(MockState::new());
    let mut registry = registry_with_store(&state);

    registry.persist_all().unwrap();
    assert_eq!(state.borrow().raw_u32("BAUDRATE"), Some(57600));
    assert_eq!(state.borrow().raw_u32("WIFI_POWER"), Some(20.0f32.to_bits()));
    assert_eq!(state.borrow().raw_str("UAS_ID"), Some(""));

    state.borrow_mut().fail_writes = true;
    assert_eq!(registry.persist_all(), Err(ParamError::StoreUnavailable));

    let mut detached: ParamRegistry<MockStore> = ParamRegistry::new();
    detached.load_defaults();
    assert_eq!(detached.persist_all(), Err(ParamError::StoreUnavailable));
}

#[test]
fn test_have_basic_id_info() {
    let mut registry = registry_without_store();

    assert!(!registry.have_basic_id_info());
    registry.set_by_name_str("UAS_ID", "SN-1").unwrap();
    assert!(!registry.have_basic_id_info());
    registry.set_by_name_u8("ID_TYPE", 1).unwrap();
    assert!(!registry.have_basic_id_info());
    registry.set_by_name_u8("UA_TYPE", 2).unwrap();
    assert!(registry.have_basic_id_info());
}

#[test]
fn test_load_defaults_idempotent() {
    let mut registry = registry_without_store();

    registry.load_defaults();
    let once: Vec<_> = (0..registry.count())
        .map(|i| registry.get(registry.find_by_index(i).unwrap()).clone())
        .collect();

    registry.load_defaults();
    let twice: Vec<_> = (0..registry.count())
        .map(|i| registry.get(registry.find_by_index(i).unwrap()).clone())
        .collect();

    assert_eq!(once, twice);
}

#[test]
fn test_load_defaults_resets_mutations() {
    let mut registry = registry_without_store();

    registry.set_by_name_u8("WEBSERVER_ENABLE", 0).unwrap();
    registry.set_by_name_str("UAS_ID", "SN-1").unwrap();
    registry.load_defaults();

    let web = registry.find_by_name("WEBSERVER_ENABLE").unwrap();
    let uas = registry.find_by_name("UAS_ID").unwrap();
    assert_eq!(registry.get_u8(web), Ok(1));
    assert_eq!(registry.get_str(uas), Ok(""));
}
