//! The static schema table.
//!
//! Order is a public contract: the position of a descriptor is its stable
//! index for enumeration protocols. Append new parameters before the
//! sentinel; never reorder existing entries.

use super::schema::ParamDescriptor;

/// Upper bound on table entries, sized for the registry's slot vector.
pub const MAX_PARAMS: usize = 32;

/// All parameters, terminated by [`ParamDescriptor::SENTINEL`].
pub static PARAM_TABLE: &[ParamDescriptor] = &[
    ParamDescriptor::u8("LOCK_LEVEL", 0, Some((0, 2))),
    ParamDescriptor::u8("CAN_NODE", 0, Some((0, 127))),
    ParamDescriptor::u8("UA_TYPE", 0, Some((0, 15))),
    ParamDescriptor::u8("ID_TYPE", 0, Some((0, 4))),
    ParamDescriptor::str20("UAS_ID", 0),
    ParamDescriptor::u32("BAUDRATE", 57600, Some((9600, 921600))),
    ParamDescriptor::f32("WIFI_NAN_RATE", 0.0, Some((0.0, 5.0))),
    ParamDescriptor::f32("WIFI_POWER", 20.0, Some((2.0, 20.0))),
    ParamDescriptor::f32("BT4_RATE", 1.0, Some((0.0, 5.0))),
    ParamDescriptor::f32("BT4_POWER", 18.0, Some((-27.0, 18.0))),
    ParamDescriptor::f32("BT5_RATE", 1.0, Some((0.0, 5.0))),
    ParamDescriptor::f32("BT5_POWER", 18.0, Some((-27.0, 18.0))),
    ParamDescriptor::u8("WEBSERVER_ENABLE", 1, Some((0, 1))),
    ParamDescriptor::str20("WIFI_SSID", 0),
    ParamDescriptor::str20("WIFI_PASSWORD", 8).password(),
    ParamDescriptor::u8("BCAST_POWERUP", 1, Some((0, 1))),
    ParamDescriptor::str64("PUBLIC_KEY1", 0),
    ParamDescriptor::str64("PUBLIC_KEY2", 0),
    ParamDescriptor::str64("PUBLIC_KEY3", 0),
    ParamDescriptor::str64("PUBLIC_KEY4", 0),
    ParamDescriptor::str64("PUBLIC_KEY5", 0),
    ParamDescriptor::u8("DONE_INIT", 0, None).hidden(),
    ParamDescriptor::SENTINEL,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_terminated_by_sentinel() {
        assert!(PARAM_TABLE.last().unwrap().is_sentinel());
        // exactly one sentinel
        assert_eq!(
            PARAM_TABLE.iter().filter(|d| d.is_sentinel()).count(),
            1
        );
    }

    #[test]
    fn test_table_fits_slot_capacity() {
        assert!(PARAM_TABLE.len() <= MAX_PARAMS);
    }

    #[test]
    fn test_names_unique_and_nonempty() {
        for (i, a) in PARAM_TABLE.iter().enumerate() {
            if a.is_sentinel() {
                continue;
            }
            assert!(!a.name.is_empty(), "entry {} has empty name", i);
            for b in &PARAM_TABLE[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate name {}", a.name);
            }
        }
    }
}
