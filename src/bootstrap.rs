//! Startup sequence: defaults → store overlay → derived values.
//!
//! Runs exactly once, before anything else touches the registry. Order
//! matters:
//!
//! 1. load schema defaults into every slot
//! 2. attach the store handed in by the caller (open failure is logged
//!    and degrades to defaults-only, it never stops boot)
//! 3. overlay persisted values, key by key
//! 4. if the network name is still empty, derive one from the MAC
//!    (memory only; it must not stick across a factory reset)
//! 5. on first run, flip DONE_INIT and seed the factory public keys
//!    through the normal validated setters

use core::fmt::Write;

use heapless::String;

use crate::assets::AssetStore;
use crate::params::ParamRegistry;
use crate::storage::{ParamStore, StoreError};
use crate::{sys_info, sys_warn};

/// NVS namespace holding all parameters.
pub const NVS_NAMESPACE: &str = "storage";

/// Prefix for the derived network name.
pub const SSID_PREFIX: &str = "RID_";

/// Public-key slots seeded on first run, with their asset paths.
const PROVISIONED_KEYS: &[(&str, &str)] = &[
    ("PUBLIC_KEY1", "public_keys/factory_key1.dat"),
    ("PUBLIC_KEY2", "public_keys/factory_key2.dat"),
    ("PUBLIC_KEY3", "public_keys/factory_key3.dat"),
];

/// What bootstrap did, for the boot log and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    /// Store opened and attached (false = defaults-only mode)
    pub store_available: bool,
    /// WIFI_SSID was empty and got a MAC-derived name
    pub ssid_derived: bool,
    /// First run detected, keys provisioned
    pub provisioned: bool,
}

/// Run the bootstrap sequence.
///
/// The caller opens the store (`NvsParamStore::open(NVS_NAMESPACE)` on
/// target) and passes the outcome in; this keeps the sequence testable
/// against any backend and any failure mode.
pub fn run<S: ParamStore, A: AssetStore>(
    registry: &mut ParamRegistry<S>,
    store: Result<S, StoreError>,
    assets: &A,
    mac: [u8; 6],
) -> BootReport {
    registry.load_defaults();

    let store_available = match store {
        Ok(s) => {
            registry.attach_store(s);
            true
        }
        Err(e) => {
            sys_warn!("store open failed ({:?}), running on defaults", e);
            false
        }
    };

    registry.pull_overrides();

    let ssid_derived = derive_network_name(registry, mac);
    let provisioned = first_run_provisioning(registry, assets);

    sys_info!(
        "parameters ready: {} entries, store {}",
        registry.count(),
        if store_available { "ok" } else { "unavailable" }
    );

    BootReport {
        store_available,
        ssid_derived,
        provisioned,
    }
}

/// Synthesize `RID_<12 lowercase hex digits>` if no SSID is configured.
///
/// Written to the slot only; persisting it would make a placeholder look
/// like an operator choice on the next boot.
fn derive_network_name<S: ParamStore>(registry: &mut ParamRegistry<S>, mac: [u8; 6]) -> bool {
    let Some(id) = registry.find_by_name("WIFI_SSID") else {
        return false;
    };
    if !registry.get_str(id).unwrap_or("").is_empty() {
        return false;
    }

    let mut ssid: String<20> = String::new();
    let _ = write!(
        ssid,
        "{}{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        SSID_PREFIX, mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    );
    registry.overlay_str(id, &ssid);
    true
}

/// One-time provisioning, gated on the hidden DONE_INIT flag.
///
/// The flag flips first, through the normal setter, so it persists even
/// if key seeding is partial. A missing asset leaves its slot untouched.
fn first_run_provisioning<S: ParamStore, A: AssetStore>(
    registry: &mut ParamRegistry<S>,
    assets: &A,
) -> bool {
    let Some(done) = registry.find_by_name("DONE_INIT") else {
        return false;
    };
    if registry.get_u8(done).unwrap_or(1) != 0 {
        return false;
    }

    if registry.set_u8(done, 1).is_err() {
        sys_warn!("DONE_INIT could not be set");
    }

    for (name, path) in PROVISIONED_KEYS {
        match assets.find_string(path) {
            Some(key) => {
                if registry.set_by_name_str(name, key).is_err() {
                    sys_warn!("provisioning {} rejected", name);
                }
            }
            None => {
                sys_warn!("asset {} missing, {} left unset", path, name);
            }
        }
    }
    true
}
