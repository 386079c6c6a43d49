//! Read-only embedded assets.
//!
//! A tiny path-to-contents table standing in for a ROM filesystem. Only
//! consumed by first-run provisioning to seed the factory public keys.

/// Read-only asset lookup.
pub trait AssetStore {
    /// Contents of the asset at `path`, or `None` if absent.
    fn find_string(&self, path: &str) -> Option<&str>;
}

/// Factory key material baked into the firmware image from `romfs/`.
static FACTORY_ASSETS: &[(&str, &str)] = &[
    (
        "public_keys/factory_key1.dat",
        include_str!("../romfs/public_keys/factory_key1.dat"),
    ),
    (
        "public_keys/factory_key2.dat",
        include_str!("../romfs/public_keys/factory_key2.dat"),
    ),
    (
        "public_keys/factory_key3.dat",
        include_str!("../romfs/public_keys/factory_key3.dat"),
    ),
];

/// Static asset table.
pub struct RomAssets {
    entries: &'static [(&'static str, &'static str)],
}

impl RomAssets {
    /// The image shipped with the firmware.
    pub const FACTORY: Self = Self::new(FACTORY_ASSETS);

    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }
}

impl AssetStore for RomAssets {
    fn find_string(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, contents)| *contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_assets_present() {
        let assets = RomAssets::FACTORY;
        for n in 1..=3 {
            let path = format!("public_keys/factory_key{}.dat", n);
            let key = assets.find_string(&path).expect("factory key missing");
            assert!(!key.is_empty());
            assert!(key.len() <= 64, "key must fit a Str64 slot");
        }
    }

    #[test]
    fn test_unknown_path_absent() {
        assert!(RomAssets::FACTORY.find_string("public_keys/nope.dat").is_none());
    }
}
