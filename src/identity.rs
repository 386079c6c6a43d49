//! Hardware identity.

/// Station MAC address, 6 raw bytes.
///
/// Consumed only by the bootstrap caller for network-name derivation.
#[cfg(target_os = "espidf")]
pub fn read_mac_address() -> [u8; 6] {
    let mut mac = [0u8; 6];
    // SAFETY: esp_read_mac writes exactly 6 bytes for the WIFI_STA type
    unsafe {
        esp_idf_svc::sys::esp_read_mac(
            mac.as_mut_ptr(),
            esp_idf_svc::sys::esp_mac_type_t_ESP_MAC_WIFI_STA,
        );
    }
    mac
}

/// Fixed placeholder MAC for host builds.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac_address() -> [u8; 6] {
    [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]
}
