//! ESP-IDF NVS backend.

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};

use super::{ParamStore, StoreError};

/// Parameter store over the default NVS partition.
pub struct NvsParamStore {
    nvs: EspNvs<NvsDefault>,
}

impl NvsParamStore {
    /// Take the default partition and open `namespace` read-write.
    ///
    /// The caller passes the result into bootstrap; an `Err` puts the
    /// registry in defaults-only mode.
    pub fn open(namespace: &str) -> Result<Self, StoreError> {
        let partition = EspDefaultNvsPartition::take().map_err(|_| StoreError::OpenFailed)?;
        let nvs = EspNvs::new(partition, namespace, true).map_err(|_| StoreError::OpenFailed)?;
        Ok(Self { nvs })
    }
}

impl ParamStore for NvsParamStore {
    fn get_u8(&mut self, key: &str) -> Result<Option<u8>, StoreError> {
        self.nvs.get_u8(key).map_err(|_| StoreError::ReadFailed)
    }

    fn get_u32(&mut self, key: &str) -> Result<Option<u32>, StoreError> {
        self.nvs.get_u32(key).map_err(|_| StoreError::ReadFailed)
    }

    fn get_str<'a>(&mut self, key: &str, buf: &'a mut [u8]) -> Result<Option<&'a str>, StoreError> {
        self.nvs
            .get_str(key, buf)
            .map_err(|_| StoreError::ReadFailed)
    }

    fn set_u8(&mut self, key: &str, value: u8) -> Result<(), StoreError> {
        self.nvs
            .set_u8(key, value)
            .map_err(|_| StoreError::WriteFailed)
    }

    fn set_u32(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.nvs
            .set_u32(key, value)
            .map_err(|_| StoreError::WriteFailed)
    }

    fn set_str(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.nvs
            .set_str(key, value)
            .map_err(|_| StoreError::WriteFailed)
    }
}
