use std::path::Path;

use nusb::MaybeFuture;

use crate::{
    DeviceList, DeviceRecord, DriverBackend, InstallOptions, ListOptions,
    LogLevel, PrepareOptions, WdiError,
};

const HUB_CLASS: u8 = 0x09;

/// Enumeration-only backend for hosts without libwdi
///
/// Devices are listed through `nusb`; driver preparation and installation
/// are reported as not supported.
#[derive(Debug, Default)]
pub struct NusbBackend;

impl DriverBackend for NusbBackend {
    fn name(&self) -> &'static str {
        "nusb"
    }

    fn set_log_level(&self, level: LogLevel) -> Result<(), WdiError> {
        log::trace!("Ignoring installer log level {level:?}");
        Ok(())
    }

    fn create_list(
        &self,
        options: &ListOptions,
    ) -> Result<DeviceList, WdiError> {
        let devices = nusb::list_devices().wait().map_err(|err| {
            log::warn!("USB enumeration failed: {err}");
            WdiError::Io
        })?;
        let records = devices
            .filter(|dev| options.list_hubs || dev.class() != HUB_CLASS)
            .map(|dev| {
                let desc = dev.product_string().unwrap_or("Unknown Device");
                let desc = if options.trim_whitespaces {
                    desc.trim()
                } else {
                    desc
                };
                let hardware_id = format!(
                    "USB\\VID_{:04X}&PID_{:04X}&REV_{:04X}",
                    dev.vendor_id(),
                    dev.product_id(),
                    dev.device_version()
                );
                DeviceRecord::new(desc, dev.vendor_id(), dev.product_id())
                    .with_hardware_id(hardware_id)
            })
            .collect();
        Ok(DeviceList::new(records))
    }

    fn prepare_driver(
        &self,
        _list: &DeviceList,
        device: &DeviceRecord,
        _path: &Path,
        _inf_name: &str,
        _options: &PrepareOptions,
    ) -> Result<(), WdiError> {
        log::warn!(
            "Cannot prepare a driver for {:04X}:{:04X} on this platform",
            device.vendor_id(),
            device.product_id()
        );
        Err(WdiError::NotSupported)
    }

    fn install_driver(
        &self,
        _list: &DeviceList,
        _device: &DeviceRecord,
        _path: &Path,
        _inf_name: &str,
        _options: &InstallOptions,
    ) -> Result<(), WdiError> {
        Err(WdiError::NotSupported)
    }
}
