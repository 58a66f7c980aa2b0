use std::io::Write;

use wdi::{DeviceSelector, DriverBackend, ListOptions, TargetSet};

use crate::report::Reporter;

/// Enumerate every device and report the ones matching `targets`
pub(crate) fn list_devices<B, W>(
    backend: &B,
    targets: &TargetSet,
    reporter: &mut Reporter<W>,
) where
    B: DriverBackend + ?Sized,
    W: Write,
{
    let list = match backend.create_list(&ListOptions::all()) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("Device enumeration failed: {err}");
            return;
        }
    };
    if list.is_empty() {
        reporter.progress(format_args!("No USB device found"));
    }
    DeviceSelector::new(targets).select(list.devices(), reporter);
    list.release();
}
