use std::any::Any;

/// One USB device (or composite interface) found during enumeration
///
/// Records are plain values: once the list is built they never change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceRecord {
    position: usize,
    desc: String,
    vid: u16,
    pid: u16,
    driver: Option<String>,
    driver_version: Option<u64>,
    interface: Option<u8>,
    hardware_id: Option<String>,
}

impl DeviceRecord {
    pub fn new(desc: impl Into<String>, vid: u16, pid: u16) -> Self {
        DeviceRecord {
            position: 0,
            desc: desc.into(),
            vid,
            pid,
            driver: None,
            driver_version: None,
            interface: None,
            hardware_id: None,
        }
    }

    /// Driver currently bound to the device. A zero version means unknown.
    pub fn with_driver(
        mut self,
        driver: impl Into<String>,
        version: u64,
    ) -> Self {
        self.driver = Some(driver.into());
        self.driver_version = (version != 0).then_some(version);
        self
    }

    /// Mark the record as interface `mi` of a composite device
    pub fn with_interface(mut self, mi: u8) -> Self {
        self.interface = Some(mi);
        self
    }

    /// Windows hardware ID, `USB\VID_xxxx&PID_xxxx&REV_xxxx`
    pub fn with_hardware_id(mut self, hardware_id: impl Into<String>) -> Self {
        self.hardware_id = Some(hardware_id.into());
        self
    }

    /// Index of the record in the enumeration it came from
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn description(&self) -> &str {
        &self.desc
    }

    pub fn vendor_id(&self) -> u16 {
        self.vid
    }

    pub fn product_id(&self) -> u16 {
        self.pid
    }

    pub fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }

    pub fn driver_version(&self) -> Option<u64> {
        self.driver_version
    }

    /// Interface number when the record is one interface of a composite
    /// device
    pub fn interface(&self) -> Option<u8> {
        self.interface
    }

    pub fn hardware_id(&self) -> Option<&str> {
        self.hardware_id.as_deref()
    }
}

/// Result of one enumeration pass
///
/// The list owns every record plus whatever native resource the backend
/// allocated for them. That resource is released exactly once, either by
/// [DeviceList::release] or when the list is dropped.
pub struct DeviceList {
    devices: Vec<DeviceRecord>,
    native: Option<Box<dyn Any>>,
}

impl DeviceList {
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        DeviceList {
            devices: with_positions(devices),
            native: None,
        }
    }

    pub fn empty() -> Self {
        DeviceList::new(Vec::new())
    }

    /// Build a list backed by a native resource. `native` is dropped when
    /// the list is released.
    pub fn with_native<T: Any>(
        devices: Vec<DeviceRecord>,
        native: T,
    ) -> Self {
        DeviceList {
            devices: with_positions(devices),
            native: Some(Box::new(native)),
        }
    }

    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Native resource attached by the backend, if it is of type `T`
    pub fn native<T: Any>(&self) -> Option<&T> {
        self.native.as_ref()?.downcast_ref()
    }

    /// Release the list and its native resource. A no-op for lists without
    /// one, the empty list included.
    pub fn release(mut self) {
        if let Some(native) = self.native.take() {
            log::debug!("Releasing list of {} device(s)", self.devices.len());
            drop(native);
        }
    }
}

fn with_positions(mut devices: Vec<DeviceRecord>) -> Vec<DeviceRecord> {
    for (position, device) in devices.iter_mut().enumerate() {
        device.position = position;
    }
    devices
}
