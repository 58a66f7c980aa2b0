//! Scriptable backend for exercising the CLI flows

use std::{
    cell::{Cell, RefCell},
    path::Path,
    rc::Rc,
};

use wdi::{
    DeviceList, DeviceRecord, DriverBackend, InstallOptions, ListOptions,
    LogLevel, PrepareOptions, WdiError,
};

/// Counts list releases
struct ReleaseGuard(Rc<Cell<usize>>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

pub(crate) struct MockBackend {
    devices: Vec<DeviceRecord>,
    enumerate_error: Option<WdiError>,
    prepare_errors: Vec<(usize, WdiError)>,
    install_errors: Vec<(usize, WdiError)>,
    calls: RefCell<Vec<String>>,
    released: Rc<Cell<usize>>,
}

impl MockBackend {
    pub(crate) fn new(devices: Vec<DeviceRecord>) -> Self {
        MockBackend {
            devices,
            enumerate_error: None,
            prepare_errors: Vec::new(),
            install_errors: Vec::new(),
            calls: RefCell::new(Vec::new()),
            released: Rc::new(Cell::new(0)),
        }
    }

    pub(crate) fn failing(err: WdiError) -> Self {
        MockBackend {
            enumerate_error: Some(err),
            ..MockBackend::new(Vec::new())
        }
    }

    pub(crate) fn fail_prepare_at(&mut self, position: usize, err: WdiError) {
        self.prepare_errors.push((position, err));
    }

    pub(crate) fn fail_install_at(&mut self, position: usize, err: WdiError) {
        self.install_errors.push((position, err));
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn releases(&self) -> usize {
        self.released.get()
    }

    fn record(
        &self,
        op: &str,
        device: &DeviceRecord,
        path: &Path,
        inf_name: &str,
        errors: &[(usize, WdiError)],
    ) -> Result<(), WdiError> {
        self.calls.borrow_mut().push(format!(
            "{op} {} {} {inf_name}",
            device.position(),
            path.display()
        ));
        match errors.iter().find(|(pos, _)| *pos == device.position()) {
            Some((_, err)) => Err(*err),
            None => Ok(()),
        }
    }
}

impl DriverBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn set_log_level(&self, _level: LogLevel) -> Result<(), WdiError> {
        Ok(())
    }

    fn create_list(
        &self,
        _options: &ListOptions,
    ) -> Result<DeviceList, WdiError> {
        if let Some(err) = self.enumerate_error {
            return Err(err);
        }
        Ok(DeviceList::with_native(
            self.devices.clone(),
            ReleaseGuard(self.released.clone()),
        ))
    }

    fn prepare_driver(
        &self,
        _list: &DeviceList,
        device: &DeviceRecord,
        path: &Path,
        inf_name: &str,
        _options: &PrepareOptions,
    ) -> Result<(), WdiError> {
        self.record("prepare", device, path, inf_name, &self.prepare_errors)
    }

    fn install_driver(
        &self,
        _list: &DeviceList,
        device: &DeviceRecord,
        path: &Path,
        inf_name: &str,
        _options: &InstallOptions,
    ) -> Result<(), WdiError> {
        self.record("install", device, path, inf_name, &self.install_errors)
    }
}
