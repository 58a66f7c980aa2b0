//! Trait over the driver installer, plus the factory for the host's backend.
//! Backends may contain unsafe code, but expose a safe interface here.

use std::path::Path;

use crate::{
    DeviceList, DeviceRecord, InstallOptions, ListOptions, LogLevel,
    PrepareOptions, WdiError, error::describe,
};

/// Operations consumed from the driver installation library
pub trait DriverBackend {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    fn set_log_level(&self, level: LogLevel) -> Result<(), WdiError>;

    /// Enumerate devices. Finding no device at all yields an empty list.
    fn create_list(
        &self,
        options: &ListOptions,
    ) -> Result<DeviceList, WdiError>;

    /// Generate the driver package for `device` into `path`.
    ///
    /// `device` must come from `list`.
    fn prepare_driver(
        &self,
        list: &DeviceList,
        device: &DeviceRecord,
        path: &Path,
        inf_name: &str,
        options: &PrepareOptions,
    ) -> Result<(), WdiError>;

    /// Install a package previously generated by
    /// [DriverBackend::prepare_driver].
    fn install_driver(
        &self,
        list: &DeviceList,
        device: &DeviceRecord,
        path: &Path,
        inf_name: &str,
        options: &InstallOptions,
    ) -> Result<(), WdiError>;

    /// Text for a status code
    fn strerror(&self, code: i32) -> String {
        describe(code)
    }
}

/// Status code and text of an installation attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallOutcome {
    code: i32,
    message: String,
}

impl InstallOutcome {
    pub fn new<B>(backend: &B, result: Result<(), WdiError>) -> Self
    where
        B: DriverBackend + ?Sized,
    {
        let code = result.err().map_or(0, |err| err.code());
        InstallOutcome {
            code,
            message: backend.strerror(code),
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Backend for the current host: libwdi on Windows, `nusb` enumeration
/// elsewhere.
pub fn default_backend() -> Box<dyn DriverBackend> {
    #[cfg(windows)]
    {
        Box::new(crate::libwdi::LibWdi)
    }
    #[cfg(not(windows))]
    {
        Box::new(crate::enumerate::NusbBackend)
    }
}

/// Whether the OS is 64 bit, including 32 bit builds running under WOW64
pub fn is_x64() -> bool {
    #[cfg(windows)]
    {
        cfg!(target_pointer_width = "64") || crate::libwdi::is_wow64()
    }
    #[cfg(not(windows))]
    {
        cfg!(target_pointer_width = "64")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub;

    impl DriverBackend for Stub {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn set_log_level(&self, _level: LogLevel) -> Result<(), WdiError> {
            Ok(())
        }

        fn create_list(
            &self,
            _options: &ListOptions,
        ) -> Result<DeviceList, WdiError> {
            Ok(DeviceList::empty())
        }

        fn prepare_driver(
            &self,
            _list: &DeviceList,
            _device: &DeviceRecord,
            _path: &Path,
            _inf_name: &str,
            _options: &PrepareOptions,
        ) -> Result<(), WdiError> {
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

    #[test]
    fn test_outcome() {
        let ok = InstallOutcome::new(&Stub, Ok(()));
        assert!(ok.is_success());
        assert_eq!(ok.message(), "Success");

        let failed = InstallOutcome::new(&Stub, Err(WdiError::NeedsAdmin));
        assert!(!failed.is_success());
        assert_eq!(failed.code(), -15);
        assert_eq!(
            failed.message(),
            "This operation requires to run with elevated privileges"
        );
    }
}
