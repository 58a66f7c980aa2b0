use std::time::Duration;

use wdi_sys as sys;

/// Driver to generate and install
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverType {
    #[default]
    WinUsb,
    LibUsb0,
    LibUsbK,
    Cdc,
    User,
}

impl DriverType {
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn raw(self) -> i32 {
        match self {
            DriverType::WinUsb => sys::WDI_WINUSB,
            DriverType::LibUsb0 => sys::WDI_LIBUSB0,
            DriverType::LibUsbK => sys::WDI_LIBUSBK,
            DriverType::Cdc => sys::WDI_CDC,
            DriverType::User => sys::WDI_USER,
        }
    }
}

/// Verbosity of the installer library's own diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warning,
    Error,
    None,
}

impl LogLevel {
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn raw(self) -> i32 {
        match self {
            LogLevel::Debug => sys::WDI_LOG_LEVEL_DEBUG,
            LogLevel::Info => sys::WDI_LOG_LEVEL_INFO,
            LogLevel::Warning => sys::WDI_LOG_LEVEL_WARNING,
            LogLevel::Error => sys::WDI_LOG_LEVEL_ERROR,
            LogLevel::None => sys::WDI_LOG_LEVEL_NONE,
        }
    }
}

impl From<log::LevelFilter> for LogLevel {
    fn from(level: log::LevelFilter) -> Self {
        match level {
            log::LevelFilter::Off => LogLevel::None,
            log::LevelFilter::Error => LogLevel::Error,
            log::LevelFilter::Warn => LogLevel::Warning,
            log::LevelFilter::Info => LogLevel::Info,
            log::LevelFilter::Debug | log::LevelFilter::Trace => {
                LogLevel::Debug
            }
        }
    }
}

/// Enumeration options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Include devices that already have a driver bound
    pub list_all: bool,
    pub list_hubs: bool,
    pub trim_whitespaces: bool,
}

impl ListOptions {
    /// Every device, hubs included, with trimmed descriptions
    pub fn all() -> Self {
        ListOptions {
            list_all: true,
            list_hubs: true,
            trim_whitespaces: true,
        }
    }
}

/// Options for driver package generation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrepareOptions {
    pub driver_type: DriverType,
    pub vendor_name: Option<String>,
    pub device_guid: Option<String>,
    /// Skip catalog (.cat) creation
    pub disable_cat: bool,
    /// Skip self-signing of the catalog
    pub disable_signing: bool,
    /// Subject of the self-signing certificate
    pub cert_subject: Option<String>,
    pub use_wcid_driver: bool,
    /// Keep an existing INF file instead of generating one
    pub external_inf: bool,
}

/// Options for driver installation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstallOptions {
    pub install_filter_driver: bool,
    /// How long to wait for another pending installation. `None` leaves the
    /// library default in place.
    pub pending_install_timeout: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(LogLevel::from(log::LevelFilter::Trace), LogLevel::Debug);
        assert_eq!(LogLevel::from(log::LevelFilter::Warn), LogLevel::Warning);
        assert_eq!(LogLevel::from(log::LevelFilter::Off), LogLevel::None);
        assert_eq!(LogLevel::default().raw(), sys::WDI_LOG_LEVEL_WARNING);
    }

    #[test]
    fn test_defaults() {
        let opts = PrepareOptions::default();
        assert_eq!(opts.driver_type, DriverType::WinUsb);
        assert_eq!(opts.driver_type.raw(), sys::WDI_WINUSB);
        assert!(!opts.disable_cat && !opts.disable_signing);

        let opts = ListOptions::all();
        assert!(opts.list_all && opts.list_hubs && opts.trim_whitespaces);
    }
}
