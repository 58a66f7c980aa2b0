//! WinUSB driver installation on top of [libwdi]
//!
//! Enumerates USB devices, picks the ones matching a set of known
//! vendor/product IDs and drives libwdi to generate and install a WinUSB
//! driver for them. On hosts without libwdi, devices can still be listed
//! through [`nusb`].
//!
//! # Example
//!
//! Listing the devices matching the built-in targets:
//! ```no_run
//! use wdi::{
//!     DeviceSelector, DriverBackend, ListOptions, TargetSet, default_backend,
//! };
//!
//! let backend = default_backend();
//! let targets = TargetSet::default();
//! match backend.create_list(&ListOptions::all()) {
//!     Ok(list) => {
//!         let selector = DeviceSelector::new(&targets);
//!         for m in selector.select(list.devices(), &mut ()) {
//!             println!("{}: {}", m.target.tag(), m.device.description());
//!         }
//!     }
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```
//!
//! [libwdi]: https://github.com/pbatard/libwdi
//! [`nusb`]: https://docs.rs/nusb

mod backend;
mod device;
mod enumerate;
mod error;
#[cfg(windows)]
mod libwdi;
mod options;
mod select;
mod target;

// Re-exports
pub use backend::{DriverBackend, InstallOutcome, default_backend, is_x64};
pub use device::{DeviceList, DeviceRecord};
pub use enumerate::NusbBackend;
pub use error::{WdiError, describe};
#[cfg(windows)]
pub use libwdi::LibWdi;
pub use options::{
    DriverType, InstallOptions, ListOptions, LogLevel, PrepareOptions,
};
pub use select::{DeviceSelector, Match, SelectionObserver};
pub use target::*;
