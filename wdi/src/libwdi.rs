use std::{
    ffi::{CStr, CString, c_char},
    path::Path,
    ptr,
};

use wdi_sys as sys;

use crate::{
    DeviceList, DeviceRecord, DriverBackend, InstallOptions, ListOptions,
    LogLevel, PrepareOptions, WdiError,
};

/// Backend calling into libwdi
#[derive(Debug, Default)]
pub struct LibWdi;

/// The linked list returned by `wdi_create_list`, destroyed on drop
struct NativeList {
    head: *mut sys::wdi_device_info,
    nodes: Vec<*mut sys::wdi_device_info>,
}

impl Drop for NativeList {
    fn drop(&mut self) {
        if self.head.is_null() {
            return;
        }
        // SAFETY: head came from wdi_create_list and is destroyed only here
        let r = unsafe { sys::wdi_destroy_list(self.head) };
        if let Err(err) = WdiError::status(r) {
            log::warn!("Failed to release device list: {err}");
        }
    }
}

impl LibWdi {
    /// Native node backing `device`, checked against the record's IDs
    fn node(
        list: &DeviceList,
        device: &DeviceRecord,
    ) -> Result<*mut sys::wdi_device_info, WdiError> {
        let node = list
            .native::<NativeList>()
            .and_then(|native| native.nodes.get(device.position()))
            .copied()
            .ok_or(WdiError::InvalidParam)?;
        // SAFETY: nodes stay valid until the owning NativeList is dropped,
        // and `list` borrows it
        let info = unsafe { &*node };
        if info.vid != device.vendor_id() || info.pid != device.product_id() {
            return Err(WdiError::InvalidParam);
        }
        Ok(node)
    }
}

impl DriverBackend for LibWdi {
    fn name(&self) -> &'static str {
        "libwdi"
    }

    fn set_log_level(&self, level: LogLevel) -> Result<(), WdiError> {
        // SAFETY: takes a plain integer, out of range levels are rejected
        WdiError::status(unsafe { sys::wdi_set_log_level(level.raw()) })
    }

    fn create_list(
        &self,
        options: &ListOptions,
    ) -> Result<DeviceList, WdiError> {
        let mut opts = sys::wdi_options_create_list {
            list_all: to_bool(options.list_all),
            list_hubs: to_bool(options.list_hubs),
            trim_whitespaces: to_bool(options.trim_whitespaces),
        };
        let mut head: *mut sys::wdi_device_info = ptr::null_mut();

        // SAFETY: both pointers refer to live locals for the whole call
        let r = unsafe { sys::wdi_create_list(&mut head, &mut opts) };
        match WdiError::status(r) {
            Ok(()) => {}
            Err(WdiError::NoDevice) => return Ok(DeviceList::empty()),
            Err(err) => return Err(err),
        }

        let mut nodes = Vec::new();
        let mut records = Vec::new();
        let mut node = head;
        while !node.is_null() {
            // SAFETY: every node up to the null `next` belongs to the list
            let info = unsafe { &*node };
            records.push(to_record(info));
            nodes.push(node);
            node = info.next;
        }
        log::debug!("libwdi listed {} device(s)", records.len());

        Ok(DeviceList::with_native(records, NativeList { head, nodes }))
    }

    fn prepare_driver(
        &self,
        list: &DeviceList,
        device: &DeviceRecord,
        path: &Path,
        inf_name: &str,
        options: &PrepareOptions,
    ) -> Result<(), WdiError> {
        let node = Self::node(list, device)?;
        let path = path_cstring(path)?;
        let inf_name = cstring(inf_name)?;
        let vendor_name = opt_cstring(&options.vendor_name)?;
        let device_guid = opt_cstring(&options.device_guid)?;
        let cert_subject = opt_cstring(&options.cert_subject)?;

        let mut opts = sys::wdi_options_prepare_driver {
            driver_type: options.driver_type.raw(),
            vendor_name: opt_ptr(&vendor_name),
            device_guid: opt_ptr(&device_guid),
            disable_cat: to_bool(options.disable_cat),
            disable_signing: to_bool(options.disable_signing),
            cert_subject: opt_ptr(&cert_subject),
            use_wcid_driver: to_bool(options.use_wcid_driver),
            external_inf: to_bool(options.external_inf),
        };

        // SAFETY: the strings outlive the call, libwdi does not keep them
        WdiError::status(unsafe {
            sys::wdi_prepare_driver(
                node,
                path.as_ptr(),
                inf_name.as_ptr(),
                &mut opts,
            )
        })
    }

    fn install_driver(
        &self,
        list: &DeviceList,
        device: &DeviceRecord,
        path: &Path,
        inf_name: &str,
        options: &InstallOptions,
    ) -> Result<(), WdiError> {
        let node = Self::node(list, device)?;
        let path = path_cstring(path)?;
        let inf_name = cstring(inf_name)?;

        let mut opts = sys::wdi_options_install_driver {
            hWnd: ptr::null_mut(),
            install_filter_driver: to_bool(options.install_filter_driver),
            pending_install_timeout: options
                .pending_install_timeout
                .map_or(0, |t| t.as_millis().try_into().unwrap_or(u32::MAX)),
        };
        let opts_ptr = if *options == InstallOptions::default() {
            ptr::null_mut()
        } else {
            &mut opts as *mut _
        };

        // SAFETY: node is owned by `list`, opts_ptr is null or points to
        // `opts`, which outlives the call
        WdiError::status(unsafe {
            sys::wdi_install_driver(
                node,
                path.as_ptr(),
                inf_name.as_ptr(),
                opts_ptr,
            )
        })
    }

    fn strerror(&self, code: i32) -> String {
        // SAFETY: accepts any code, unknown ones map to a generic string
        let text = unsafe { sys::wdi_strerror(code) };
        if text.is_null() {
            crate::describe(code)
        } else {
            // SAFETY: libwdi returns static strings
            unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
        }
    }
}

/// Whether this 32 bit process runs on a 64 bit OS
pub(crate) fn is_wow64() -> bool {
    let mut wow64 = sys::FALSE;
    // SAFETY: the pseudo handle of the current process is always valid and
    // `wow64` is a live local
    let ok = unsafe {
        sys::IsWow64Process(sys::GetCurrentProcess(), &mut wow64)
    };
    ok != sys::FALSE && wow64 != sys::FALSE
}

fn to_record(info: &sys::wdi_device_info) -> DeviceRecord {
    let desc = opt_string(info.desc).unwrap_or_default();
    let mut record = DeviceRecord::new(desc, info.vid, info.pid);
    if let Some(hardware_id) = opt_string(info.hardware_id) {
        record = record.with_hardware_id(hardware_id);
    }
    if let Some(driver) = opt_string(info.driver) {
        record = record.with_driver(driver, info.driver_version);
    }
    if info.is_composite != sys::FALSE {
        record = record.with_interface(info.mi);
    }
    record
}

fn to_bool(value: bool) -> sys::BOOL {
    if value { sys::TRUE } else { sys::FALSE }
}

fn opt_string(s: *const c_char) -> Option<String> {
    if s.is_null() {
        None
    } else {
        // SAFETY: libwdi strings are NUL terminated and live as long as the
        // list
        Some(unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned())
    }
}

fn opt_ptr(s: &Option<CString>) -> *mut c_char {
    s.as_ref().map_or(ptr::null_mut(), |s| s.as_ptr() as *mut c_char)
}

fn opt_cstring(s: &Option<String>) -> Result<Option<CString>, WdiError> {
    s.as_deref().map(cstring).transpose()
}

fn cstring(s: &str) -> Result<CString, WdiError> {
    CString::new(s).map_err(|_| WdiError::InvalidParam)
}

fn path_cstring(path: &Path) -> Result<CString, WdiError> {
    path.to_str().ok_or(WdiError::InvalidParam).and_then(cstring)
}
