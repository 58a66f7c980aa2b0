use wdi_sys as sys;

/// Failure status reported by the driver installer
///
/// Variants follow libwdi's `wdi_error` codes one to one. Codes outside that
/// table are kept verbatim in [WdiError::Other].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WdiError {
    Io,
    InvalidParam,
    Access,
    NoDevice,
    NotFound,
    Busy,
    Timeout,
    Overflow,
    PendingInstallation,
    Interrupted,
    Resource,
    NotSupported,
    Exists,
    UserCancel,
    NeedsAdmin,
    Wow64,
    InfSyntax,
    CatMissing,
    Unsigned,
    Other(i32),
}

impl std::error::Error for WdiError {}

impl WdiError {
    /// Turn a raw status code into a `Result`, `WDI_SUCCESS` being `Ok`.
    pub fn status(code: i32) -> Result<(), WdiError> {
        match code {
            sys::WDI_SUCCESS => Ok(()),
            code => Err(WdiError::from(code)),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            WdiError::Io => sys::WDI_ERROR_IO,
            WdiError::InvalidParam => sys::WDI_ERROR_INVALID_PARAM,
            WdiError::Access => sys::WDI_ERROR_ACCESS,
            WdiError::NoDevice => sys::WDI_ERROR_NO_DEVICE,
            WdiError::NotFound => sys::WDI_ERROR_NOT_FOUND,
            WdiError::Busy => sys::WDI_ERROR_BUSY,
            WdiError::Timeout => sys::WDI_ERROR_TIMEOUT,
            WdiError::Overflow => sys::WDI_ERROR_OVERFLOW,
            WdiError::PendingInstallation => {
                sys::WDI_ERROR_PENDING_INSTALLATION
            }
            WdiError::Interrupted => sys::WDI_ERROR_INTERRUPTED,
            WdiError::Resource => sys::WDI_ERROR_RESOURCE,
            WdiError::NotSupported => sys::WDI_ERROR_NOT_SUPPORTED,
            WdiError::Exists => sys::WDI_ERROR_EXISTS,
            WdiError::UserCancel => sys::WDI_ERROR_USER_CANCEL,
            WdiError::NeedsAdmin => sys::WDI_ERROR_NEEDS_ADMIN,
            WdiError::Wow64 => sys::WDI_ERROR_WOW64,
            WdiError::InfSyntax => sys::WDI_ERROR_INF_SYNTAX,
            WdiError::CatMissing => sys::WDI_ERROR_CAT_MISSING,
            WdiError::Unsigned => sys::WDI_ERROR_UNSIGNED,
            WdiError::Other(code) => *code,
        }
    }
}

/// Human readable text for any status code, success included.
///
/// Matches the wording of libwdi's `wdi_strerror` so that output is the
/// same whichever backend produced the code.
pub fn describe(code: i32) -> String {
    match WdiError::status(code) {
        Ok(()) => "Success".into(),
        Err(err) => err.to_string(),
    }
}

impl From<i32> for WdiError {
    fn from(code: i32) -> Self {
        match code {
            sys::WDI_ERROR_IO => WdiError::Io,
            sys::WDI_ERROR_INVALID_PARAM => WdiError::InvalidParam,
            sys::WDI_ERROR_ACCESS => WdiError::Access,
            sys::WDI_ERROR_NO_DEVICE => WdiError::NoDevice,
            sys::WDI_ERROR_NOT_FOUND => WdiError::NotFound,
            sys::WDI_ERROR_BUSY => WdiError::Busy,
            sys::WDI_ERROR_TIMEOUT => WdiError::Timeout,
            sys::WDI_ERROR_OVERFLOW => WdiError::Overflow,
            sys::WDI_ERROR_PENDING_INSTALLATION => {
                WdiError::PendingInstallation
            }
            sys::WDI_ERROR_INTERRUPTED => WdiError::Interrupted,
            sys::WDI_ERROR_RESOURCE => WdiError::Resource,
            sys::WDI_ERROR_NOT_SUPPORTED => WdiError::NotSupported,
            sys::WDI_ERROR_EXISTS => WdiError::Exists,
            sys::WDI_ERROR_USER_CANCEL => WdiError::UserCancel,
            sys::WDI_ERROR_NEEDS_ADMIN => WdiError::NeedsAdmin,
            sys::WDI_ERROR_WOW64 => WdiError::Wow64,
            sys::WDI_ERROR_INF_SYNTAX => WdiError::InfSyntax,
            sys::WDI_ERROR_CAT_MISSING => WdiError::CatMissing,
            sys::WDI_ERROR_UNSIGNED => WdiError::Unsigned,
            code => WdiError::Other(code),
        }
    }
}

impl std::fmt::Display for WdiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WdiError::Io => write!(f, "Input/output error"),
            WdiError::InvalidParam => write!(f, "Invalid parameter"),
            WdiError::Access => {
                write!(f, "Access denied (insufficient permissions)")
            }
            WdiError::NoDevice => {
                write!(f, "No such device (it may have been disconnected)")
            }
            WdiError::NotFound => write!(f, "Entity not found"),
            WdiError::Busy => {
                write!(f, "Resource busy, or API call already running")
            }
            WdiError::Timeout => write!(f, "Operation timed out"),
            WdiError::Overflow => write!(f, "Overflow"),
            WdiError::PendingInstallation => {
                write!(f, "Another installation is pending")
            }
            WdiError::Interrupted => {
                write!(f, "System call interrupted (perhaps due to signal)")
            }
            WdiError::Resource => write!(
                f,
                "Could not acquire resource (Insufficient memory, etc)"
            ),
            WdiError::NotSupported => write!(
                f,
                "Operation not supported or unimplemented on this platform"
            ),
            WdiError::Exists => write!(f, "Entity already exists"),
            WdiError::UserCancel => write!(f, "Cancelled by user"),
            WdiError::NeedsAdmin => write!(
                f,
                "This operation requires to run with elevated privileges"
            ),
            WdiError::Wow64 => write!(
                f,
                "Attempted to run the 32 bit installer on 64 bit"
            ),
            WdiError::InfSyntax => write!(f, "Bad inf syntax"),
            WdiError::CatMissing => write!(f, "Missing cat file"),
            WdiError::Unsigned => write!(
                f,
                "System policy prevents the installation of unsigned drivers"
            ),
            WdiError::Other(sys::WDI_ERROR_OTHER) => write!(f, "Other error"),
            WdiError::Other(code) => write!(f, "Unknown error {code}"),
        }
    }
}
