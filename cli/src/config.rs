//! Target list and installer settings, loaded once at startup

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use wdi::{
    DEFAULT_DRIVER_DIR, DriverType, InstallOptions, PrepareOptions, TargetSet,
    TargetSpec,
};

use crate::CliError;

/// On-disk layout of the configuration file
///
/// ```toml
/// vendor_name = "Peachy"
/// driver_type = "winusb"
/// pending_install_timeout_secs = 120
///
/// [[target]]
/// tag = "BOOTLOADER"
/// description = "STM32 BOOTLOADER"
/// vid = 0x0483
/// pid = 0xDF11
/// install = true
/// inf_name = "stm32_bootloader.inf"
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    driver_dir: Option<PathBuf>,
    #[serde(default)]
    driver_type: DriverKind,
    vendor_name: Option<String>,
    device_guid: Option<String>,
    #[serde(default)]
    disable_cat: bool,
    #[serde(default)]
    disable_signing: bool,
    cert_subject: Option<String>,
    #[serde(default)]
    use_wcid_driver: bool,
    #[serde(default)]
    external_inf: bool,
    #[serde(default)]
    install_filter_driver: bool,
    pending_install_timeout_secs: Option<u64>,
    /// Left out entirely, the built-in targets apply
    #[serde(rename = "target")]
    targets: Option<Vec<TargetEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetEntry {
    tag: String,
    description: Option<String>,
    vid: u16,
    pid: u16,
    #[serde(default)]
    install: bool,
    inf_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DriverKind {
    #[default]
    WinUsb,
    LibUsb0,
    LibUsbK,
    Cdc,
    User,
}

impl From<DriverKind> for DriverType {
    fn from(kind: DriverKind) -> Self {
        match kind {
            DriverKind::WinUsb => DriverType::WinUsb,
            DriverKind::LibUsb0 => DriverType::LibUsb0,
            DriverKind::LibUsbK => DriverType::LibUsbK,
            DriverKind::Cdc => DriverType::Cdc,
            DriverKind::User => DriverType::User,
        }
    }
}

impl From<TargetEntry> for TargetSpec {
    fn from(entry: TargetEntry) -> Self {
        let description =
            entry.description.unwrap_or_else(|| entry.tag.clone());
        let target =
            TargetSpec::new(entry.tag, description, entry.vid, entry.pid)
                .installable(entry.install);
        match entry.inf_name {
            Some(inf_name) => target.with_inf_name(inf_name),
            None => target,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
    pub(crate) targets: TargetSet,
    pub(crate) driver_dir: PathBuf,
    pub(crate) prepare: PrepareOptions,
    pub(crate) install: InstallOptions,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            targets: TargetSet::default(),
            driver_dir: PathBuf::from(DEFAULT_DRIVER_DIR),
            prepare: PrepareOptions::default(),
            install: InstallOptions::default(),
        }
    }
}

impl Config {
    /// Load `path`, or the per-user config file when it exists, or fall
    /// back to the built-in targets.
    pub(crate) fn load(path: Option<&Path>) -> Result<Config, CliError> {
        match path {
            Some(path) => Config::from_file(path),
            None => match default_path() {
                Some(path) if path.is_file() => Config::from_file(&path),
                _ => {
                    log::debug!(
                        "No configuration file, using built-in targets"
                    );
                    Ok(Config::default())
                }
            },
        }
    }

    pub(crate) fn from_file(path: &Path) -> Result<Config, CliError> {
        log::info!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(path)?;
        Config::parse(&text).map_err(|err| match err {
            CliError::Config(msg) => {
                CliError::Config(format!("{}: {msg}", path.display()))
            }
            err => err,
        })
    }

    pub(crate) fn parse(text: &str) -> Result<Config, CliError> {
        let file: ConfigFile = toml::from_str(text)?;
        let targets = match file.targets {
            Some(entries) => TargetSet::new(
                entries.into_iter().map(TargetSpec::from).collect(),
            )
            .ok_or_else(|| CliError::Config("empty target list".into()))?,
            None => TargetSet::default(),
        };

        Ok(Config {
            targets,
            driver_dir: file
                .driver_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DRIVER_DIR)),
            prepare: PrepareOptions {
                driver_type: file.driver_type.into(),
                vendor_name: file.vendor_name,
                device_guid: file.device_guid,
                disable_cat: file.disable_cat,
                disable_signing: file.disable_signing,
                cert_subject: file.cert_subject,
                use_wcid_driver: file.use_wcid_driver,
                external_inf: file.external_inf,
            },
            install: InstallOptions {
                install_filter_driver: file.install_filter_driver,
                pending_install_timeout: file
                    .pending_install_timeout_secs
                    .map(Duration::from_secs),
            },
        })
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wdi-simple").join("targets.toml"))
}
