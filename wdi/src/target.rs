use nonempty::{NonEmpty, nonempty};

pub const BOOTLOADER_VID: u16 = 0x0483;
pub const BOOTLOADER_PID: u16 = 0xDF11;
pub const PEACHY_VID: u16 = 0x16D0;
pub const PEACHY_PID: u16 = 0x0AF3;

/// INF file written when a target does not name its own
pub const DEFAULT_INF_NAME: &str = "stm32_bootloader.inf";
/// Directory the driver package is extracted to
pub const DEFAULT_DRIVER_DIR: &str = "usb_driver";

/// A device model this tool knows about
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSpec {
    tag: String,
    description: String,
    vid: u16,
    pid: u16,
    install: bool,
    inf_name: Option<String>,
}

impl TargetSpec {
    /// `tag` is the short category printed when a device matches,
    /// `description` the human label.
    pub fn new(
        tag: impl Into<String>,
        description: impl Into<String>,
        vid: u16,
        pid: u16,
    ) -> Self {
        TargetSpec {
            tag: tag.into(),
            description: description.into(),
            vid,
            pid,
            install: false,
            inf_name: None,
        }
    }

    /// STM32 system bootloader in DFU mode
    pub fn bootloader() -> Self {
        TargetSpec::new(
            "BOOTLOADER",
            "STM32 BOOTLOADER",
            BOOTLOADER_VID,
            BOOTLOADER_PID,
        )
        .installable(true)
        .with_inf_name(DEFAULT_INF_NAME)
    }

    pub fn peachy() -> Self {
        TargetSpec::new("PEACHY", "Peachy Printer", PEACHY_VID, PEACHY_PID)
    }

    /// Whether the bootloader pass installs WinUSB onto matching devices
    pub fn installable(mut self, install: bool) -> Self {
        self.install = install;
        self
    }

    pub fn with_inf_name(mut self, inf_name: impl Into<String>) -> Self {
        self.inf_name = Some(inf_name.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vendor_id(&self) -> u16 {
        self.vid
    }

    pub fn product_id(&self) -> u16 {
        self.pid
    }

    pub fn install(&self) -> bool {
        self.install
    }

    pub fn inf_name(&self) -> &str {
        self.inf_name.as_deref().unwrap_or(DEFAULT_INF_NAME)
    }

    pub fn matches(&self, vid: u16, pid: u16) -> bool {
        self.vid == vid && self.pid == pid
    }
}

/// Ordered, non-empty set of targets
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSet {
    targets: NonEmpty<TargetSpec>,
}

impl TargetSet {
    /// `None` when `targets` is empty
    pub fn new(targets: Vec<TargetSpec>) -> Option<Self> {
        NonEmpty::from_vec(targets).map(|targets| TargetSet { targets })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetSpec> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Targets matching an ID pair, in set order
    pub fn matching(
        &self,
        vid: u16,
        pid: u16,
    ) -> impl Iterator<Item = &TargetSpec> {
        self.iter().filter(move |target| target.matches(vid, pid))
    }
}

impl Default for TargetSet {
    fn default() -> Self {
        TargetSet {
            targets: nonempty![TargetSpec::bootloader(), TargetSpec::peachy()],
        }
    }
}
