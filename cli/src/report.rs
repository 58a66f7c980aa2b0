use std::{
    fmt,
    io::{self, Write},
};

use log::LevelFilter;
use wdi::{DeviceRecord, Match, SelectionObserver};

/// Whether progress lines are printed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verbosity {
    Silent,
    Verbose,
}

impl Verbosity {
    pub(crate) fn from_flag(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Silent
        }
    }

    /// Default log filter, `RUST_LOG` still takes precedence
    pub(crate) fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Debug,
        }
    }
}

/// Console output of the tool
///
/// Result lines (device classification, return code) are always written.
/// Progress lines only show up in verbose mode.
pub(crate) struct Reporter<W: Write> {
    out: W,
    verbosity: Verbosity,
}

impl Reporter<io::Stdout> {
    pub(crate) fn stdout(verbosity: Verbosity) -> Self {
        Reporter::new(io::stdout(), verbosity)
    }
}

impl<W: Write> Reporter<W> {
    pub(crate) fn new(out: W, verbosity: Verbosity) -> Self {
        Reporter { out, verbosity }
    }

    pub(crate) fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{args}");
        let _ = self.out.flush();
    }

    pub(crate) fn progress(&mut self, args: fmt::Arguments<'_>) {
        if self.verbosity == Verbosity::Verbose {
            self.line(args);
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SelectionObserver for Reporter<W> {
    fn found(&mut self, device: &DeviceRecord) {
        self.progress(format_args!(
            "Found: {} @ ({:04X}:{:04X})",
            device.description(),
            device.vendor_id(),
            device.product_id()
        ));
        let detail = match (device.hardware_id(), device.interface()) {
            (Some(id), Some(mi)) => format!("{id} (interface {mi})"),
            (Some(id), None) => id.to_string(),
            (None, Some(mi)) => format!("interface {mi}"),
            (None, None) => return,
        };
        self.progress(format_args!("  {detail}"));
    }

    fn matched(&mut self, selected: &Match<'_>) {
        self.line(format_args!(
            "{},DRIVER:{},VERSION:{}",
            selected.target.tag(),
            selected.device.driver().unwrap_or_default(),
            selected.device.driver_version().unwrap_or_default()
        ));
    }
}
