use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{CommandFactory, Parser, error::ErrorKind};
use wdi::{DriverBackend, LogLevel};

use config::Config;
use error::CliError;
use install::*;
use list::*;
use report::{Reporter, Verbosity};

mod config;
mod error;
mod install;
mod list;
mod report;
#[cfg(test)]
mod testing;

/// Install a WinUSB driver onto known USB devices
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, disable_help_flag = true)]
struct Cli {
    /// print progress while running
    #[arg(short, long)]
    verbose: bool,
    /// list devices and report the known ones
    #[arg(short, long)]
    list: bool,
    /// switch the bootloader driver to WinUSB
    #[arg(short, long)]
    bootloader: bool,
    /// wait for Enter before exiting
    #[arg(short, long)]
    pause: bool,
    /// display usage, then carry on
    #[arg(short, long)]
    help: bool,
    /// target list (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// driver extraction directory (default: usb_driver)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,
    /// exit with a failure status when the installation fails
    #[arg(short, long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayVersion => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            usage();
            return ExitCode::SUCCESS;
        }
    };

    let verbosity = Verbosity::from_flag(cli.verbose);
    init_logging(verbosity);
    let mut reporter = Reporter::stdout(verbosity);

    if cli.help {
        usage();
    }

    let status = match run(&cli, &mut reporter) {
        Ok(status) => status,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    };

    if cli.pause {
        wait_for_enter();
    }
    status
}

fn run<W: Write>(
    cli: &Cli,
    reporter: &mut Reporter<W>,
) -> Result<ExitCode, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.dir {
        config.driver_dir = dir.clone();
    }

    let backend = wdi::default_backend();
    log::debug!("Using {} backend", backend.name());
    let level = LogLevel::from(log::max_level());
    if let Err(err) = backend.set_log_level(level) {
        log::warn!("Cannot set installer log level: {err}");
    }

    if wdi::is_x64() {
        reporter.progress(format_args!("Running on a 64 bit system"));
    } else {
        reporter.progress(format_args!("Running on a 32 bit system"));
    }

    Ok(ExitCode::from(run_with(&*backend, &config, cli, reporter)))
}

/// Run the requested passes and return the process exit status
///
/// The install result only turns into a failure status with `--strict`.
fn run_with<B, W>(
    backend: &B,
    config: &Config,
    cli: &Cli,
    reporter: &mut Reporter<W>,
) -> u8
where
    B: DriverBackend + ?Sized,
    W: Write,
{
    if cli.list {
        list_devices(backend, &config.targets, reporter);
    }

    if cli.bootloader {
        let outcome = install_targets(backend, config, reporter);
        reporter.line(format_args!("RETURN:{}", outcome.code()));
        if !outcome.is_success() {
            log::warn!("Installation failed: {}", outcome.message());
            if cli.strict {
                return 1;
            }
        }
    }
    0
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::new()
        .filter_level(verbosity.level_filter())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn usage() {
    println!();
    let _ = Cli::command().print_help();
    println!();
    wait_for_enter();
}

fn wait_for_enter() {
    println!("Press Enter to continue");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}
