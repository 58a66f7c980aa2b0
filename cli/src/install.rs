use std::io::Write;

use wdi::{DeviceSelector, DriverBackend, InstallOutcome, ListOptions, WdiError};

use crate::{config::Config, report::Reporter};

/// Install WinUSB onto every connected device whose target allows it
///
/// Each match is prepared then installed; a failure does not stop the
/// remaining matches. The outcome of the last attempt is returned, or
/// [WdiError::NotFound] when no device qualified.
pub(crate) fn install_targets<B, W>(
    backend: &B,
    config: &Config,
    reporter: &mut Reporter<W>,
) -> InstallOutcome
where
    B: DriverBackend + ?Sized,
    W: Write,
{
    let list = match backend.create_list(&ListOptions::all()) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("Device enumeration failed: {err}");
            return InstallOutcome::new(backend, Err(err));
        }
    };
    reporter.progress(format_args!("Enumerated {} device(s)", list.len()));

    let selected =
        DeviceSelector::new(&config.targets).select(list.devices(), reporter);

    let mut outcome = None;
    for found in selected.iter().filter(|m| m.target.install()) {
        let inf_name = found.target.inf_name();
        reporter.progress(format_args!(
            "Installing {} using inf name: {inf_name}",
            found.target.description()
        ));

        let result = backend
            .prepare_driver(
                &list,
                found.device,
                &config.driver_dir,
                inf_name,
                &config.prepare,
            )
            .inspect_err(|err| log::warn!("Driver preparation failed: {err}"))
            .and_then(|()| {
                reporter.progress(format_args!("Successful driver prepare!"));
                backend.install_driver(
                    &list,
                    found.device,
                    &config.driver_dir,
                    inf_name,
                    &config.install,
                )
            });

        let attempt = InstallOutcome::new(backend, result);
        reporter.progress(format_args!(
            "got return code: {}={}",
            attempt.code(),
            attempt.message()
        ));
        outcome = Some(attempt);
    }

    drop(selected);
    list.release();

    outcome.unwrap_or_else(|| {
        log::info!("No device to install a driver for");
        InstallOutcome::new(backend, Err(WdiError::NotFound))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{report::Verbosity, testing::MockBackend};
    use wdi::{DeviceRecord, TargetSet, TargetSpec};

    fn bootloader(desc: &str) -> DeviceRecord {
        DeviceRecord::new(desc, 0x0483, 0xdf11)
    }

    #[test]
    fn test_install_bootloader() {
        let backend = MockBackend::new(vec![
            DeviceRecord::new("Peachy Printer", 0x16d0, 0x0af3),
            bootloader("STM32 BOOTLOADER").with_driver("STTub30", 3),
        ]);
        let mut reporter = Reporter::new(Vec::new(), Verbosity::Silent);
        let outcome =
            install_targets(&backend, &Config::default(), &mut reporter);

        assert!(outcome.is_success());
        assert_eq!(
            backend.calls(),
            vec![
                "prepare 1 usb_driver stm32_bootloader.inf",
                "install 1 usb_driver stm32_bootloader.inf",
            ]
        );
        assert_eq!(backend.releases(), 1);
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "PEACHY,DRIVER:,VERSION:0\nBOOTLOADER,DRIVER:STTub30,VERSION:3\n"
        );
    }

    #[test]
    fn test_continue_after_failure() {
        let mut backend = MockBackend::new(vec![
            bootloader("first"),
            bootloader("second"),
        ]);
        backend.fail_prepare_at(0, WdiError::Busy);
        let mut reporter = Reporter::new(Vec::new(), Verbosity::Verbose);
        let outcome =
            install_targets(&backend, &Config::default(), &mut reporter);

        assert!(outcome.is_success());
        assert_eq!(
            backend.calls(),
            vec![
                "prepare 0 usb_driver stm32_bootloader.inf",
                "prepare 1 usb_driver stm32_bootloader.inf",
                "install 1 usb_driver stm32_bootloader.inf",
            ]
        );
        assert_eq!(backend.releases(), 1);

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("got return code: -6=Resource busy"));
        assert!(out.contains("got return code: 0=Success"));
    }

    #[test]
    fn test_last_outcome_wins() {
        let mut backend =
            MockBackend::new(vec![bootloader("first"), bootloader("second")]);
        backend.fail_install_at(1, WdiError::NeedsAdmin);
        let outcome = install_targets(
            &backend,
            &Config::default(),
            &mut Reporter::new(Vec::new(), Verbosity::Silent),
        );
        assert_eq!(outcome.code(), -15);
    }

    #[test]
    fn test_nothing_to_install() {
        let backend = MockBackend::new(vec![DeviceRecord::new(
            "Peachy Printer",
            0x16d0,
            0x0af3,
        )]);
        let outcome = install_targets(
            &backend,
            &Config::default(),
            &mut Reporter::new(Vec::new(), Verbosity::Silent),
        );
        assert_eq!(outcome.code(), WdiError::NotFound.code());
        assert!(backend.calls().is_empty());
        assert_eq!(backend.releases(), 1);
    }

    #[test]
    fn test_configured_targets() {
        let backend = MockBackend::new(vec![DeviceRecord::new(
            "Peachy Printer",
            0x16d0,
            0x0af3,
        )]);
        let config = Config {
            targets: TargetSet::new(vec![
                TargetSpec::peachy()
                    .installable(true)
                    .with_inf_name("peachy.inf"),
            ])
            .unwrap(),
            driver_dir: "drivers".into(),
            ..Config::default()
        };
        let outcome = install_targets(
            &backend,
            &config,
            &mut Reporter::new(Vec::new(), Verbosity::Silent),
        );
        assert!(outcome.is_success());
        assert_eq!(
            backend.calls(),
            vec!["prepare 0 drivers peachy.inf", "install 0 drivers peachy.inf"]
        );
    }

    #[test]
    fn test_enumeration_failure() {
        let backend = MockBackend::failing(WdiError::Resource);
        let outcome = install_targets(
            &backend,
            &Config::default(),
            &mut Reporter::new(Vec::new(), Verbosity::Silent),
        );
        assert_eq!(outcome.code(), -11);
        assert_eq!(backend.releases(), 0);
    }
}
