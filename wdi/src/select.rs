use crate::{DeviceRecord, TargetSet, TargetSpec};

/// A device paired with one target it matched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match<'a> {
    pub device: &'a DeviceRecord,
    pub target: &'a TargetSpec,
}

/// Receives selection events as the device list is walked
pub trait SelectionObserver {
    /// Called once per device, in enumeration order
    fn found(&mut self, _device: &DeviceRecord) {}
    /// Called once per (device, target) pair, right after `found`
    fn matched(&mut self, _selected: &Match<'_>) {}
}

impl SelectionObserver for () {}

/// Filters enumerated devices against a [TargetSet]
pub struct DeviceSelector<'t> {
    targets: &'t TargetSet,
}

impl<'t> DeviceSelector<'t> {
    pub fn new(targets: &'t TargetSet) -> Self {
        DeviceSelector { targets }
    }

    /// Walk `devices` once, in order, and return every (device, target)
    /// pair whose IDs match. A device matching several targets appears
    /// once per target. No match is an empty result, not an error.
    pub fn select<'a, O>(
        &self,
        devices: &'a [DeviceRecord],
        observer: &mut O,
    ) -> Vec<Match<'a>>
    where
        't: 'a,
        O: SelectionObserver + ?Sized,
    {
        let targets: &'a TargetSet = self.targets;
        let mut selected = Vec::new();
        for device in devices {
            observer.found(device);
            for target in
                targets.matching(device.vendor_id(), device.product_id())
            {
                let found = Match { device, target };
                observer.matched(&found);
                selected.push(found);
            }
        }
        log::debug!(
            "{} of {} device(s) matched a target",
            selected.len(),
            devices.len()
        );
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeviceList;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SelectionObserver for Recorder {
        fn found(&mut self, device: &DeviceRecord) {
            self.events.push(format!("found {}", device.position()));
        }

        fn matched(&mut self, selected: &Match<'_>) {
            self.events.push(format!(
                "{} {}",
                selected.target.tag(),
                selected.device.driver().unwrap_or_default()
            ));
        }
    }

    fn devices() -> DeviceList {
        DeviceList::new(vec![
            DeviceRecord::new("Hub", 0x1d6b, 0x0002),
            DeviceRecord::new("STM32 BOOTLOADER", 0x0483, 0xdf11)
                .with_driver("STTub30", 0x0003_0000_0000_0000),
            DeviceRecord::new("Keyboard", 0x046d, 0xc31c),
            DeviceRecord::new("Peachy Printer", 0x16d0, 0x0af3)
                .with_driver("usbser", 1),
        ])
    }

    #[test]
    fn test_visits_in_order() {
        let targets = TargetSet::default();
        let list = devices();
        let mut recorder = Recorder::default();
        let selected =
            DeviceSelector::new(&targets).select(list.devices(), &mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "found 0",
                "found 1",
                "BOOTLOADER STTub30",
                "found 2",
                "found 3",
                "PEACHY usbser",
            ]
        );
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].device.position(), 1);
        assert_eq!(selected[0].target.tag(), "BOOTLOADER");
        assert_eq!(selected[1].device.driver_version(), Some(1));
        assert_eq!(selected[1].target.tag(), "PEACHY");
    }

    #[test]
    fn test_empty_list() {
        let targets = TargetSet::default();
        let list = DeviceList::empty();
        let mut recorder = Recorder::default();
        let selected =
            DeviceSelector::new(&targets).select(list.devices(), &mut recorder);
        assert!(selected.is_empty());
        assert!(recorder.events.is_empty());
        list.release();
    }

    #[test]
    fn test_no_match() {
        let targets = TargetSet::default();
        let list = DeviceList::new(vec![DeviceRecord::new("Mouse", 1, 2)]);
        let mut recorder = Recorder::default();
        let selected =
            DeviceSelector::new(&targets).select(list.devices(), &mut recorder);
        assert!(selected.is_empty());
        assert_eq!(recorder.events, vec!["found 0"]);
    }

    #[test]
    fn test_multiple_targets() {
        let targets = TargetSet::new(vec![
            TargetSpec::new("DFU", "Any DFU", 0x0483, 0xdf11),
            TargetSpec::peachy(),
            TargetSpec::bootloader(),
        ])
        .unwrap();
        let list = devices();
        let selected =
            DeviceSelector::new(&targets).select(list.devices(), &mut ());

        let tags: Vec<_> = selected.iter().map(|m| m.target.tag()).collect();
        assert_eq!(tags, vec!["DFU", "BOOTLOADER", "PEACHY"]);
        assert!(std::ptr::eq(selected[0].device, selected[1].device));
    }
}
