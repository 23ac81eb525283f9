//! Capability classification of an evdev node.

use std::fmt;

use evdev::{AbsoluteAxisType, Key, RelativeAxisType};

/// Highest key code that still counts as a keyboard key (`BTN_MISC` - 1).
const LAST_KEYBOARD_CODE: u16 = 0xff;

/// What kind of input a node produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub keyboard: bool,
    pub pointer: bool,
    pub touch: bool,
    pub switch: bool,
    /// Reports absolute X/Y, which makes a calibration matrix meaningful.
    pub absolute: bool,
}

impl Capabilities {
    /// Classify from raw event codes.
    pub fn classify(
        keys: impl IntoIterator<Item = u16>,
        relative: impl IntoIterator<Item = u16>,
        absolute: impl IntoIterator<Item = u16>,
        has_switches: bool,
    ) -> Self {
        let keys: Vec<u16> = keys.into_iter().collect();
        let relative: Vec<u16> = relative.into_iter().collect();
        let absolute: Vec<u16> = absolute.into_iter().collect();

        let has_key = |key: Key| keys.contains(&key.code());
        let has_abs = |axis: AbsoluteAxisType| absolute.contains(&axis.0);

        let abs_xy = has_abs(AbsoluteAxisType::ABS_X) && has_abs(AbsoluteAxisType::ABS_Y);
        let rel_xy = relative.contains(&RelativeAxisType::REL_X.0)
            && relative.contains(&RelativeAxisType::REL_Y.0);
        let touch = has_abs(AbsoluteAxisType::ABS_MT_POSITION_X)
            || (abs_xy && has_key(Key::BTN_TOUCH) && !has_key(Key::BTN_TOOL_FINGER));

        Self {
            keyboard: keys
                .iter()
                .any(|code| *code != 0 && *code <= LAST_KEYBOARD_CODE),
            pointer: rel_xy || (abs_xy && has_key(Key::BTN_LEFT)) || has_key(Key::BTN_TOOL_FINGER),
            touch,
            switch: has_switches,
            absolute: abs_xy,
        }
    }

    /// Read the capabilities of an open device.
    #[must_use]
    pub fn of(device: &evdev::Device) -> Self {
        Self::classify(
            device
                .supported_keys()
                .map(|keys| keys.iter().map(|key| key.code()).collect::<Vec<_>>())
                .unwrap_or_default(),
            device
                .supported_relative_axes()
                .map(|axes| axes.iter().map(|axis| axis.0).collect::<Vec<_>>())
                .unwrap_or_default(),
            device
                .supported_absolute_axes()
                .map(|axes| axes.iter().map(|axis| axis.0).collect::<Vec<_>>())
                .unwrap_or_default(),
            device
                .supported_switches()
                .is_some_and(|switches| switches.iter().next().is_some()),
        )
    }

    /// No capability the seat core cares about.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.keyboard || self.pointer || self.touch || self.switch)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.keyboard, "keyboard"),
            (self.pointer, "pointer"),
            (self.touch, "touch"),
            (self.switch, "switch"),
        ];
        let mut first = true;
        for (_, name) in names.iter().filter(|(set, _)| *set) {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}
