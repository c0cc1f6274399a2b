// InputDevice struct and poll implementation (I/O: calls fetch_events)

use std::time::Instant;

use evdev::*;

use crate::config::StickConfig;
use crate::input::pure::{calculate_stick_calibration, stick_direction, StickRepeat};
use crate::input::types::PadButton;

const MAX_EVENTS_PER_POLL: usize = 256;
const ENODEV: i32 = 19;

/// A gamepad opened in non-blocking mode
pub struct InputDevice {
    path: String,
    dev: Device,
    enabled: bool,
    // Current stick positions (updated by events, persisted between polls)
    stick_x: i32,
    stick_y: i32,
    stick_center: i32,
    stick_threshold: i32,
    repeat: StickRepeat,
}

impl InputDevice {
    pub fn name(&self) -> &str {
        self.dev.name().unwrap_or("")
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// False once the device disconnected or flooded events
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn disable(&mut self, reason: &str) {
        self.enabled = false;
        tracing::warn!(path = %self.path, "{reason}; disabling gamepad");
    }

    /// Read pending events and return at most one navigation button.
    ///
    /// Button presses win over the analog stick, which repeats while held.
    pub fn poll(&mut self, config: &StickConfig) -> Option<PadButton> {
        if !self.enabled {
            return None;
        }

        let mut btn: Option<PadButton> = None;
        let mut disabled_reason: Option<&str> = None;

        match self.dev.fetch_events() {
            Ok(events) => {
                for (count, event) in events.enumerate() {
                    if count >= MAX_EVENTS_PER_POLL {
                        disabled_reason = Some("exceeded max events per poll");
                        break;
                    }

                    btn = match event.destructure() {
                        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_X, val) => {
                            self.stick_x = val;
                            btn
                        }
                        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_Y, val) => {
                            self.stick_y = val;
                            btn
                        }
                        EventSummary::Key(_, KeyCode::BTN_SOUTH, 1) => Some(PadButton::ABtn),
                        EventSummary::Key(_, KeyCode::BTN_EAST, 1) => Some(PadButton::BBtn),
                        EventSummary::Key(_, KeyCode::BTN_NORTH, 1) => Some(PadButton::XBtn),
                        EventSummary::Key(_, KeyCode::BTN_WEST, 1) => Some(PadButton::YBtn),
                        EventSummary::Key(_, KeyCode::BTN_START, 1) => Some(PadButton::StartBtn),
                        EventSummary::Key(_, KeyCode::BTN_SELECT, 1) => Some(PadButton::SelectBtn),
                        EventSummary::Key(_, KeyCode::BTN_TL, 1) => Some(PadButton::LB),
                        EventSummary::Key(_, KeyCode::BTN_TR, 1) => Some(PadButton::RB),
                        // D-pad
                        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_HAT0X, -1) => {
                            Some(PadButton::Left)
                        }
                        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_HAT0X, 1) => {
                            Some(PadButton::Right)
                        }
                        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_HAT0Y, -1) => {
                            Some(PadButton::Up)
                        }
                        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_HAT0Y, 1) => {
                            Some(PadButton::Down)
                        }
                        _ => btn,
                    };
                }
            }
            Err(e) if e.raw_os_error() == Some(ENODEV) => {
                disabled_reason = Some("device disconnected");
            }
            // EAGAIN: nothing pending
            Err(_) => {}
        }

        if let Some(reason) = disabled_reason {
            self.disable(reason);
            return None;
        }

        if btn.is_some() {
            return btn;
        }

        let direction = stick_direction(self.stick_x, self.stick_y, self.stick_center, self.stick_threshold);
        self.repeat
            .update(direction, Instant::now(), config)
            .map(PadButton::from)
    }
}

/// Open every gamepad (a device exposing BTN_SOUTH) in non-blocking mode
pub fn scan_gamepads(config: &StickConfig) -> Vec<InputDevice> {
    let mut pads: Vec<InputDevice> = Vec::new();
    for (path, dev) in evdev::enumerate() {
        let is_gamepad = dev
            .supported_keys()
            .is_some_and(|keys| keys.contains(KeyCode::BTN_SOUTH));
        if !is_gamepad {
            continue;
        }

        if let Err(err) = dev.set_nonblocking(true) {
            tracing::warn!(path = %path.display(), "failed to set non-blocking mode: {err}");
            continue;
        }

        // Detect stick axis range from device info; default to signed 16-bit
        let (stick_center, stick_threshold) = dev
            .get_abs_state()
            .ok()
            .and_then(|abs| {
                abs.get(AbsoluteAxisCode::ABS_X.0 as usize)
                    .map(|x_info| calculate_stick_calibration(x_info.minimum, x_info.maximum, config.deadzone_percent))
            })
            .unwrap_or((0, 8000));

        tracing::info!(
            path = %path.display(),
            name = dev.name().unwrap_or(""),
            stick_center,
            stick_threshold,
            "gamepad found"
        );

        pads.push(InputDevice {
            path: path.display().to_string(),
            dev,
            enabled: true,
            stick_x: stick_center,
            stick_y: stick_center,
            stick_center,
            stick_threshold,
            repeat: StickRepeat::new(),
        });
    }
    pads.sort_by(|a, b| a.path.cmp(&b.path));
    pads
}
