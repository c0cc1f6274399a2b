// Input device types

/// Gamepad buttons that can drive navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    Left,
    Right,
    Up,
    Down,
    ABtn,
    BBtn,
    XBtn,
    YBtn,
    StartBtn,
    SelectBtn,
    LB, // Left bumper (BTN_TL)
    RB, // Right bumper (BTN_TR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickDirection {
    Up,
    Down,
    Left,
    Right,
}

impl From<StickDirection> for PadButton {
    fn from(direction: StickDirection) -> Self {
        match direction {
            StickDirection::Up => PadButton::Up,
            StickDirection::Down => PadButton::Down,
            StickDirection::Left => PadButton::Left,
            StickDirection::Right => PadButton::Right,
        }
    }
}
