// Stick calibration and direction classification (pure functions)

use crate::input::types::StickDirection;

/// Calculate stick center and threshold from axis min/max values.
/// Returns (center, threshold) where threshold is `deadzone_percent` of the range.
pub fn calculate_stick_calibration(min: i32, max: i32, deadzone_percent: u8) -> (i32, i32) {
    let center = (min + max) / 2;
    let range = i64::from(max) - i64::from(min);
    let threshold = range * i64::from(deadzone_percent.min(100)) / 100;
    (center, threshold as i32)
}

/// Direction a stick is pushed, or `None` inside the deadzone.
///
/// Vertical wins over horizontal when both axes are past the threshold.
pub fn stick_direction(x: i32, y: i32, center: i32, threshold: i32) -> Option<StickDirection> {
    if y < center - threshold {
        Some(StickDirection::Up)
    } else if y > center + threshold {
        Some(StickDirection::Down)
    } else if x < center - threshold {
        Some(StickDirection::Left)
    } else if x > center + threshold {
        Some(StickDirection::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- calculate_stick_calibration tests ---

    #[test]
    fn calibration_xbox_range() {
        // Standard Xbox unsigned range: 0 to 65535
        let (center, threshold) = calculate_stick_calibration(0, 65535, 25);
        assert_eq!(center, 32767);
        assert_eq!(threshold, 16383);
    }

    #[test]
    fn calibration_symmetric_signed_range() {
        let (center, threshold) = calculate_stick_calibration(-32768, 32767, 25);
        assert_eq!(center, 0); // -1 / 2 truncates toward zero
        assert_eq!(threshold, 16383);
    }

    #[test]
    fn calibration_zero_range() {
        assert_eq!(calculate_stick_calibration(0, 0, 25), (0, 0));
    }

    #[test]
    fn calibration_custom_deadzone() {
        assert_eq!(calculate_stick_calibration(0, 100, 10), (50, 10));
        assert_eq!(calculate_stick_calibration(0, 100, 250), (50, 100));
    }

    // --- stick_direction tests ---

    #[test]
    fn direction_inside_deadzone_is_none() {
        assert_eq!(stick_direction(0, 0, 0, 8000), None);
        assert_eq!(stick_direction(8000, -8000, 0, 8000), None);
    }

    #[test]
    fn direction_per_axis() {
        assert_eq!(stick_direction(0, -9000, 0, 8000), Some(StickDirection::Up));
        assert_eq!(stick_direction(0, 9000, 0, 8000), Some(StickDirection::Down));
        assert_eq!(stick_direction(-9000, 0, 0, 8000), Some(StickDirection::Left));
        assert_eq!(stick_direction(9000, 0, 0, 8000), Some(StickDirection::Right));
    }

    #[test]
    fn direction_vertical_wins_on_diagonal() {
        assert_eq!(stick_direction(9000, 9000, 0, 8000), Some(StickDirection::Down));
    }
}
