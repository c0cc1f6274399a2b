// Hold-to-repeat for analog stick navigation
//
// A stick pushed past the deadzone fires once immediately, then repeats after
// the initial delay at the configured rate until it returns to center.

use std::time::{Duration, Instant};

use crate::config::StickConfig;
use crate::input::types::StickDirection;

#[derive(Debug, Clone, Default)]
pub struct StickRepeat {
    held: Option<StickDirection>,
    hold_start: Option<Instant>,
    last_repeat: Option<Instant>,
}

impl StickRepeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction currently held, if any
    pub fn held(&self) -> Option<StickDirection> {
        self.held
    }

    /// Feed the stick's current direction; returns a direction when one should fire
    pub fn update(
        &mut self,
        direction: Option<StickDirection>,
        now: Instant,
        config: &StickConfig,
    ) -> Option<StickDirection> {
        let Some(dir) = direction else {
            // Released stick (back to center)
            *self = Self::default();
            return None;
        };

        if self.held != Some(dir) {
            // Started holding a new direction
            self.held = Some(dir);
            self.hold_start = Some(now);
            self.last_repeat = Some(now);
            return Some(dir);
        }

        let hold_start = self.hold_start?;
        let last_repeat = self.last_repeat.unwrap_or(hold_start);
        let initial_delay = Duration::from_millis(config.initial_delay_ms);
        let repeat_rate = Duration::from_millis(config.repeat_rate_ms);

        if now.duration_since(hold_start) > initial_delay && now.duration_since(last_repeat) > repeat_rate {
            self.last_repeat = Some(now);
            Some(dir)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_immediately_then_waits_for_delay() {
        let config = StickConfig::default();
        let start = Instant::now();
        let mut repeat = StickRepeat::new();

        assert_eq!(repeat.update(Some(StickDirection::Down), start, &config), Some(StickDirection::Down));
        assert_eq!(repeat.update(Some(StickDirection::Down), start + ms(100), &config), None);
        assert_eq!(repeat.update(Some(StickDirection::Down), start + ms(290), &config), None);
        assert_eq!(
            repeat.update(Some(StickDirection::Down), start + ms(320), &config),
            Some(StickDirection::Down)
        );
        // Within the repeat rate
        assert_eq!(repeat.update(Some(StickDirection::Down), start + ms(360), &config), None);
        assert_eq!(
            repeat.update(Some(StickDirection::Down), start + ms(410), &config),
            Some(StickDirection::Down)
        );
    }

    #[test]
    fn direction_change_fires_immediately() {
        let config = StickConfig::default();
        let start = Instant::now();
        let mut repeat = StickRepeat::new();

        repeat.update(Some(StickDirection::Left), start, &config);
        assert_eq!(
            repeat.update(Some(StickDirection::Up), start + ms(10), &config),
            Some(StickDirection::Up)
        );
        assert_eq!(repeat.held(), Some(StickDirection::Up));
    }

    #[test]
    fn release_resets() {
        let config = StickConfig::default();
        let start = Instant::now();
        let mut repeat = StickRepeat::new();

        repeat.update(Some(StickDirection::Right), start, &config);
        assert_eq!(repeat.update(None, start + ms(20), &config), None);
        assert_eq!(repeat.held(), None);
        assert_eq!(
            repeat.update(Some(StickDirection::Right), start + ms(40), &config),
            Some(StickDirection::Right)
        );
    }
}
