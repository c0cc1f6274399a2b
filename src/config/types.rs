use serde::{Deserialize, Serialize};

/// How the next focus target is ranked for directional input
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Nearest neighbour by screen position. When nothing placed lies that way,
    /// controls without a known rect are reached in tree order
    #[default]
    Spatial,
    /// Tree order: Right/Down move forward, Left/Up move backward
    TreeOrder,
}

/// What the refresh hook does when the focused control is gone or ineligible
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FocusRecovery {
    /// Drop focus; the next directional input picks the first candidate
    #[default]
    Clear,
    /// Move focus to the first eligible candidate in tree order
    ReacquireFirst,
}

/// Analog stick navigation tuning
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StickConfig {
    /// Delay before a held stick starts repeating
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Time between repeats once repeating
    #[serde(default = "default_repeat_rate_ms")]
    pub repeat_rate_ms: u64,
    /// Deadzone as a percentage of the full axis range
    #[serde(default = "default_deadzone_percent")]
    pub deadzone_percent: u8,
}

fn default_initial_delay_ms() -> u64 {
    300
}

fn default_repeat_rate_ms() -> u64 {
    80
}

fn default_deadzone_percent() -> u8 {
    25
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            repeat_rate_ms: default_repeat_rate_ms(),
            deadzone_percent: default_deadzone_percent(),
        }
    }
}

/// Navigation configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NavConfig {
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
    /// Tree-order navigation wraps from the last control to the first
    #[serde(default = "default_wrap_around")]
    pub wrap_around: bool,
    #[serde(default)]
    pub focus_recovery: FocusRecovery,
    #[serde(default)]
    pub stick: StickConfig,
    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_wrap_around() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            selection_policy: SelectionPolicy::Spatial,
            wrap_around: default_wrap_around(),
            focus_recovery: FocusRecovery::Clear,
            stick: StickConfig::default(),
            log_level: default_log_level(),
        }
    }
}
