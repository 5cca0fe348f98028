use serde::{Deserialize, Serialize};

/// Gravity timing and speed-up constants of a game session.
///
/// Speeds are frame thresholds: the falling piece moves one row down once
/// the frame counter exceeds the threshold, so smaller values fall faster.
///
/// Missing fields fall back to their defaults when deserialized.
///
/// # Example
///
/// ```
/// use tilefall_engine::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "start_speed": 30 }"#).unwrap();
/// assert_eq!(config.start_speed, 30);
/// assert_eq!(config.fast_speed, SessionConfig::default().fast_speed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Threshold at the start of a game.
    pub start_speed: u32,
    /// Threshold while soft drop is held, and the fastest regular speed.
    pub fast_speed: u32,
    /// Points needed for each one-step speed-up.
    pub speedup_score_step: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_speed: 50,
            fast_speed: 1,
            speedup_score_step: 20,
        }
    }
}
