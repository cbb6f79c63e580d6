use pendulum_engine::paint::Color;

/// Environment variable selecting how the minute and hour hands move.
pub const HAND_MODE_VAR: &str = "PENDULUM_HANDS";

/// How the minute and hour hands are posed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum HandMode {
    /// Minute at -150°, hour at -300°; only the second hand sweeps.
    #[default]
    Fixed,
    /// Minute and hour hands follow elapsed time.
    Live,
}

impl HandMode {
    /// Parses `fixed` or `live`, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixed" => Some(Self::Fixed),
            "live" => Some(Self::Live),
            _ => None,
        }
    }
}

/// Application configuration for the clock window and scene.
#[derive(Debug, Clone)]
pub struct ClockConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: f64,
    pub height: f64,
    pub clear_color: Color,
    /// Segment count of every disc in the scene.
    pub circle_segments: u32,
    pub hand_mode: HandMode,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            title: "3D Pendulum Clock".to_string(),
            width: 900.0,
            height: 700.0,
            clear_color: Color::new(0.88, 0.94, 0.98),
            circle_segments: 64,
            hand_mode: HandMode::Fixed,
        }
    }
}

impl ClockConfig {
    /// Defaults, overridden by `PENDULUM_HANDS` when it is set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(HAND_MODE_VAR) {
            match HandMode::parse(&raw) {
                Some(mode) => config.hand_mode = mode,
                None => log::warn!(
                    "{HAND_MODE_VAR}={raw:?} is not one of fixed|live; keeping {:?}",
                    config.hand_mode
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_clock_window() {
        let config = ClockConfig::default();
        assert_eq!(config.title, "3D Pendulum Clock");
        assert_eq!((config.width, config.height), (900.0, 700.0));
        assert_eq!(config.circle_segments, 64);
        assert_eq!(config.hand_mode, HandMode::Fixed);
    }

    #[test]
    fn live_mode_is_opt_in() {
        let config = ClockConfig::from_lookup(|k| (k == HAND_MODE_VAR).then(|| " Live ".to_string()));
        assert_eq!(config.hand_mode, HandMode::Live);

        let config = ClockConfig::from_lookup(|_| None);
        assert_eq!(config.hand_mode, HandMode::Fixed);
    }

    #[test]
    fn unknown_mode_keeps_default() {
        let config = ClockConfig::from_lookup(|_| Some("realtime".to_string()));
        assert_eq!(config.hand_mode, HandMode::Fixed);
    }
}
