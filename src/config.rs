//! Environment configuration.

use std::env;

const DEFAULT_SPEED: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    pub log_path: Option<String>,
    pub log_filter: Option<String>,
    /// Playback multiplier; `2.0` plays the script twice as fast.
    pub speed: f64,
    pub plain: bool,
    pub hide_pointer: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_filter: None,
            speed: DEFAULT_SPEED,
            plain: false,
            hide_pointer: false,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            log_path: env_string_opt("WALKTHROUGH_LOG"),
            log_filter: env_string_opt("WALKTHROUGH_LOG_FILTER"),
            speed: env_speed("WALKTHROUGH_SPEED"),
            plain: env_flag("WALKTHROUGH_PLAIN"),
            hide_pointer: env_flag("WALKTHROUGH_HIDE_POINTER"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_speed(key: &str) -> f64 {
    env_string_opt(key)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|speed| speed.is_finite() && *speed > 0.0)
        .unwrap_or(DEFAULT_SPEED)
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults() {
        let _lock = env_lock();
        let _g1 = set_env_guard("WALKTHROUGH_LOG", None);
        let _g2 = set_env_guard("WALKTHROUGH_LOG_FILTER", None);
        let _g3 = set_env_guard("WALKTHROUGH_SPEED", None);
        let _g4 = set_env_guard("WALKTHROUGH_PLAIN", None);
        let _g5 = set_env_guard("WALKTHROUGH_HIDE_POINTER", None);

        assert_eq!(EnvConfig::from_env(), EnvConfig::default());
    }

    #[test]
    fn env_values_are_read() {
        let _lock = env_lock();
        let _g1 = set_env_guard("WALKTHROUGH_LOG", Some("/tmp/walkthrough.log"));
        let _g2 = set_env_guard("WALKTHROUGH_LOG_FILTER", Some("mise_walkthrough=trace"));
        let _g3 = set_env_guard("WALKTHROUGH_SPEED", Some("2.5"));
        let _g4 = set_env_guard("WALKTHROUGH_PLAIN", Some("1"));
        let _g5 = set_env_guard("WALKTHROUGH_HIDE_POINTER", Some("1"));

        let config = EnvConfig::from_env();
        assert_eq!(config.log_path.as_deref(), Some("/tmp/walkthrough.log"));
        assert_eq!(config.log_filter.as_deref(), Some("mise_walkthrough=trace"));
        assert_eq!(config.speed, 2.5);
        assert!(config.plain);
        assert!(config.hide_pointer);
    }

    #[test]
    fn invalid_speed_falls_back_to_default() {
        let _lock = env_lock();
        for raw in ["fast", "0", "-1", "inf", "  "] {
            let _g = set_env_guard("WALKTHROUGH_SPEED", Some(raw));
            assert_eq!(EnvConfig::from_env().speed, 1.0, "speed {raw:?}");
        }
    }

    #[test]
    fn empty_log_path_is_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("WALKTHROUGH_LOG", Some(""));
        let config = EnvConfig::from_env();
        assert!(config.log_path.is_none());
    }
}
