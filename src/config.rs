//! Calculator limits, with defaults and environment overrides.

use std::env;
use std::str::FromStr;

/// Environment variable overriding [`Config::max_digits`].
pub const MAX_DIGITS_VAR: &str = "INTCALC_MAX_DIGITS";
/// Environment variable overriding [`Config::history_count`].
pub const HISTORY_COUNT_VAR: &str = "INTCALC_HISTORY_COUNT";

/// Limits consumed by the caller of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest number of decimal digits a result may have.
    pub max_digits: u32,
    /// Number of history entries kept by a
    /// [`Calculator`](crate::Calculator).
    pub history_count: usize,
}

impl Config {
    pub const DEFAULT_MAX_DIGITS: u32 = 10;
    pub const DEFAULT_HISTORY_COUNT: usize = 5;

    /// Defaults: 10 digits, 5 history entries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_digits: Self::DEFAULT_MAX_DIGITS,
            history_count: Self::DEFAULT_HISTORY_COUNT,
        }
    }

    /// Read overrides from `INTCALC_MAX_DIGITS` and
    /// `INTCALC_HISTORY_COUNT`. Unset or unparsable values keep
    /// their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new();
        Self {
            max_digits: read_var(&lookup, MAX_DIGITS_VAR, defaults.max_digits),
            history_count: read_var(&lookup, HISTORY_COUNT_VAR, defaults.history_count),
        }
    }

    #[must_use]
    pub const fn with_max_digits(mut self, max_digits: u32) -> Self {
        self.max_digits = max_digits;
        self
    }

    #[must_use]
    pub const fn with_history_count(mut self, history_count: usize) -> Self {
        self.history_count = history_count;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        log::warn!("ignoring {name}={raw:?}: not a valid number, using {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let owned: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| {
            owned
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.max_digits, 10);
        assert_eq!(config.history_count, 5);
    }

    #[test]
    fn overrides_from_lookup() {
        let config = Config::from_lookup(vars(&[
            (MAX_DIGITS_VAR, "12"),
            (HISTORY_COUNT_VAR, " 3 "),
        ]));
        assert_eq!(config, Config::new().with_max_digits(12).with_history_count(3));
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = Config::from_lookup(vars(&[
            (MAX_DIGITS_VAR, "lots"),
            (HISTORY_COUNT_VAR, "-1"),
        ]));
        assert_eq!(config, Config::new());
    }

    #[test]
    fn huge_history_count_builds_calculator() {
        let config = Config::from_lookup(vars(&[(
            HISTORY_COUNT_VAR,
            "18446744073709551615",
        )]));
        let calc = crate::Calculator::new(config);
        assert_eq!(calc.history().count(), 0);
    }

    #[test]
    fn missing_values_fall_back() {
        assert_eq!(Config::from_lookup(vars(&[])), Config::new());
    }
}
