//! Simulation configuration structures and loaders.
use std::env;

use duel_core::BattleConfig;

/// How notifications are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EventFormat {
    /// One human-readable line per notification.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Configuration for one simulated duel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub seed: u64,
    /// Turn cap; the duel stops undecided once this many turns have started.
    pub max_turns: u32,
    pub battle: BattleConfig,
    pub event_format: EventFormat,
}

impl SimConfig {
    pub const DEFAULT_SEED: u64 = 0x5eed;
    pub const DEFAULT_MAX_TURNS: u32 = 60;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_SEED` - Battle seed for critical rolls (default: 0x5eed)
    /// - `DUEL_MAX_TURNS` - Turn cap (default: 60, minimum 1)
    /// - `DUEL_MANA_REGEN_PERCENT` - Mana regenerated per turn (default: 10)
    /// - `DUEL_STAMINA_REGEN_PERCENT` - Stamina regenerated per turn (default: 10)
    /// - `DUEL_SHIELD_BONUS` - Shield element damage bonus (default: 5)
    /// - `DUEL_EVENT_FORMAT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`SimConfig::from_env`], reading values through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_var::<u64>(&lookup, "DUEL_SEED") {
            config.seed = seed;
        }

        if let Some(turns) = read_var::<u32>(&lookup, "DUEL_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        if let Some(percent) = read_var::<u32>(&lookup, "DUEL_MANA_REGEN_PERCENT") {
            config.battle.mana_regen_percent = percent;
        }

        if let Some(percent) = read_var::<u32>(&lookup, "DUEL_STAMINA_REGEN_PERCENT") {
            config.battle.stamina_regen_percent = percent;
        }

        if let Some(bonus) = read_var::<u32>(&lookup, "DUEL_SHIELD_BONUS") {
            config.battle.shield_element_bonus = bonus;
        }

        if let Some(format) = read_var::<EventFormat>(&lookup, "DUEL_EVENT_FORMAT") {
            config.event_format = format;
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            max_turns: Self::DEFAULT_MAX_TURNS,
            battle: BattleConfig::default(),
            event_format: EventFormat::default(),
        }
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(SimConfig::from_vars(vars(&[])), SimConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = SimConfig::from_vars(vars(&[
            ("DUEL_SEED", "42"),
            ("DUEL_MAX_TURNS", "0"),
            ("DUEL_MANA_REGEN_PERCENT", "25"),
            ("DUEL_SHIELD_BONUS", " 9 "),
            ("DUEL_EVENT_FORMAT", "JSON"),
        ]));

        assert_eq!(config.seed, 42);
        assert_eq!(config.max_turns, 1);
        assert_eq!(config.battle.mana_regen_percent, 25);
        assert_eq!(config.battle.stamina_regen_percent, 10);
        assert_eq!(config.battle.shield_element_bonus, 9);
        assert_eq!(config.event_format, EventFormat::Json);
    }

    #[test]
    fn malformed_values_are_ignored() {
        let config = SimConfig::from_vars(vars(&[("DUEL_SEED", "many"), ("DUEL_EVENT_FORMAT", "xml")]));
        assert_eq!(config.seed, SimConfig::DEFAULT_SEED);
        assert_eq!(config.event_format, EventFormat::Text);
    }
}
