use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How to order two combatants with equal current Speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedTieRule {
    /// One draw from the battle RNG decides who goes first.
    #[default]
    CoinFlip,
    /// Side one always goes first.
    PlayerOneFirst,
}

/// Battle settings read from a RON file. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Fixed seed for every random draw. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub speed_tie: SpeedTieRule,
    /// Directory holding `moves.ron` and `species.ron`. `None` uses the built-in tables.
    pub data_dir: Option<PathBuf>,
}

impl BattleConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_ron_str(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_ron_str(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("empty struct", "()", BattleConfig::default())]
    #[case(
        "seed only",
        "(seed: Some(7))",
        BattleConfig { seed: Some(7), ..BattleConfig::default() }
    )]
    #[case(
        "all fields",
        r#"(seed: Some(42), speed_tie: PlayerOneFirst, data_dir: Some("assets"))"#,
        BattleConfig {
            seed: Some(42),
            speed_tie: SpeedTieRule::PlayerOneFirst,
            data_dir: Some(PathBuf::from("assets")),
        }
    )]
    fn test_parse_config(#[case] desc: &str, #[case] text: &str, #[case] expected: BattleConfig) {
        assert_eq!(BattleConfig::from_ron_str(text), Ok(expected), "{}", desc);
    }

    #[test]
    fn test_default_tie_rule_is_coin_flip() {
        assert_eq!(BattleConfig::default().speed_tie, SpeedTieRule::CoinFlip);
    }

    #[test]
    fn test_bad_config_reports_path() {
        assert!(BattleConfig::from_ron_str("(speed_tie: Sometimes)").is_err());

        let missing = Path::new("/no/such/battle.ron");
        match BattleConfig::load(missing) {
            Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected an Io error, got {:?}", other),
        }
    }
}
