use dealer_odds;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid value in config: {0}")]
    Value(#[from] serde::de::value::Error),
    #[error(transparent)]
    Rule(#[from] dealer_odds::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub rule: ConfigRule,
    pub dealer_simulator: ConfigDealerSimulator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRule {
    pub number_of_decks: u8,
    pub penetration: f64,
    pub expansion_policy: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = dealer_odds::Rule::default();
        Self {
            number_of_decks: rule.number_of_decks,
            penetration: rule.penetration,
            expansion_policy: String::from("Memoized"),
            seed: rule.seed,
        }
    }
}

impl TryInto<dealer_odds::Rule> for ConfigRule {
    type Error = ConfigError;

    fn try_into(self) -> Result<dealer_odds::Rule, Self::Error> {
        let rule = dealer_odds::Rule {
            number_of_decks: self.number_of_decks,
            penetration: self.penetration,
            expansion_policy: self.expansion_policy.parse()?,
            seed: self.seed,
        };
        rule.validate()?;

        Ok(rule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SimulatorMode {
    /// Play full dealer rounds, each ending with "END".
    Rounds,
    /// Deal a single card and estimate the dealer's outcome from it.
    SingleHit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDealerSimulator {
    pub mode: SimulatorMode,
    pub number_of_rounds: u32,
}

impl Default for ConfigDealerSimulator {
    fn default() -> Self {
        Self {
            mode: SimulatorMode::Rounds,
            number_of_rounds: 5,
        }
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename)?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}
