/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::error::ConfigError;

/***************************************/
/*             Constants               */
/***************************************/
pub const DEFAULT_WEIGHT: f64 = 70.0;
pub const DEFAULT_SWEEP_INTERVAL: u64 = 10;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub building: BuildingConfig,
    pub elevator: ElevatorConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub requests: Vec<ScriptedRequest>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BuildingConfig {
    pub n_floors: u8,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ElevatorConfig {
    pub count: usize,
    pub max_people: usize,
    pub max_weight: f64,
    #[serde(default = "default_start_floor")]
    pub start_floor: u8,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub tick_count: Option<u64>,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: u64,
    #[serde(default = "default_weight")]
    pub default_weight: f64,
}

/// A request submitted by the binary right after the clock starts.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScriptedRequest {
    pub origin: u8,
    pub dest: u8,
    #[serde(default)]
    pub weight: Option<f64>,
}

fn default_start_floor() -> u8 {
    1
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/***************************************/
/*             Public API              */
/***************************************/
impl Config {
    pub fn from_toml_str(config_str: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the simulation cannot start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n_floors = self.building.n_floors;
        if n_floors == 0 {
            return Err(ConfigError::InvalidFloorCount(n_floors));
        }
        if self.elevator.count == 0 {
            return Err(ConfigError::InvalidElevatorCount(self.elevator.count));
        }
        if self.elevator.max_people == 0 {
            return Err(ConfigError::InvalidMaxPeople(self.elevator.max_people));
        }
        if !self.elevator.max_weight.is_finite() || self.elevator.max_weight <= 0.0 {
            return Err(ConfigError::InvalidMaxWeight(self.elevator.max_weight));
        }
        if self.elevator.start_floor == 0 || self.elevator.start_floor > n_floors {
            return Err(ConfigError::InvalidStartFloor {
                floor: self.elevator.start_floor,
                n_floors,
            });
        }
        if self.simulation.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval(
                self.simulation.tick_interval_ms,
            ));
        }
        if !self.simulation.default_weight.is_finite() || self.simulation.default_weight < 0.0 {
            return Err(ConfigError::InvalidDefaultWeight(
                self.simulation.default_weight,
            ));
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Config::from_toml_str(&config_str)
}

/***************************************/
/*           Test utilities            */
/***************************************/
#[cfg(test)]
impl Config {
    pub fn test_config(n_floors: u8, count: usize, max_people: usize, max_weight: f64) -> Config {
        Config {
            building: BuildingConfig { n_floors },
            elevator: ElevatorConfig {
                count,
                max_people,
                max_weight,
                start_floor: 1,
            },
            simulation: SimulationConfig {
                tick_interval_ms: 1,
                tick_count: None,
                sweep_interval: DEFAULT_SWEEP_INTERVAL,
                default_weight: DEFAULT_WEIGHT,
            },
            requests: Vec::new(),
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
