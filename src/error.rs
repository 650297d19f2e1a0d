/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*            Error types              */
/***************************************/

/// Fatal configuration problems. Raised before any simulation state exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("floor count must be positive, got {0}")]
    InvalidFloorCount(u8),

    #[error("elevator count must be positive, got {0}")]
    InvalidElevatorCount(usize),

    #[error("max_people must be positive, got {0}")]
    InvalidMaxPeople(usize),

    #[error("max_weight must be a positive number, got {0}")]
    InvalidMaxWeight(f64),

    #[error("tick interval must be at least 1 ms, got {0}")]
    InvalidTickInterval(u64),

    #[error("start floor {floor} is outside 1..={n_floors}")]
    InvalidStartFloor { floor: u8, n_floors: u8 },

    #[error("default weight must be a non-negative number, got {0}")]
    InvalidDefaultWeight(f64),
}

/// Reasons a submitted request is turned away. No state changes on rejection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmitError {
    #[error("floor {floor} is outside 1..={n_floors}")]
    FloorOutOfRange { floor: u8, n_floors: u8 },

    #[error("origin and destination are both floor {0}")]
    SameFloor(u8),

    #[error("weight {0} is not a valid passenger weight")]
    InvalidWeight(f64),
}
