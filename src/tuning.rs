//! Runtime balance for every simulation
//!
//! Missing fields keep their compiled defaults, so a tuning file only needs
//! the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::{FlockConfig, LanderConfig, SiegeConfig, SortConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub flock: FlockConfig,
    pub lander: LanderConfig,
    pub siege: SiegeConfig,
    pub sorting: SortConfig,
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning = serde_json::from_str(json)?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
