//! Region catalog: the states and cities a search can be scoped to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConectaError, Result};

pub const DEFAULT_STATE: &str = "PR";
pub const DEFAULT_CITY: &str = "Campo Largo";

/// A `(state, city)` pair scoping a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub state: String,
    pub city: String,
}

impl Region {
    pub fn new(state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(DEFAULT_STATE, DEFAULT_CITY)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state)
    }
}

/// One state with its display name and ordered cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub cities: Vec<String>,
}

/// Ordered state -> cities mapping. The first city of a state is its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCatalog {
    states: Vec<StateEntry>,
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self {
            states: vec![StateEntry {
                code: DEFAULT_STATE.to_string(),
                name: "Paraná".to_string(),
                cities: vec![DEFAULT_CITY.to_string()],
            }],
        }
    }
}

impl RegionCatalog {
    pub fn new(states: Vec<StateEntry>) -> Self {
        Self { states }
    }

    pub fn states(&self) -> &[StateEntry] {
        &self.states
    }

    fn find(&self, state: &str) -> Option<&StateEntry> {
        self.states.iter().find(|s| s.code == state)
    }

    /// Cities known for `state`, empty when the state is not configured.
    pub fn cities(&self, state: &str) -> &[String] {
        self.find(state).map(|s| s.cities.as_slice()).unwrap_or(&[])
    }

    /// The default city for `state`.
    pub fn first_city(&self, state: &str) -> Result<&str> {
        self.cities(state)
            .first()
            .map(String::as_str)
            .ok_or_else(|| ConectaError::UnknownRegion(state.to_string()))
    }

    pub fn contains(&self, state: &str, city: &str) -> bool {
        self.cities(state).iter().any(|c| c == city)
    }

    /// Add a city to a state, creating the state entry if needed.
    pub fn insert(&mut self, state: &str, name: &str, city: &str) {
        match self.states.iter_mut().find(|s| s.code == state) {
            Some(entry) => {
                if !entry.cities.iter().any(|c| c == city) {
                    entry.cities.push(city.to_string());
                }
            }
            None => self.states.push(StateEntry {
                code: state.to_string(),
                name: name.to_string(),
                cities: vec![city.to_string()],
            }),
        }
    }
}
