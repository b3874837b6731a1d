//! Named simulation variables exchanged with the host.
//!
//! The host owns the variable store and lends it to the session for one
//! frame at a time. Booleans travel as `0.0`/`1.0` like every other value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub trait VariableRegistry {
    fn read(&self, name: &str) -> Option<f64>;

    fn write(&mut self, name: &str, value: f64);

    fn read_or(&self, name: &str, default: f64) -> f64 {
        self.read(name).unwrap_or(default)
    }

    /// Any non-zero, non-NaN value reads as `true`.
    fn read_bool(&self, name: &str) -> Option<bool> {
        self.read(name).map(|v| v != 0.0 && !v.is_nan())
    }

    fn write_bool(&mut self, name: &str, value: bool) {
        self.write(name, if value { 1.0 } else { 0.0 });
    }
}

/// In-memory registry, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryRegistry {
    values: BTreeMap<String, f64>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Overwrite every value present in `other`.
    pub fn merge(&mut self, other: &MemoryRegistry) {
        for (name, value) in other.iter() {
            self.write(name, value);
        }
    }
}

impl VariableRegistry for MemoryRegistry {
    fn read(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    fn write(&mut self, name: &str, value: f64) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }
}

impl FromIterator<(String, f64)> for MemoryRegistry {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools_round_trip_as_numbers() {
        let mut reg = MemoryRegistry::new();
        reg.write_bool("flag", true);
        assert_eq!(reg.read("flag"), Some(1.0));
        assert_eq!(reg.read_bool("flag"), Some(true));
        reg.write("flag", f64::NAN);
        assert_eq!(reg.read_bool("flag"), Some(false));
        assert_eq!(reg.read_bool("missing"), None);
    }

    #[test]
    fn merge_overwrites() {
        let mut a: MemoryRegistry = [("x".to_string(), 1.0), ("y".to_string(), 2.0)]
            .into_iter()
            .collect();
        let b: MemoryRegistry = [("y".to_string(), 5.0)].into_iter().collect();
        a.merge(&b);
        assert_eq!(a.read("x"), Some(1.0));
        assert_eq!(a.read("y"), Some(5.0));
        assert_eq!(a.len(), 2);
    }
}
