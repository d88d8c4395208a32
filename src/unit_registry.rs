//! Unit registry for looking up measurement units by ID.

use crate::measurement_unit::{DisparityUnit, MeasurementUnit, NumberUnit, RatioUnit};
use std::collections::HashMap;

/// Stores measurement units and enables lookup by ID.
pub struct UnitRegistry {
    units: HashMap<String, Box<dyn MeasurementUnit>>,
}

impl UnitRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
        }
    }

    /// Registers a unit. Returns an error if a unit with the same ID already exists.
    pub fn register(&mut self, unit: Box<dyn MeasurementUnit>) -> Result<(), String> {
        let id = unit.id().to_string();
        if self.units.contains_key(&id) {
            return Err(format!("unit with id '{id}' is already registered"));
        }
        self.units.insert(id, unit);
        Ok(())
    }

    /// Looks up a unit by ID.
    pub fn resolve(&self, id: &str) -> Result<&dyn MeasurementUnit, String> {
        self.units
            .get(id)
            .map(|u| u.as_ref())
            .ok_or_else(|| format!("unknown unit id: '{id}'"))
    }

    /// Returns a registry pre-populated with the standard units
    /// ([`NumberUnit`], [`RatioUnit`], [`DisparityUnit`]).
    pub fn standard() -> Self {
        let mut r = Self::new();
        // Standard units are guaranteed unique; unwrap is safe.
        r.register(Box::new(NumberUnit)).unwrap();
        r.register(Box::new(RatioUnit)).unwrap();
        r.register(Box::new(DisparityUnit)).unwrap();
        r
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
