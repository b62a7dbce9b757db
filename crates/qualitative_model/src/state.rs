use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::direction::Direction;
use crate::entity::Entity;
use crate::error::ModelError;
use crate::space::Magnitude;

/// One quantity's instantaneous qualitative state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantityPair {
    pub magnitude: Magnitude,
    pub derivative: Direction,
}

impl QuantityPair {
    pub const fn new(magnitude: Magnitude, derivative: Direction) -> Self {
        Self {
            magnitude,
            derivative,
        }
    }
}

/// Canonical identity of an entity state: entity name plus, per quantity in
/// sorted-name order, the magnitude ordinal and derivative code. Two states
/// built from the same mappings in any insertion order share one key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey(String);

impl StateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable snapshot of every quantity of an entity. Every transformation
/// produces a new value; equality and hashing go through the canonical key.
#[derive(Clone, Debug)]
pub struct EntityState {
    entity: Arc<Entity>,
    values: BTreeMap<String, QuantityPair>,
}

impl EntityState {
    /// Build from already-resolved pairs. The caller guarantees coverage;
    /// the invariant is asserted, not propagated.
    pub fn new(entity: Arc<Entity>, values: BTreeMap<String, QuantityPair>) -> Self {
        assert_eq!(
            values.len(),
            entity.quantities().len(),
            "state must carry exactly one pair per quantity"
        );
        for (name, pair) in &values {
            let quantity = entity
                .quantity(name)
                .unwrap_or_else(|| panic!("state mentions undeclared quantity '{name}'"));
            assert!(
                quantity.space.contains(pair.magnitude),
                "magnitude out of range for '{name}'"
            );
        }
        Self { entity, values }
    }

    /// Build from landmark names, validating against the entity's spaces.
    pub fn from_landmarks(
        entity: Arc<Entity>,
        assignments: &[(&str, &str, Direction)],
    ) -> Result<Self, ModelError> {
        let mut values = BTreeMap::new();
        for (name, landmark, derivative) in assignments {
            let quantity = entity
                .quantity(name)
                .ok_or_else(|| ModelError::ForeignQuantity(name.to_string()))?;
            let magnitude = quantity.space.ordinal_of(landmark).ok_or_else(|| {
                ModelError::UnknownLandmark {
                    quantity: name.to_string(),
                    landmark: landmark.to_string(),
                }
            })?;
            values.insert(name.to_string(), QuantityPair::new(magnitude, *derivative));
        }
        for name in entity.quantities().keys() {
            if !values.contains_key(name) {
                return Err(ModelError::MissingQuantity(name.clone()));
            }
        }
        Ok(Self { entity, values })
    }

    pub fn entity(&self) -> &Arc<Entity> {
        &self.entity
    }

    pub fn values(&self) -> &BTreeMap<String, QuantityPair> {
        &self.values
    }

    pub fn pair(&self, name: &str) -> Option<QuantityPair> {
        self.values.get(name).copied()
    }

    pub fn canonical_key(&self) -> StateKey {
        let mut key = String::with_capacity(self.entity.name().len() + self.values.len() * 8);
        key.push_str(self.entity.name());
        for (name, pair) in &self.values {
            key.push('_');
            key.push_str(name);
            key.push('_');
            key.push_str(&pair.magnitude.ordinal().to_string());
            key.push_str(&pair.derivative.code().to_string());
        }
        StateKey(key)
    }

    /// Human-readable rendering with landmark names, for traces and labels.
    pub fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(self.values.len());
        for (name, pair) in &self.values {
            let landmark = self
                .entity
                .quantity(name)
                .and_then(|q| q.space.name_of(pair.magnitude))
                .unwrap_or("?");
            parts.push(format!("{name}: {landmark} {}", pair.derivative));
        }
        parts.join(", ")
    }
}

impl PartialEq for EntityState {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl Eq for EntityState {}

impl Hash for EntityState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key().hash(state);
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
