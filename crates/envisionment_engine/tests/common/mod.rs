use std::sync::Arc;

use qualitative_model::{
    Correlation, Direction, Entity, EntityState, LandmarkRef, Quantity, QuantitySpace, Relation,
};

/// The classic container model: exogenous inflow, volume driven by both
/// flows, outflow proportional to volume and tied to it at ZERO and MAX.
pub fn container() -> Arc<Entity> {
    let quantities = vec![
        Quantity::new("inflow", QuantitySpace::new(["ZERO", "PLUS"])),
        Quantity::new("outflow", QuantitySpace::new(["ZERO", "PLUS", "MAX"])),
        Quantity::new("volume", QuantitySpace::new(["ZERO", "PLUS", "MAX"])),
    ];
    let relations = vec![
        Relation::influence("inflow", "volume", Correlation::Positive),
        Relation::influence("outflow", "volume", Correlation::Negative),
        Relation::proportional("volume", "outflow", Correlation::Positive),
        Relation::correspondence(
            LandmarkRef::new("volume", "MAX"),
            LandmarkRef::new("outflow", "MAX"),
        ),
        Relation::correspondence(
            LandmarkRef::new("volume", "ZERO"),
            LandmarkRef::new("outflow", "ZERO"),
        ),
    ];
    Arc::new(Entity::new("container", quantities, relations).unwrap())
}

pub fn state_of(entity: &Arc<Entity>, assignments: &[(&str, &str, Direction)]) -> EntityState {
    EntityState::from_landmarks(entity.clone(), assignments).unwrap()
}

pub fn all_neutral_seed(entity: &Arc<Entity>) -> EntityState {
    state_of(
        entity,
        &[
            ("volume", "ZERO", Direction::Neutral),
            ("inflow", "ZERO", Direction::Neutral),
            ("outflow", "ZERO", Direction::Neutral),
        ],
    )
}
