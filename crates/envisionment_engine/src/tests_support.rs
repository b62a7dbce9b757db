//! Shared fixtures for the unit tests: the classic container model.

use std::sync::Arc;

use qualitative_model::{
    Correlation, Direction, Entity, EntityState, LandmarkRef, Quantity, QuantitySpace, Relation,
};

pub(crate) fn container() -> Arc<Entity> {
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

pub(crate) fn state_of(
    entity: &Arc<Entity>,
    assignments: &[(&str, &str, Direction)],
) -> EntityState {
    EntityState::from_landmarks(entity.clone(), assignments).unwrap()
}
