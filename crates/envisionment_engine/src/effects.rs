use std::collections::{BTreeMap, BTreeSet};

use qualitative_model::{Correlation, Direction, EntityState, Relation, RelationKind};

/// Effect of an Influence relation: the target's derivative is pushed by the
/// sign of the source's magnitude, flipped by the correlation.
pub fn direct_effect(correlation: Correlation, magnitude_sign: i8) -> Direction {
    Direction::from_sign(correlation.factor() as i64 * magnitude_sign as i64)
}

/// Effect of a Proportional relation: the target's derivative follows the
/// source's derivative. An ambiguous source stays ambiguous.
pub fn indirect_effect(correlation: Correlation, derivative: Direction) -> Direction {
    match derivative.sign() {
        Some(sign) => Direction::from_sign(correlation.factor() as i64 * sign as i64),
        None => Direction::Ambiguous,
    }
}

/// Per-quantity effect sets exerted by all relations of one kind, evaluated
/// against the given state. Every quantity is keyed; quantities with no
/// incoming relation of the kind map to an empty set.
pub fn relation_effects(
    state: &EntityState,
    kind: RelationKind,
) -> BTreeMap<String, BTreeSet<Direction>> {
    let entity = state.entity();
    let mut effects: BTreeMap<String, BTreeSet<Direction>> = entity
        .quantities()
        .keys()
        .map(|name| (name.clone(), BTreeSet::new()))
        .collect();

    for relation in entity.relations() {
        if relation.kind() != Some(kind) {
            continue;
        }
        let effect = match relation {
            Relation::Influence {
                source,
                target: _,
                correlation,
            } => {
                let Some(pair) = state.pair(source) else {
                    continue;
                };
                let Some(quantity) = entity.quantity(source) else {
                    continue;
                };
                direct_effect(*correlation, quantity.space.magnitude_sign(pair.magnitude))
            }
            Relation::Proportional {
                source,
                target: _,
                correlation,
            } => {
                let Some(pair) = state.pair(source) else {
                    continue;
                };
                indirect_effect(*correlation, pair.derivative)
            }
            Relation::ValueCorrespondence { .. } => continue,
        };
        if let Some(target) = relation.target() {
            if let Some(set) = effects.get_mut(target) {
                set.insert(effect);
            }
        }
    }

    effects
}

/// Combine simultaneous effects into one verdict: neutral effects carry no
/// push and are dropped; a single remaining direction wins; disagreement is
/// ambiguous. An ambiguous member participates under the same rule.
pub fn combine(effects: &BTreeSet<Direction>) -> Direction {
    let mut significant = effects.iter().filter(|d| **d != Direction::Neutral);
    match (significant.next(), significant.next()) {
        (None, _) => Direction::Neutral,
        (Some(direction), None) => *direction,
        (Some(_), Some(_)) => Direction::Ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::{combine, direct_effect, indirect_effect, relation_effects};
    use qualitative_model::{
        Correlation, Direction, Entity, EntityState, Quantity, QuantitySpace, Relation,
        RelationKind,
    };

    fn set(directions: &[Direction]) -> BTreeSet<Direction> {
        directions.iter().copied().collect()
    }

    #[test]
    fn direct_effect_follows_magnitude_sign() {
        assert_eq!(direct_effect(Correlation::Positive, 0), Direction::Neutral);
        assert_eq!(direct_effect(Correlation::Positive, 1), Direction::Positive);
        assert_eq!(direct_effect(Correlation::Negative, 1), Direction::Negative);
        assert_eq!(direct_effect(Correlation::Negative, -1), Direction::Positive);
    }

    #[test]
    fn indirect_effect_follows_derivative() {
        assert_eq!(
            indirect_effect(Correlation::Negative, Direction::Positive),
            Direction::Negative
        );
        assert_eq!(
            indirect_effect(Correlation::Positive, Direction::Neutral),
            Direction::Neutral
        );
        assert_eq!(
            indirect_effect(Correlation::Negative, Direction::Ambiguous),
            Direction::Ambiguous
        );
    }

    #[test]
    fn combine_drops_neutral_and_flags_disagreement() {
        assert_eq!(combine(&set(&[])), Direction::Neutral);
        assert_eq!(combine(&set(&[Direction::Neutral])), Direction::Neutral);
        assert_eq!(combine(&set(&[Direction::Positive])), Direction::Positive);
        assert_eq!(
            combine(&set(&[Direction::Neutral, Direction::Negative])),
            Direction::Negative
        );
        assert_eq!(
            combine(&set(&[Direction::Positive, Direction::Negative])),
            Direction::Ambiguous
        );
        assert_eq!(
            combine(&set(&[Direction::Ambiguous])),
            Direction::Ambiguous
        );
        assert_eq!(
            combine(&set(&[Direction::Ambiguous, Direction::Positive])),
            Direction::Ambiguous
        );
    }

    fn two_quantity_state(
        relations: Vec<Relation>,
        volume: (&str, Direction),
        outflow: (&str, Direction),
    ) -> EntityState {
        let entity = Arc::new(
            Entity::new(
                "container",
                vec![
                    Quantity::new("volume", QuantitySpace::new(["ZERO", "PLUS", "MAX"])),
                    Quantity::new("outflow", QuantitySpace::new(["ZERO", "PLUS", "MAX"])),
                ],
                relations,
            )
            .unwrap(),
        );
        EntityState::from_landmarks(
            entity,
            &[
                ("volume", volume.0, volume.1),
                ("outflow", outflow.0, outflow.1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn relation_effects_keys_every_quantity() {
        let state = two_quantity_state(
            Vec::new(),
            ("PLUS", Direction::Positive),
            ("PLUS", Direction::Positive),
        );
        let effects = relation_effects(&state, RelationKind::Proportional);
        assert_eq!(effects.len(), 2);
        assert!(effects["volume"].is_empty());
        assert!(effects["outflow"].is_empty());
    }

    #[test]
    fn relation_effects_selects_by_kind() {
        let relations = vec![
            Relation::influence("volume", "outflow", Correlation::Positive),
            Relation::proportional("volume", "outflow", Correlation::Negative),
        ];
        let state = two_quantity_state(
            relations,
            ("PLUS", Direction::Positive),
            ("PLUS", Direction::Positive),
        );

        let direct = relation_effects(&state, RelationKind::Influence);
        assert_eq!(direct["outflow"], set(&[Direction::Positive]));
        assert!(direct["volume"].is_empty());

        let indirect = relation_effects(&state, RelationKind::Proportional);
        assert_eq!(indirect["outflow"], set(&[Direction::Negative]));
    }
}
