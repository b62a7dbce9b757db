use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::trace;

use qualitative_model::{
    Direction, Entity, EntityState, Magnitude, QuantityPair, Relation, RelationKind,
};

use crate::effects::{combine, relation_effects};

/// Magnitude step directions a stored derivative can drive. An ambiguous
/// derivative may move either way.
fn signs_of(derivative: Direction) -> &'static [i8] {
    match derivative {
        Direction::Negative => &[-1],
        Direction::Neutral => &[0],
        Direction::Positive => &[1],
        Direction::Ambiguous => &[-1, 1],
    }
}

/// Forced next-step landmarks implied by value correspondences, applied
/// directionally as declared: a quantity holding the left landmark forces
/// the right quantity onto the right landmark. Every quantity is keyed;
/// unforced quantities map to an empty set.
pub fn correspondence_requirements(state: &EntityState) -> BTreeMap<String, BTreeSet<Magnitude>> {
    let entity = state.entity();
    let mut requirements: BTreeMap<String, BTreeSet<Magnitude>> = entity
        .quantities()
        .keys()
        .map(|name| (name.clone(), BTreeSet::new()))
        .collect();

    for relation in entity.relations() {
        let Relation::ValueCorrespondence { left, right } = relation else {
            continue;
        };
        let held = entity
            .quantity(&left.quantity)
            .and_then(|q| q.space.ordinal_of(&left.landmark))
            .zip(state.pair(&left.quantity))
            .is_some_and(|(landmark, pair)| pair.magnitude == landmark);
        if !held {
            continue;
        }
        if let Some(forced) = entity
            .quantity(&right.quantity)
            .and_then(|q| q.space.ordinal_of(&right.landmark))
        {
            if let Some(set) = requirements.get_mut(&right.quantity) {
                set.insert(forced);
            }
        }
    }

    requirements
}

/// Every magnitude assignment reachable in one qualitative step. An empty
/// result marks a logical contradiction between forced landmarks, pruning
/// the branch silently.
pub fn next_magnitudes(state: &EntityState) -> Vec<BTreeMap<String, Magnitude>> {
    let entity = state.entity();
    let requirements = correspondence_requirements(state);

    let mut options: BTreeMap<String, Vec<Magnitude>> = BTreeMap::new();
    for (name, pair) in state.values() {
        let Some(quantity) = entity.quantity(name) else {
            continue;
        };
        let forced = &requirements[name];
        if forced.len() > 1 {
            // Conflicting correspondence requirements: the combination is
            // infeasible, not an error.
            return Vec::new();
        }
        if let Some(landmark) = forced.iter().next() {
            options.insert(name.clone(), vec![*landmark]);
            continue;
        }

        let mut candidates = BTreeSet::new();
        for sign in signs_of(pair.derivative) {
            candidates.insert(quantity.space.step(pair.magnitude, *sign));
        }
        if pair.magnitude.is_interval() {
            candidates.insert(pair.magnitude);
        }
        if entity.is_exogenous(name) {
            // Externally driven quantities may hold or drift either way.
            candidates.insert(pair.magnitude);
            candidates.insert(quantity.space.step(pair.magnitude, -1));
            candidates.insert(quantity.space.step(pair.magnitude, 1));
        }
        options.insert(name.clone(), candidates.into_iter().collect());
    }

    assignments(&options)
}

/// Derivative values reachable in one step from `current` under `effect`.
fn move_candidates(current: Direction, effect: Direction) -> BTreeSet<Direction> {
    let Some(current_sign) = current.sign() else {
        // A stored ambiguous derivative resolves toward the effect.
        return match effect {
            Direction::Ambiguous => [
                Direction::Negative,
                Direction::Neutral,
                Direction::Positive,
            ]
            .into_iter()
            .collect(),
            Direction::Neutral => [Direction::Neutral].into_iter().collect(),
            signed => [signed].into_iter().collect(),
        };
    };

    // A resting derivative adopts a signed effect outright.
    if current == Direction::Neutral
        && matches!(effect, Direction::Positive | Direction::Negative)
    {
        return [effect].into_iter().collect();
    }

    let mut candidates = BTreeSet::new();
    candidates.insert(current);
    match effect.sign() {
        Some(effect_sign) => {
            candidates.insert(step_toward(current_sign, effect_sign));
        }
        None => {
            // Ambiguous effect: every direction reachable by a single step
            // toward either sign.
            candidates.insert(step_toward(current_sign, 1));
            candidates.insert(step_toward(current_sign, -1));
        }
    }
    candidates
}

fn step_toward(current_sign: i8, target_sign: i8) -> Direction {
    let stepped = current_sign + (target_sign - current_sign).signum();
    Direction::from_sign(stepped as i64)
}

fn clipped_at_extreme(state: &EntityState, name: &str, pair: QuantityPair) -> bool {
    let Some(quantity) = state.entity().quantity(name) else {
        return false;
    };
    if !pair.magnitude.is_point() {
        return false;
    }
    let outward_low =
        pair.magnitude == quantity.space.bottom() && pair.derivative == Direction::Negative;
    let outward_high =
        pair.magnitude == quantity.space.top() && pair.derivative == Direction::Positive;
    outward_low || outward_high
}

/// Every derivative assignment reachable in one qualitative step, driven by
/// the combined Influence and Proportional effects evaluated against the
/// current state.
pub fn next_derivatives(state: &EntityState) -> Vec<BTreeMap<String, Direction>> {
    let entity = state.entity();
    let direct = relation_effects(state, RelationKind::Influence);
    let indirect = relation_effects(state, RelationKind::Proportional);

    let mut options: BTreeMap<String, Vec<Direction>> = BTreeMap::new();
    for (name, pair) in state.values() {
        let mut merged = direct[name].clone();
        merged.extend(indirect[name].iter().copied());
        let effect = combine(&merged);

        let candidates = if clipped_at_extreme(state, name, *pair) {
            // A point value cannot overshoot the end of its space.
            [Direction::Neutral].into_iter().collect()
        } else if entity.is_exogenous(name) {
            move_candidates(pair.derivative, Direction::Ambiguous)
        } else {
            move_candidates(pair.derivative, effect)
        };
        options.insert(name.clone(), candidates.into_iter().collect());
    }

    assignments(&options)
}

/// Raw candidate successors: Cartesian product of magnitude assignments and
/// derivative assignments, deduplicated by canonical key. Transition
/// heuristics are applied separately.
pub fn next_states(state: &EntityState) -> Vec<EntityState> {
    let entity = state.entity();
    let magnitudes = next_magnitudes(state);
    let derivatives = next_derivatives(state);
    trace!(
        magnitude_assignments = magnitudes.len(),
        derivative_assignments = derivatives.len(),
        "generating raw successors"
    );

    let mut seen = BTreeSet::new();
    let mut states = Vec::new();
    for magnitude_assignment in &magnitudes {
        for derivative_assignment in &derivatives {
            let values: BTreeMap<String, QuantityPair> = magnitude_assignment
                .iter()
                .map(|(name, magnitude)| {
                    let pair = QuantityPair::new(*magnitude, derivative_assignment[name]);
                    (name.clone(), pair)
                })
                .collect();
            let candidate = EntityState::new(entity.clone(), values);
            if seen.insert(candidate.canonical_key()) {
                states.push(candidate);
            }
        }
    }
    states
}

/// The full state universe of an entity: every (magnitude, derivative)
/// combination per quantity, independent of any relation.
pub fn enumerate_all_states(entity: &Arc<Entity>) -> Vec<EntityState> {
    let mut options: BTreeMap<String, Vec<QuantityPair>> = BTreeMap::new();
    for (name, quantity) in entity.quantities() {
        let mut pairs = Vec::with_capacity(quantity.space.len() * Direction::ALL.len());
        for ordinal in 0..quantity.space.len() {
            for derivative in Direction::ALL {
                pairs.push(QuantityPair::new(Magnitude(ordinal), derivative));
            }
        }
        options.insert(name.clone(), pairs);
    }

    assignments(&options)
        .into_iter()
        .map(|values| EntityState::new(entity.clone(), values))
        .collect()
}

/// Cartesian product of per-quantity choices. Any empty choice list empties
/// the whole product.
fn assignments<T: Clone>(options: &BTreeMap<String, Vec<T>>) -> Vec<BTreeMap<String, T>> {
    let mut result: Vec<BTreeMap<String, T>> = vec![BTreeMap::new()];
    for (name, choices) in options {
        if choices.is_empty() {
            return Vec::new();
        }
        let mut extended = Vec::with_capacity(result.len() * choices.len());
        for partial in &result {
            for choice in choices {
                let mut assignment = partial.clone();
                assignment.insert(name.clone(), choice.clone());
                extended.push(assignment);
            }
        }
        result = extended;
    }
    result
}
