use qualitative_model::{Direction, EntityState, Relation};

/// Continuity heuristic: a derivative may not flip between opposite signs
/// without passing through neutral, and a magnitude may move at most one
/// landmark per step.
pub fn continuous(source: &EntityState, candidate: &EntityState) -> bool {
    source.values().iter().all(|(name, source_pair)| {
        let Some(candidate_pair) = candidate.pair(name) else {
            return false;
        };
        let flips = matches!(
            (source_pair.derivative, candidate_pair.derivative),
            (Direction::Negative, Direction::Positive)
                | (Direction::Positive, Direction::Negative)
        );
        !flips && source_pair.magnitude.distance(candidate_pair.magnitude) <= 1
    })
}

/// Point-before-range heuristic: quantities changing magnitude in one step
/// must be uniformly point-valued or uniformly interval-valued, classified
/// by the magnitude they are leaving.
pub fn point_range_consistent(source: &EntityState, candidate: &EntityState) -> bool {
    let mut point_changed = false;
    let mut interval_changed = false;
    for (name, source_pair) in source.values() {
        let Some(candidate_pair) = candidate.pair(name) else {
            return false;
        };
        if source_pair.magnitude == candidate_pair.magnitude {
            continue;
        }
        if source_pair.magnitude.is_point() {
            point_changed = true;
        } else {
            interval_changed = true;
        }
    }
    !(point_changed && interval_changed)
}

/// No-op transitions are never emitted.
pub fn distinct(source: &EntityState, candidate: &EntityState) -> bool {
    source != candidate
}

/// All transition heuristics together.
pub fn can_transition(source: &EntityState, candidate: &EntityState) -> bool {
    continuous(source, candidate)
        && point_range_consistent(source, candidate)
        && distinct(source, candidate)
}

/// Every value correspondence read as a biconditional: the left quantity
/// sits at its landmark iff the right quantity sits at its landmark.
pub fn correspondence_holds(state: &EntityState) -> bool {
    let entity = state.entity();
    entity.relations().iter().all(|relation| {
        let Relation::ValueCorrespondence { left, right } = relation else {
            return true;
        };
        let matches_side = |quantity: &str, landmark: &str| {
            entity
                .quantity(quantity)
                .and_then(|q| q.space.ordinal_of(landmark))
                .zip(state.pair(quantity))
                .is_some_and(|(ordinal, pair)| pair.magnitude == ordinal)
        };
        matches_side(&left.quantity, &left.landmark) == matches_side(&right.quantity, &right.landmark)
    })
}

/// No point magnitude at a space boundary may carry a derivative pointing
/// further outward. Trailing intervals are open on their outer side and are
/// exempt.
pub fn extremity_respected(state: &EntityState) -> bool {
    let entity = state.entity();
    state.values().iter().all(|(name, pair)| {
        let Some(quantity) = entity.quantity(name) else {
            return false;
        };
        if !pair.magnitude.is_point() {
            return true;
        }
        let outward_low =
            pair.magnitude == quantity.space.bottom() && pair.derivative == Direction::Negative;
        let outward_high =
            pair.magnitude == quantity.space.top() && pair.derivative == Direction::Positive;
        !(outward_low || outward_high)
    })
}

/// Standalone state validity, independent of any transition. Used to prune
/// the enumerated universe and to annotate diagnostic output.
pub fn state_valid(state: &EntityState) -> bool {
    correspondence_holds(state) && extremity_respected(state)
}
