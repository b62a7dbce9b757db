use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::{debug, info};

use qualitative_model::{EntityState, Envisionment, StateKey};

use crate::successors::next_states;
use crate::transitions::can_transition;

/// Explore every state reachable from `seed`, deduplicating by canonical
/// key, and return the owned envisionment graph. A state already in the
/// visited map is never re-expanded, so the traversal terminates on the
/// finite state universe.
pub fn build(seed: &EntityState) -> Envisionment {
    let mut nodes: BTreeMap<StateKey, EntityState> = BTreeMap::new();
    let mut edges: BTreeSet<(StateKey, StateKey)> = BTreeSet::new();
    let mut queue: VecDeque<EntityState> = VecDeque::new();

    nodes.insert(seed.canonical_key(), seed.clone());
    queue.push_back(seed.clone());

    while let Some(current) = queue.pop_front() {
        let current_key = current.canonical_key();
        let mut accepted = 0usize;
        for candidate in next_states(&current) {
            if !can_transition(&current, &candidate) {
                continue;
            }
            accepted += 1;
            let candidate_key = candidate.canonical_key();
            edges.insert((current_key.clone(), candidate_key.clone()));
            if !nodes.contains_key(&candidate_key) {
                nodes.insert(candidate_key, candidate.clone());
                queue.push_back(candidate);
            }
        }
        debug!(state = %current_key, successors = accepted, "expanded state");
    }

    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        "envisionment complete"
    );
    Envisionment::new(nodes, edges)
}

#[cfg(test)]
mod tests {
    use qualitative_model::Direction;

    use super::build;
    use crate::tests_support::{container, state_of};
    use crate::transitions::can_transition;

    #[test]
    fn seed_is_always_a_node() {
        let entity = container();
        let seed = state_of(
            &entity,
            &[
                ("volume", "ZERO", Direction::Neutral),
                ("inflow", "ZERO", Direction::Neutral),
                ("outflow", "ZERO", Direction::Neutral),
            ],
        );
        let graph = build(&seed);
        assert!(graph.contains(&seed.canonical_key()));
        assert!(graph.node_count() >= 1);
    }

    #[test]
    fn every_edge_joins_known_nodes_and_passes_the_heuristics() {
        let entity = container();
        let seed = state_of(
            &entity,
            &[
                ("volume", "ZERO", Direction::Neutral),
                ("inflow", "ZERO", Direction::Neutral),
                ("outflow", "ZERO", Direction::Neutral),
            ],
        );
        let graph = build(&seed);
        assert!(graph.edge_count() > 0);
        for (from, to) in graph.edges() {
            let source = &graph.nodes()[from];
            let target = &graph.nodes()[to];
            assert!(can_transition(source, target));
            assert_ne!(from, to);
        }
    }

    #[test]
    fn traversal_is_bounded_by_the_state_universe() {
        let entity = container();
        let seed = state_of(
            &entity,
            &[
                ("volume", "ZERO", Direction::Neutral),
                ("inflow", "ZERO", Direction::Neutral),
                ("outflow", "ZERO", Direction::Neutral),
            ],
        );
        let graph = build(&seed);
        // 2 * 4 magnitudes-derivative combos for inflow, 3 * 4 for outflow
        // and volume: 8 * 12 * 12 possible states overall.
        assert!(graph.node_count() <= 1152);
    }
}
