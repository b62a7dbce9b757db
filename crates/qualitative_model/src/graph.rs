use std::collections::{BTreeMap, BTreeSet};

use crate::state::{EntityState, StateKey};

/// The finite directed graph of qualitatively distinct states reachable
/// from a seed. Built once by the envisionment builder, read-only after.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Envisionment {
    nodes: BTreeMap<StateKey, EntityState>,
    edges: BTreeSet<(StateKey, StateKey)>,
}

impl Envisionment {
    pub fn new(
        nodes: BTreeMap<StateKey, EntityState>,
        edges: BTreeSet<(StateKey, StateKey)>,
    ) -> Self {
        let graph = Self { nodes, edges };
        assert!(graph.edges_have_known_endpoints());
        graph
    }

    pub fn nodes(&self) -> &BTreeMap<StateKey, EntityState> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<(StateKey, StateKey)> {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn successors<'a>(&'a self, key: &'a StateKey) -> impl Iterator<Item = &'a StateKey> {
        self.edges
            .iter()
            .filter(move |(from, _)| from == key)
            .map(|(_, to)| to)
    }

    fn edges_have_known_endpoints(&self) -> bool {
        self.edges
            .iter()
            .all(|(from, to)| self.nodes.contains_key(from) && self.nodes.contains_key(to))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Arc;

    use super::Envisionment;
    use crate::entity::{Entity, Quantity};
    use crate::space::QuantitySpace;
    use crate::state::EntityState;
    use crate::Direction;

    fn state(derivative: Direction) -> EntityState {
        let entity = Arc::new(
            Entity::new(
                "probe",
                vec![Quantity::new("level", QuantitySpace::new(["ZERO", "PLUS"]))],
                Vec::new(),
            )
            .unwrap(),
        );
        EntityState::from_landmarks(entity, &[("level", "ZERO", derivative)]).unwrap()
    }

    #[test]
    fn graph_exposes_nodes_edges_and_successors() {
        let a = state(Direction::Neutral);
        let b = state(Direction::Positive);
        let (ka, kb) = (a.canonical_key(), b.canonical_key());

        let mut nodes = BTreeMap::new();
        nodes.insert(ka.clone(), a);
        nodes.insert(kb.clone(), b);
        let mut edges = BTreeSet::new();
        edges.insert((ka.clone(), kb.clone()));

        let graph = Envisionment::new(nodes, edges);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains(&ka));
        assert_eq!(graph.successors(&ka).collect::<Vec<_>>(), vec![&kb]);
        assert_eq!(graph.successors(&kb).count(), 0);
    }
}
