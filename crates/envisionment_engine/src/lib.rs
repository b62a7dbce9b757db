//! Envisionment engine: evaluates cause-effect relations, generates every
//! syntactically reachable successor of a qualitative state, prunes
//! candidates with continuity heuristics, and explores the reachable state
//! graph from a seed.

pub mod builder;
pub mod effects;
pub mod successors;
pub mod transitions;

#[cfg(test)]
pub(crate) mod tests_support;

pub use builder::build;
pub use effects::{combine, direct_effect, indirect_effect, relation_effects};
pub use successors::{
    correspondence_requirements, enumerate_all_states, next_derivatives, next_magnitudes,
    next_states,
};
pub use transitions::{
    can_transition, continuous, correspondence_holds, distinct, extremity_respected,
    point_range_consistent, state_valid,
};
