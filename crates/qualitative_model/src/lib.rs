//! Value types for qualitative models: quantity spaces built from ordered
//! landmarks, cause-effect relations between quantities, and immutable
//! snapshots of an entity's qualitative state.

pub mod direction;
pub mod entity;
pub mod error;
pub mod graph;
pub mod relation;
pub mod space;
pub mod state;

pub use direction::{Correlation, Direction};
pub use entity::{Entity, Quantity};
pub use error::ModelError;
pub use graph::Envisionment;
pub use relation::{LandmarkRef, Relation, RelationKind};
pub use space::{Magnitude, QuantitySpace};
pub use state::{EntityState, QuantityPair, StateKey};
