use std::fmt;

/// Configuration errors, surfaced at construction time. Nothing here is
/// recoverable mid-traversal; a model that constructs is a model the engine
/// can run to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    DuplicateQuantity(String),
    /// A relation references a quantity name the entity does not declare.
    UnknownQuantity(String),
    /// A correspondence references a landmark absent from the quantity's space.
    UnknownLandmark { quantity: String, landmark: String },
    /// A state is missing the entry for a declared quantity.
    MissingQuantity(String),
    /// A state carries an entry for a quantity the entity does not declare.
    ForeignQuantity(String),
    /// A state magnitude falls outside its quantity's space.
    MagnitudeOutOfRange { quantity: String, ordinal: usize },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateQuantity(name) => {
                write!(f, "quantity '{name}' is declared more than once")
            }
            Self::UnknownQuantity(name) => {
                write!(f, "relation references unknown quantity '{name}'")
            }
            Self::UnknownLandmark { quantity, landmark } => {
                write!(f, "quantity '{quantity}' has no landmark '{landmark}'")
            }
            Self::MissingQuantity(name) => {
                write!(f, "state is missing an entry for quantity '{name}'")
            }
            Self::ForeignQuantity(name) => {
                write!(f, "state mentions undeclared quantity '{name}'")
            }
            Self::MagnitudeOutOfRange { quantity, ordinal } => {
                write!(f, "magnitude ordinal {ordinal} is outside the space of '{quantity}'")
            }
        }
    }
}

impl std::error::Error for ModelError {}
