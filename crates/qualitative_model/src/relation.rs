use crate::direction::Correlation;

/// A (quantity, landmark) reference used by value correspondences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandmarkRef {
    pub quantity: String,
    pub landmark: String,
}

impl LandmarkRef {
    pub fn new(quantity: impl Into<String>, landmark: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            landmark: landmark.into(),
        }
    }
}

/// Cause-effect relation between two quantities of one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    /// The target's derivative is driven by the source's magnitude.
    Influence {
        source: String,
        target: String,
        correlation: Correlation,
    },
    /// The target's derivative is driven by the source's derivative.
    Proportional {
        source: String,
        target: String,
        correlation: Correlation,
    },
    /// Biconditional landmark constraint: left holds iff right holds.
    ValueCorrespondence { left: LandmarkRef, right: LandmarkRef },
}

/// Selector for the two derivative-driving relation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    Influence,
    Proportional,
}

impl Relation {
    pub fn influence(
        source: impl Into<String>,
        target: impl Into<String>,
        correlation: Correlation,
    ) -> Self {
        Relation::Influence {
            source: source.into(),
            target: target.into(),
            correlation,
        }
    }

    pub fn proportional(
        source: impl Into<String>,
        target: impl Into<String>,
        correlation: Correlation,
    ) -> Self {
        Relation::Proportional {
            source: source.into(),
            target: target.into(),
            correlation,
        }
    }

    pub fn correspondence(left: LandmarkRef, right: LandmarkRef) -> Self {
        Relation::ValueCorrespondence { left, right }
    }

    /// Kind of a derivative-driving relation; correspondences have none.
    pub fn kind(&self) -> Option<RelationKind> {
        match self {
            Relation::Influence { .. } => Some(RelationKind::Influence),
            Relation::Proportional { .. } => Some(RelationKind::Proportional),
            Relation::ValueCorrespondence { .. } => None,
        }
    }

    /// Quantity whose derivative this relation drives, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Relation::Influence { target, .. } | Relation::Proportional { target, .. } => {
                Some(target)
            }
            Relation::ValueCorrespondence { .. } => None,
        }
    }

    /// Quantity names this relation mentions.
    pub fn referenced_quantities(&self) -> Vec<&str> {
        match self {
            Relation::Influence { source, target, .. }
            | Relation::Proportional { source, target, .. } => vec![source, target],
            Relation::ValueCorrespondence { left, right } => {
                vec![&left.quantity, &right.quantity]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LandmarkRef, Relation, RelationKind};
    use crate::Correlation;

    #[test]
    fn kind_and_target_follow_the_variant() {
        let inf = Relation::influence("inflow", "volume", Correlation::Positive);
        assert_eq!(inf.kind(), Some(RelationKind::Influence));
        assert_eq!(inf.target(), Some("volume"));

        let prop = Relation::proportional("volume", "outflow", Correlation::Positive);
        assert_eq!(prop.kind(), Some(RelationKind::Proportional));

        let corr = Relation::correspondence(
            LandmarkRef::new("volume", "MAX"),
            LandmarkRef::new("outflow", "MAX"),
        );
        assert_eq!(corr.kind(), None);
        assert_eq!(corr.target(), None);
        assert_eq!(corr.referenced_quantities(), vec!["volume", "outflow"]);
    }
}
