use std::collections::{BTreeMap, BTreeSet};

use crate::error::ModelError;
use crate::relation::Relation;
use crate::space::QuantitySpace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quantity {
    pub name: String,
    pub space: QuantitySpace,
}

impl Quantity {
    pub fn new(name: impl Into<String>, space: QuantitySpace) -> Self {
        Self {
            name: name.into(),
            space,
        }
    }
}

/// A named set of quantities plus the relations that couple them. All
/// relation references are resolved and checked at construction; an `Entity`
/// value is always internally consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    name: String,
    quantities: BTreeMap<String, Quantity>,
    relations: Vec<Relation>,
    exogenous: BTreeSet<String>,
}

impl Entity {
    pub fn new(
        name: impl Into<String>,
        quantities: Vec<Quantity>,
        relations: Vec<Relation>,
    ) -> Result<Self, ModelError> {
        let mut by_name = BTreeMap::new();
        for quantity in quantities {
            if by_name.contains_key(&quantity.name) {
                return Err(ModelError::DuplicateQuantity(quantity.name));
            }
            by_name.insert(quantity.name.clone(), quantity);
        }

        for relation in &relations {
            for referenced in relation.referenced_quantities() {
                if !by_name.contains_key(referenced) {
                    return Err(ModelError::UnknownQuantity(referenced.to_string()));
                }
            }
            if let Relation::ValueCorrespondence { left, right } = relation {
                for side in [left, right] {
                    let space = &by_name[&side.quantity].space;
                    if space.ordinal_of(&side.landmark).is_none() {
                        return Err(ModelError::UnknownLandmark {
                            quantity: side.quantity.clone(),
                            landmark: side.landmark.clone(),
                        });
                    }
                }
            }
        }

        // Quantities no relation drives are externally driven.
        let driven: BTreeSet<&str> = relations.iter().filter_map(Relation::target).collect();
        let exogenous = by_name
            .keys()
            .filter(|name| !driven.contains(name.as_str()))
            .cloned()
            .collect();

        Ok(Self {
            name: name.into(),
            quantities: by_name,
            relations,
            exogenous,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantities(&self) -> &BTreeMap<String, Quantity> {
        &self.quantities
    }

    pub fn quantity(&self, name: &str) -> Option<&Quantity> {
        self.quantities.get(name)
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Quantities that are the target of no Influence or Proportional
    /// relation.
    pub fn is_exogenous(&self, name: &str) -> bool {
        self.exogenous.contains(name)
    }

    pub fn exogenous(&self) -> impl Iterator<Item = &str> {
        self.exogenous.iter().map(String::as_str)
    }
}
